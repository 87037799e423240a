pub mod action;
pub mod ast;
pub mod cli;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod stack;
pub mod state;
pub mod vocabulary;

pub use action::Action;
pub use ast::{Criteria, OrderSpec, Query, Selector, Token};
pub use compiler::{check_syntax, compile, compile_with, trace_actions, trace_actions_with};
pub use error::{CompileError, FirstError, ValueError};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use state::ParseState;
pub use vocabulary::{Vocabulary, VocabularyError};
