//! Compiler entry points.
//!
//! A compilation recognizes the whole input first, then folds the recorded
//! actions into a fresh [`ParseState`]. All state is local to the call, so
//! compilations on different threads never interact.

use tracing::debug;

use crate::{
    action::Action,
    ast::Query,
    error::CompileError,
    lexer::Lexer,
    parser::{ParseError, Parser},
    state::ParseState,
    vocabulary::Vocabulary,
};

/// Compiles query text with the standard vocabulary.
///
/// ```
/// use mcql::{compile, ast::Selector};
///
/// let query = compile("select id, publisher from images.dpla limit 10").unwrap();
/// assert_eq!(query.namespace.as_deref(), Some("images.dpla"));
/// assert!(matches!(query.selector, Selector::Compound { .. }));
/// assert_eq!(query.limit, Some(10));
/// ```
pub fn compile(text: &str) -> Result<Query, CompileError> {
    compile_with(text, Vocabulary::standard())
}

/// Compiles query text with a custom vocabulary.
pub fn compile_with(text: &str, vocabulary: &Vocabulary) -> Result<Query, CompileError> {
    let actions = trace_actions_with(text, vocabulary)?;

    let mut state = ParseState::new();
    for action in actions {
        state.apply(action);
    }

    let result = state.finish();
    match &result {
        Ok(query) => debug!(op = ?query.op, "compiled query"),
        Err(err) => debug!(error = %err, "query has an invalid literal"),
    }
    Ok(result?)
}

/// Runs only the grammar recognizer.
pub fn check_syntax(text: &str) -> Result<(), ParseError> {
    trace_actions(text).map(|_| ())
}

/// Semantic actions the recognizer emits for `text`, in execution order.
pub fn trace_actions(text: &str) -> Result<Vec<Action>, ParseError> {
    trace_actions_with(text, Vocabulary::standard())
}

pub fn trace_actions_with(text: &str, vocabulary: &Vocabulary) -> Result<Vec<Action>, ParseError> {
    let parser = Parser::new(Lexer::new(text), vocabulary)?;
    match parser.parse_query() {
        Ok(actions) => {
            debug!(actions = actions.len(), "recognized query");
            Ok(actions)
        }
        Err(err) => {
            debug!(error = %err, "syntax error");
            Err(err)
        }
    }
}
