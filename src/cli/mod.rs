//! CLI support for mcql
//!
//! Provides programmatic access to the `mcql` commands so they can be
//! embedded in other tools and tested without spawning a process.

mod check;
mod docs;

pub use check::{execute_actions, execute_compile, CheckOptions, CheckResult};
pub use docs::get_docs_overview;

use std::{io, path::PathBuf};

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Compile error: {0}")]
    Compile(#[from] crate::CompileError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] crate::ParseError),

    #[error("Vocabulary error: {0}")]
    Vocabulary(#[from] crate::VocabularyError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}

/// Loads the vocabulary named on the command line, or the standard one.
pub fn load_vocabulary(path: Option<&PathBuf>) -> Result<crate::Vocabulary, CliError> {
    match path {
        Some(path) => Ok(crate::Vocabulary::load(path)?),
        None => Ok(crate::Vocabulary::default()),
    }
}
