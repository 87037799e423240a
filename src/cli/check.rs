//! Compile queries from the command line

use std::path::PathBuf;

use super::{load_vocabulary, CliError};
use crate::{compile_with, trace_actions_with, Action, Query};

/// Options for the compile and actions commands
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query text
    pub query: String,
    /// JSON vocabulary file (standard vocabulary if None)
    pub vocabulary: Option<PathBuf>,
    /// Only validate syntax, don't run the action handlers
    pub syntax_only: bool,
}

/// Result of a compile operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Query compiled successfully
    Compiled(Query),
}

/// Execute a compile operation
pub fn execute_compile(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let vocabulary = load_vocabulary(options.vocabulary.as_ref())?;

    if options.syntax_only {
        trace_actions_with(&options.query, &vocabulary)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let query = compile_with(&options.query, &vocabulary)?;
    Ok(CheckResult::Compiled(query))
}

/// List the semantic actions the recognizer emits for the query
pub fn execute_actions(options: &CheckOptions) -> Result<Vec<Action>, CliError> {
    let vocabulary = load_vocabulary(options.vocabulary.as_ref())?;
    Ok(trace_actions_with(&options.query, &vocabulary)?)
}
