use std::num::ParseIntError;

use crate::parser::ParseError;

/// A literal that could not be converted to the type its position requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("invalid integer '{value}' in range criteria on '{field}': {source}")]
    InvalidRangeValue {
        field: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid limit '{value}': {source}")]
    InvalidLimit {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Why a query failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// The text does not match the grammar; no action handler ran
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),

    /// The text parsed, but a literal could not be converted
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl CompileError {
    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax(_))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, CompileError::Value(_))
    }
}

/// Deferred error slot that keeps only the first error recorded.
///
/// Later errors are dropped; the fold keeps going so operand arity stays
/// consistent, and the slot is inspected once at the end.
#[derive(Debug)]
pub struct FirstError<E> {
    slot: Option<E>,
    dropped: usize,
}

impl<E> Default for FirstError<E> {
    fn default() -> Self {
        FirstError {
            slot: None,
            dropped: 0,
        }
    }
}

impl<E> FirstError<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` unless an earlier one is already held.
    ///
    /// Returns true if `error` was kept.
    pub fn record(&mut self, error: E) -> bool {
        if self.slot.is_some() {
            self.dropped += 1;
            false
        } else {
            self.slot = Some(error);
            true
        }
    }

    pub fn is_set(&self) -> bool {
        self.slot.is_some()
    }

    pub fn get(&self) -> Option<&E> {
        self.slot.as_ref()
    }

    /// Number of errors discarded because one was already recorded.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// `Ok(value)` if nothing was recorded, otherwise the first error.
    pub fn into_result<T>(self, value: T) -> Result<T, E> {
        match self.slot {
            Some(error) => Err(error),
            None => Ok(value),
        }
    }
}
