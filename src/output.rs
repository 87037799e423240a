//! JSON output for compiled queries.
//!
//! The node service receives queries as text, but tooling (and the `mcql`
//! binary) often wants the compiled AST. This module renders a [`Query`]
//! with `serde_json` in either compact or pretty form.
//!
//! # Examples
//!
//! ```
//! use mcql::{compile, output::to_json};
//!
//! let query = compile("select publisher").unwrap();
//! assert_eq!(
//!     to_json(&query).unwrap(),
//!     r#"{"op":"select","selector":{"kind":"simple","field":"publisher"}}"#
//! );
//! ```

use crate::ast::Query;

/// Compact JSON: minimal whitespace.
pub fn to_json(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string(query)
}

/// Human-readable JSON with 2-space indentation.
pub fn to_json_pretty(query: &Query) -> serde_json::Result<String> {
    serde_json::to_string_pretty(query)
}

/// Reads a query back from its JSON form.
pub fn from_json(json: &str) -> serde_json::Result<Query> {
    serde_json::from_str(json)
}
