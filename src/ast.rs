//! # Record Query Language - Abstract Syntax Tree
//!
//! This module defines the typed Abstract Syntax Tree (AST) produced by the
//! query compiler. A compiled [`Query`] tells the node which records to
//! select (or delete), how to filter them, how to order them and how many to
//! return.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[selector]** - Field selectors (simple, compound projection, function)
//! - **[criteria]** - Filter expression trees (value, range, index, boolean)
//! - **[operators]** - Comparison and boolean operators, order directions
//! - **[order]** - Order specifications for sorting results
//! - **[query]** - The complete compiled query
//!
//! ## Quick Start
//!
//! ```text
//! select id, publisher from images.dpla where source = "dpla" limit 10
//! ```
//!
//! This query projects two fields from the `images.dpla` namespace, keeps
//! records whose source is `dpla` and returns at most ten of them.
//!
//! ## Core Concepts
//!
//! ### Operations
//!
//! - **Select** - Return records (or a projection of them)
//! - **Delete** - Remove records; the selector is always the record identity
//!
//! ### Selectors
//!
//! - **Simple** `field` - A single field (or `*` for the whole record)
//! - **Compound** `a, b, c` - A projection list; order is preserved
//! - **Function** `count(*)` - A named operator applied to one field
//!
//! ### Criteria
//!
//! - **Value** `field = "text"` - Equality-class comparison against a string
//! - **Range** `field > 10` - Ordering comparison against an integer
//! - **Index** `field in "text"` - Membership test
//! - **Compound** `a and b`, `a or b` - Boolean combination of two subtrees
//! - **Negated** `not a` - Logical negation
//!
//! Every type in this module renders back to canonical query text through
//! its `Display` implementation.
//!
//! ## Examples
//!
//! ### Aggregate
//!
//! ```text
//! select count(*) from images.*
//! ```
//!
//! ### Nested Criteria
//!
//! ```text
//! select * where not (publisher = "abc" and timestamp > 1000)
//! ```
//!
//! ### Ordering
//!
//! ```text
//! select * order by timestamp desc, counter limit 100
//! ```
pub mod tokens;
pub mod criteria;
pub mod operators;
pub mod order;
pub mod query;
pub mod selector;

pub use tokens::Token;
pub use criteria::Criteria;
pub use operators::{BoolOp, Direction, RangeOp, ValueOp};
pub use order::OrderSpec;
pub use query::{Op, Query};
pub use selector::{Selector, SimpleSelector};

/// Writes `s` as a double-quoted string literal, escaping as the lexer expects.
pub(crate) fn write_quoted(f: &mut std::fmt::Formatter<'_>, s: &str) -> std::fmt::Result {
    f.write_str("\"")?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("\"")
}
