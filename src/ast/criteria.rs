use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{BoolOp, RangeOp, ValueOp, write_quoted};

/// Boolean filter expression tree over record fields.
///
/// Children of `Compound` and `Negated` are always fully built before their
/// parent, so a tree can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criteria {
    /// Equality-class comparison against a string literal
    ///
    /// # Example
    /// ```text
    /// publisher = "4XTTM4K8sqTb7gS"
    /// ```
    Value {
        field: String,
        op: ValueOp,
        value: String,
    },

    /// Ordering comparison against an integer literal
    ///
    /// # Example
    /// ```text
    /// timestamp >= 1475000000
    /// ```
    Range { field: String, op: RangeOp, value: i64 },

    /// Membership test of a literal in a field
    ///
    /// # Example
    /// ```text
    /// wki in "dpla_1349ede833dfd1a1d2bb2eea35bb9c16"
    /// ```
    Index { field: String, value: String },

    /// Boolean combination of exactly two subtrees
    Compound {
        op: BoolOp,
        left: Box<Criteria>,
        right: Box<Criteria>,
    },

    /// Logical negation
    Negated { criteria: Box<Criteria> },
}

impl Criteria {
    pub fn value(field: impl Into<String>, op: ValueOp, value: impl Into<String>) -> Self {
        Criteria::Value {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, op: RangeOp, value: i64) -> Self {
        Criteria::Range {
            field: field.into(),
            op,
            value,
        }
    }

    pub fn index(field: impl Into<String>, value: impl Into<String>) -> Self {
        Criteria::Index {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn compound(op: BoolOp, left: Criteria, right: Criteria) -> Self {
        Criteria::Compound {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negated(criteria: Criteria) -> Self {
        Criteria::Negated {
            criteria: Box::new(criteria),
        }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Criteria::Value { .. } | Criteria::Range { .. } | Criteria::Index { .. } => 1,
            Criteria::Compound { left, right, .. } => 1 + left.size() + right.size(),
            Criteria::Negated { criteria } => 1 + criteria.size(),
        }
    }
}

// Compound nodes are always parenthesized so the rendering recompiles to the
// same tree regardless of `and`/`or` precedence.
impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Value { field, op, value } => {
                write!(f, "{} {} ", field, op)?;
                write_quoted(f, value)
            }
            Criteria::Range { field, op, value } => write!(f, "{} {} {}", field, op, value),
            Criteria::Index { field, value } => {
                write!(f, "{} in ", field)?;
                write_quoted(f, value)
            }
            Criteria::Compound { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Criteria::Negated { criteria } => write!(f, "not {}", criteria),
        }
    }
}
