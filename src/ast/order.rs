use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::Direction;

/// One sort key of a query.
///
/// Order specifications are kept in a `Vec` on the query, most significant
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub field: String,

    /// Explicit direction, if one was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
}

impl OrderSpec {
    pub fn new(field: impl Into<String>) -> Self {
        OrderSpec {
            field: field.into(),
            dir: None,
        }
    }

    pub fn with_direction(field: impl Into<String>, dir: Direction) -> Self {
        OrderSpec {
            field: field.into(),
            dir: Some(dir),
        }
    }

    /// Effective direction: ascending unless stated otherwise.
    pub fn direction(&self) -> Direction {
        self.dir.unwrap_or_default()
    }
}

impl fmt::Display for OrderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dir {
            Some(dir) => write!(f, "{} {}", self.field, dir),
            None => f.write_str(&self.field),
        }
    }
}
