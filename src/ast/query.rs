use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{Criteria, OrderSpec, Selector};

/// Operation a query performs on the records it matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Op {
    #[default]
    Select,
    Delete,
}

/// Complete compiled query.
///
/// Produced by [`crate::compile`]; owned entirely by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub op: Op,

    /// Namespace scoping the selector (e.g. `images.dpla`, `images.*`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    pub selector: Selector,

    /// Optional filter (matches everything if None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,

    /// Sort keys, most significant first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order: Vec<OrderSpec>,

    /// Maximum number of results (unbounded if None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Query {
    pub fn new(op: Op, selector: Selector) -> Self {
        Query {
            op,
            namespace: None,
            selector,
            criteria: None,
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit.is_none()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            Op::Select => write!(f, "select {}", self.selector)?,
            Op::Delete => f.write_str("delete")?,
        }
        if let Some(namespace) = &self.namespace {
            write!(f, " from {}", namespace)?;
        }
        if let Some(criteria) = &self.criteria {
            write!(f, " where {}", criteria)?;
        }
        if !self.order.is_empty() {
            f.write_str(" order by ")?;
            for (i, spec) in self.order.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", spec)?;
            }
        }
        if let Some(limit) = self.limit {
            write!(f, " limit {}", limit)?;
        }
        Ok(())
    }
}
