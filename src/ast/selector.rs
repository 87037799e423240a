use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field name.
///
/// `*` selects the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimpleSelector(pub String);

impl SimpleSelector {
    pub fn new(field: impl Into<String>) -> Self {
        SimpleSelector(field.into())
    }

    pub fn field(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which field(s) of a record a query targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selector {
    /// A single field
    ///
    /// # Example
    /// ```text
    /// select publisher
    /// ```
    Simple { field: SimpleSelector },

    /// An ordered projection list; never empty
    ///
    /// # Example
    /// ```text
    /// select id, publisher, timestamp
    /// ```
    Compound { fields: Vec<SimpleSelector> },

    /// A named operator applied to one field
    ///
    /// # Example
    /// ```text
    /// select count(*)
    /// ```
    Function { name: String, field: SimpleSelector },
}

impl Selector {
    pub fn simple(field: impl Into<String>) -> Self {
        Selector::Simple {
            field: SimpleSelector::new(field),
        }
    }

    /// The identity selector, used by delete queries.
    pub fn identity() -> Self {
        Selector::simple("id")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Simple { field } => write!(f, "{}", field),
            Selector::Compound { fields } => {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", field)?;
                }
                Ok(())
            }
            Selector::Function { name, field } => write!(f, "{}({})", name, field),
        }
    }
}
