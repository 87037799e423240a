use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Equality-class operators used by value criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOp {
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
}

/// Ordering operators used by range criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeOp {
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

/// Boolean combinators used by compound criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolOp {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

/// Sort direction of an order specification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending (`asc`), the default when no direction is given
    #[default]
    Ascending,
    /// Descending (`desc`)
    Descending,
}

/// A canonical operator spelling that does not name any known operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

macro_rules! canonical_spelling {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Canonical spelling, as pushed onto the operand stack.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownOperator;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownOperator(other.to_string())),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

canonical_spelling!(ValueOp {
    Equal => "=",
    NotEqual => "!=",
});

canonical_spelling!(RangeOp {
    LessThan => "<",
    LessEqual => "<=",
    GreaterThan => ">",
    GreaterEqual => ">=",
});

canonical_spelling!(BoolOp {
    And => "and",
    Or => "or",
});

canonical_spelling!(Direction {
    Ascending => "asc",
    Descending => "desc",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_spellings_parse_back() {
        for op in [RangeOp::LessThan, RangeOp::LessEqual, RangeOp::GreaterThan, RangeOp::GreaterEqual] {
            assert_eq!(op.as_str().parse::<RangeOp>(), Ok(op));
        }
        assert_eq!("!=".parse::<ValueOp>(), Ok(ValueOp::NotEqual));
        assert_eq!("or".parse::<BoolOp>(), Ok(BoolOp::Or));
        assert_eq!("desc".parse::<Direction>(), Ok(Direction::Descending));
    }

    #[test]
    fn unknown_spelling_is_rejected() {
        assert_eq!("<>".parse::<ValueOp>(), Err(UnknownOperator("<>".to_string())));
        assert!("AND".parse::<BoolOp>().is_err());
    }
}
