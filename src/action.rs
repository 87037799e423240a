use std::fmt;

/// A semantic action emitted by the parser.
///
/// The parser records one action per reduced production (plus a `Push` for
/// every captured terminal) in bottom-up order. [`crate::state::ParseState`]
/// replays them to fold the operand stack into a [`crate::ast::Query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Push a literal token (field name, operator, value, direction)
    Push(String),

    SetSelectOp,
    SetDeleteOp,
    SetSimpleSelector,
    SetCompoundSelector,
    SetFunctionSelector,
    SetNamespace(String),

    SetCriteria,
    AddValueCriteria,
    AddRangeCriteria,
    AddIndexCriteria,
    AddCompoundCriteria,
    AddNegatedCriteria,

    SetOrder,
    AddOrderSelector,
    SetOrderDirection,

    SetLimit(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Push(text) => write!(f, "push {:?}", text),
            Action::SetSelectOp => f.write_str("set-select-op"),
            Action::SetDeleteOp => f.write_str("set-delete-op"),
            Action::SetSimpleSelector => f.write_str("set-simple-selector"),
            Action::SetCompoundSelector => f.write_str("set-compound-selector"),
            Action::SetFunctionSelector => f.write_str("set-function-selector"),
            Action::SetNamespace(ns) => write!(f, "set-namespace {:?}", ns),
            Action::SetCriteria => f.write_str("set-criteria"),
            Action::AddValueCriteria => f.write_str("add-value-criteria"),
            Action::AddRangeCriteria => f.write_str("add-range-criteria"),
            Action::AddIndexCriteria => f.write_str("add-index-criteria"),
            Action::AddCompoundCriteria => f.write_str("add-compound-criteria"),
            Action::AddNegatedCriteria => f.write_str("add-negated-criteria"),
            Action::SetOrder => f.write_str("set-order"),
            Action::AddOrderSelector => f.write_str("add-order-selector"),
            Action::SetOrderDirection => f.write_str("set-order-direction"),
            Action::SetLimit(text) => write!(f, "set-limit {:?}", text),
        }
    }
}
