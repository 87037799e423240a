//! Operand stack used while folding parser actions into an AST.
//!
//! Every pop names the variant it expects. Underflow and variant mismatches
//! mean the parser and the action handlers disagree about a production,
//! which no query text can cause, so they panic instead of returning errors.

use crate::ast::{Criteria, OrderSpec, Selector};

/// One slot of the operand stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Raw literal token captured by the parser
    Literal(String),
    Selector(Selector),
    Criteria(Criteria),
    OrderSpec(OrderSpec),
}

impl Operand {
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Literal(_) => "literal",
            Operand::Selector(_) => "selector",
            Operand::Criteria(_) => "criteria",
            Operand::OrderSpec(_) => "order spec",
        }
    }
}

/// Broken wiring between parser productions and action handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    #[error("operand stack underflow: expected {expected}")]
    StackUnderflow { expected: &'static str },

    #[error("operand type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown {what} token '{token}' on operand stack")]
    UnknownToken { what: &'static str, token: String },

    #[error("query finished without a selector")]
    MissingSelector,

    #[error("{depth} operand(s) left on the stack after the last action")]
    LeftoverOperands { depth: usize },
}

/// Aborts the compilation; see the module documentation.
#[track_caller]
pub(crate) fn violated(violation: ContractViolation) -> ! {
    panic!("contract violation: {}", violation)
}

#[derive(Debug, Default)]
pub struct OperandStack {
    items: Vec<Operand>,
}

macro_rules! typed_pop {
    ($name:ident, $variant:ident, $ty:ty, $expected:literal) => {
        #[track_caller]
        pub fn $name(&mut self) -> $ty {
            match self.pop_expecting($expected) {
                Operand::$variant(value) => value,
                other => violated(ContractViolation::TypeMismatch {
                    expected: $expected,
                    found: other.kind(),
                }),
            }
        }
    };
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack { items: Vec::new() }
    }

    pub fn push(&mut self, value: Operand) {
        self.items.push(value);
    }

    /// Removes the top operand; panics on an empty stack.
    #[track_caller]
    pub fn pop(&mut self) -> Operand {
        self.pop_expecting("operand")
    }

    #[track_caller]
    fn pop_expecting(&mut self, expected: &'static str) -> Operand {
        match self.items.pop() {
            Some(value) => value,
            None => violated(ContractViolation::StackUnderflow { expected }),
        }
    }

    typed_pop!(pop_literal, Literal, String, "literal");
    typed_pop!(pop_criteria, Criteria, Criteria, "criteria");
    typed_pop!(pop_order_spec, OrderSpec, OrderSpec, "order spec");

    pub fn peek_top(&self) -> Option<&Operand> {
        self.items.last()
    }

    /// Mutable access to the order spec on top of the stack.
    #[track_caller]
    pub fn top_order_spec_mut(&mut self) -> &mut OrderSpec {
        match self.items.last_mut() {
            Some(Operand::OrderSpec(spec)) => spec,
            Some(other) => violated(ContractViolation::TypeMismatch {
                expected: "order spec",
                found: other.kind(),
            }),
            None => violated(ContractViolation::StackUnderflow {
                expected: "order spec",
            }),
        }
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_reverse_push_order() {
        let mut stack = OperandStack::new();
        stack.push(Operand::Literal("a".into()));
        stack.push(Operand::Literal("b".into()));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop_literal(), "b");
        assert_eq!(stack.pop_literal(), "a");
        assert!(stack.is_empty());
    }

    #[test]
    fn peek_does_not_remove() {
        let mut stack = OperandStack::new();
        stack.push(Operand::OrderSpec(OrderSpec::new("x")));
        assert_eq!(stack.peek_top().map(Operand::kind), Some("order spec"));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn top_order_spec_is_mutated_in_place() {
        let mut stack = OperandStack::new();
        stack.push(Operand::OrderSpec(OrderSpec::new("x")));
        stack.top_order_spec_mut().field.push('y');
        assert_eq!(stack.pop_order_spec(), OrderSpec::new("xy"));
    }

    #[test]
    #[should_panic(expected = "operand stack underflow")]
    fn underflow_is_fatal() {
        OperandStack::new().pop();
    }

    #[test]
    #[should_panic(expected = "expected criteria, found literal")]
    fn mismatch_is_fatal() {
        let mut stack = OperandStack::new();
        stack.push(Operand::Literal("x".into()));
        stack.pop_criteria();
    }

    #[test]
    #[should_panic(expected = "expected order spec, found criteria")]
    fn mutating_non_order_spec_is_fatal() {
        let mut stack = OperandStack::new();
        stack.push(Operand::Criteria(Criteria::index("a", "b")));
        stack.top_order_spec_mut();
    }
}
