//! Semantic action handlers.
//!
//! [`ParseState`] owns everything a single compilation mutates: the operand
//! stack, the query under construction and the deferred value error. Each
//! handler corresponds to one grammar production. Comments on handlers show
//! the stack layout they consume, top of stack first.

use std::str::FromStr;

use tracing::trace;

use crate::{
    action::Action,
    ast::{BoolOp, Criteria, Direction, Op, OrderSpec, Query, RangeOp, Selector, SimpleSelector, ValueOp},
    error::{FirstError, ValueError},
    stack::{ContractViolation, Operand, OperandStack, violated},
};

#[derive(Debug, Default)]
pub struct ParseState {
    stack: OperandStack,
    op: Op,
    namespace: Option<String>,
    selector: Option<Selector>,
    criteria: Option<Criteria>,
    order: Vec<OrderSpec>,
    limit: Option<u64>,
    errors: FirstError<ValueError>,
}

#[track_caller]
fn parse_token<T: FromStr>(token: String, what: &'static str) -> T {
    match token.parse() {
        Ok(value) => value,
        Err(_) => violated(ContractViolation::UnknownToken { what, token }),
    }
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    /// The deferred value error, if one has been recorded.
    pub fn error(&self) -> Option<&ValueError> {
        self.errors.get()
    }

    /// Runs the handler for `action`.
    #[track_caller]
    pub fn apply(&mut self, action: Action) {
        trace!(%action, depth = self.stack.depth(), "applying action");
        match action {
            Action::Push(text) => self.push(text),
            Action::SetSelectOp => self.set_select_op(),
            Action::SetDeleteOp => self.set_delete_op(),
            Action::SetSimpleSelector => self.set_simple_selector(),
            Action::SetCompoundSelector => self.set_compound_selector(),
            Action::SetFunctionSelector => self.set_function_selector(),
            Action::SetNamespace(ns) => self.set_namespace(ns),
            Action::SetCriteria => self.set_criteria(),
            Action::AddValueCriteria => self.add_value_criteria(),
            Action::AddRangeCriteria => self.add_range_criteria(),
            Action::AddIndexCriteria => self.add_index_criteria(),
            Action::AddCompoundCriteria => self.add_compound_criteria(),
            Action::AddNegatedCriteria => self.add_negated_criteria(),
            Action::SetOrder => self.set_order(),
            Action::AddOrderSelector => self.add_order_selector(),
            Action::SetOrderDirection => self.set_order_direction(),
            Action::SetLimit(text) => self.set_limit(&text),
        }
    }

    pub fn push(&mut self, literal: impl Into<String>) {
        self.stack.push(Operand::Literal(literal.into()));
    }

    pub fn set_select_op(&mut self) {
        self.op = Op::Select;
    }

    pub fn set_delete_op(&mut self) {
        self.op = Op::Delete;
        self.selector = Some(Selector::identity());
    }

    /// stack: field
    #[track_caller]
    pub fn set_simple_selector(&mut self) {
        let field = self.stack.pop_literal();
        self.selector = Some(Selector::Simple {
            field: SimpleSelector(field),
        });
    }

    /// stack: field ... (every operand on the stack)
    #[track_caller]
    pub fn set_compound_selector(&mut self) {
        let count = self.stack.depth();
        let mut fields = Vec::with_capacity(count);
        for _ in 0..count {
            fields.push(SimpleSelector(self.stack.pop_literal()));
        }
        fields.reverse();
        self.selector = Some(Selector::Compound { fields });
    }

    /// stack: field function
    #[track_caller]
    pub fn set_function_selector(&mut self) {
        let field = self.stack.pop_literal();
        let name = self.stack.pop_literal();
        self.selector = Some(Selector::Function {
            name,
            field: SimpleSelector(field),
        });
    }

    pub fn set_namespace(&mut self, namespace: impl Into<String>) {
        self.namespace = Some(namespace.into());
    }

    /// stack: criteria
    #[track_caller]
    pub fn set_criteria(&mut self) {
        self.criteria = Some(self.stack.pop_criteria());
    }

    /// stack: value op field
    #[track_caller]
    pub fn add_value_criteria(&mut self) {
        let value = self.stack.pop_literal();
        let op: ValueOp = parse_token(self.stack.pop_literal(), "value operator");
        let field = self.stack.pop_literal();
        self.stack.push(Operand::Criteria(Criteria::Value { field, op, value }));
    }

    /// stack: value op field
    ///
    /// A value that is not an integer records a deferred error and is
    /// replaced by zero.
    #[track_caller]
    pub fn add_range_criteria(&mut self) {
        let text = self.stack.pop_literal();
        let op: RangeOp = parse_token(self.stack.pop_literal(), "range operator");
        let field = self.stack.pop_literal();
        let value = match text.parse::<i64>() {
            Ok(value) => value,
            Err(source) => {
                self.errors.record(ValueError::InvalidRangeValue {
                    field: field.clone(),
                    value: text,
                    source,
                });
                0
            }
        };
        self.stack.push(Operand::Criteria(Criteria::Range { field, op, value }));
    }

    /// stack: value field
    #[track_caller]
    pub fn add_index_criteria(&mut self) {
        let value = self.stack.pop_literal();
        let field = self.stack.pop_literal();
        self.stack.push(Operand::Criteria(Criteria::Index { field, value }));
    }

    /// stack: right op left
    #[track_caller]
    pub fn add_compound_criteria(&mut self) {
        let right = self.stack.pop_criteria();
        let op: BoolOp = parse_token(self.stack.pop_literal(), "boolean operator");
        let left = self.stack.pop_criteria();
        self.stack.push(Operand::Criteria(Criteria::compound(op, left, right)));
    }

    /// stack: criteria
    #[track_caller]
    pub fn add_negated_criteria(&mut self) {
        let criteria = self.stack.pop_criteria();
        self.stack.push(Operand::Criteria(Criteria::negated(criteria)));
    }

    /// stack: order-spec ... (every operand on the stack)
    #[track_caller]
    pub fn set_order(&mut self) {
        let count = self.stack.depth();
        let mut specs = Vec::with_capacity(count);
        for _ in 0..count {
            specs.push(self.stack.pop_order_spec());
        }
        specs.reverse();
        self.order = specs;
    }

    /// stack: field
    #[track_caller]
    pub fn add_order_selector(&mut self) {
        let field = self.stack.pop_literal();
        self.stack.push(Operand::OrderSpec(OrderSpec::new(field)));
    }

    /// stack: dir order-spec
    #[track_caller]
    pub fn set_order_direction(&mut self) {
        let dir: Direction = parse_token(self.stack.pop_literal(), "direction");
        self.stack.top_order_spec_mut().dir = Some(dir);
    }

    /// A limit that is not a non-negative integer records a deferred error
    /// and is replaced by zero.
    pub fn set_limit(&mut self, text: &str) {
        let limit = match text.parse::<u64>() {
            Ok(limit) => limit,
            Err(source) => {
                self.errors.record(ValueError::InvalidLimit {
                    value: text.to_string(),
                    source,
                });
                0
            }
        };
        self.limit = Some(limit);
    }

    /// Materializes the query, or returns the first deferred value error.
    #[track_caller]
    pub fn finish(self) -> Result<Query, ValueError> {
        if !self.stack.is_empty() {
            violated(ContractViolation::LeftoverOperands {
                depth: self.stack.depth(),
            });
        }
        let Some(selector) = self.selector else {
            violated(ContractViolation::MissingSelector);
        };
        let query = Query {
            op: self.op,
            namespace: self.namespace,
            selector,
            criteria: self.criteria,
            order: self.order,
            limit: self.limit,
        };
        self.errors.into_result(query)
    }
}
