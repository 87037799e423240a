//! Property tests for the query compiler

use mcql::ast::{BoolOp, Criteria, Direction, OrderSpec, Query, RangeOp, Selector, SimpleSelector, ValueOp};
use mcql::vocabulary::{Keyword, Vocabulary};
use mcql::{compile, CompileError, ValueError};
use proptest::prelude::*;

fn arb_field() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not fields", |s| {
        Vocabulary::standard().keyword(s).is_none()
    })
}

fn arb_direction() -> impl Strategy<Value = Option<Direction>> {
    prop_oneof![
        Just(None),
        Just(Some(Direction::Ascending)),
        Just(Some(Direction::Descending)),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Criteria> {
    prop_oneof![
        (arb_field(), prop_oneof![Just(ValueOp::Equal), Just(ValueOp::NotEqual)], "[ -~]{0,12}")
            .prop_map(|(f, op, v)| Criteria::value(f, op, v)),
        (
            arb_field(),
            prop_oneof![
                Just(RangeOp::LessThan),
                Just(RangeOp::LessEqual),
                Just(RangeOp::GreaterThan),
                Just(RangeOp::GreaterEqual),
            ],
            any::<i64>()
        )
            .prop_map(|(f, op, v)| Criteria::range(f, op, v)),
        (arb_field(), "[a-z0-9 ]{0,12}").prop_map(|(f, v)| Criteria::index(f, v)),
    ]
}

fn arb_criteria() -> impl Strategy<Value = Criteria> {
    arb_leaf().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop_oneof![Just(BoolOp::And), Just(BoolOp::Or)], inner.clone())
                .prop_map(|(l, op, r)| Criteria::compound(op, l, r)),
            inner.prop_map(Criteria::negated),
        ]
    })
}

proptest! {
    /// Projection lists keep their written order
    #[test]
    fn compound_selector_preserves_order(fields in proptest::collection::vec(arb_field(), 2..8)) {
        let query = compile(&format!("select {}", fields.join(", "))).unwrap();
        let expected: Vec<SimpleSelector> = fields.iter().map(SimpleSelector::new).collect();
        prop_assert_eq!(&query.selector, &Selector::Compound { fields: expected });
        if let Selector::Compound { fields: compiled } = &query.selector {
            let names: Vec<&str> = compiled.iter().map(SimpleSelector::field).collect();
            prop_assert_eq!(names, fields.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }

    /// Order specs keep their written order and directions
    #[test]
    fn order_preserves_sequence(
        items in proptest::collection::vec((arb_field(), arb_direction()), 1..6)
    ) {
        let rendered: Vec<String> = items
            .iter()
            .map(|(field, dir)| match dir {
                Some(dir) => format!("{} {}", field, dir),
                None => field.clone(),
            })
            .collect();
        let query = compile(&format!("select * order by {}", rendered.join(", "))).unwrap();
        let expected: Vec<OrderSpec> = items
            .into_iter()
            .map(|(field, dir)| OrderSpec { field, dir })
            .collect();
        prop_assert_eq!(query.order, expected);
    }

    /// The first malformed integer is reported, whatever follows it
    #[test]
    fn first_value_error_wins(
        first in "[a-z]{1,6}",
        later in proptest::collection::vec("[a-z]{1,6}", 0..4),
        limit in "[a-z]{1,6}"
    ) {
        prop_assume!(Vocabulary::standard().keyword(&first).is_none());
        prop_assume!(Vocabulary::standard().keyword(&limit).is_none());
        prop_assume!(later.iter().all(|w| Vocabulary::standard().keyword(w).is_none()));

        let mut text = format!("select * where f0 > {}", first);
        for (i, word) in later.iter().enumerate() {
            text.push_str(&format!(" or f{} < {}", i + 1, word));
        }
        text.push_str(&format!(" limit {}", limit));

        match compile(&text) {
            Err(CompileError::Value(ValueError::InvalidRangeValue { field, value, .. })) => {
                prop_assert_eq!(field, "f0");
                prop_assert_eq!(value, first);
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }

    /// A valid limit never produces a value error
    #[test]
    fn numeric_limit_compiles(limit in any::<u64>()) {
        let query = compile(&format!("select * limit {}", limit)).unwrap();
        prop_assert_eq!(query.limit, Some(limit));
    }

    /// Rendering a criteria tree and compiling it yields the same tree
    #[test]
    fn rendered_criteria_recompile(criteria in arb_criteria()) {
        let query = Query {
            criteria: Some(criteria),
            ..Query::new(Default::default(), Selector::simple("*"))
        };
        let text = query.to_string();
        prop_assert_eq!(compile(&text).unwrap(), query);
    }

    /// Keyword spellings never pass as field names
    #[test]
    fn keywords_are_never_fields(index in 0usize..Keyword::ALL.len()) {
        let spelling = Vocabulary::standard().spelling(Keyword::ALL[index]).to_uppercase();
        let text = format!("select {}", spelling);
        prop_assert!(compile(&text).unwrap_err().is_syntax());
    }
}
