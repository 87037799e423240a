use mcql::cli::{execute_actions, execute_compile, get_docs_overview, CheckOptions, CheckResult, CliError};
use mcql::{Action, Selector};
use std::fs;
use std::path::PathBuf;

fn options(query: &str) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_compile_returns_query() {
    match execute_compile(&options("select a, b")).unwrap() {
        CheckResult::Compiled(query) => assert!(matches!(query.selector, Selector::Compound { .. })),
        other => panic!("Expected compiled query, got {:?}", other),
    }
}

#[test]
fn test_syntax_only_skips_value_checks() {
    let mut opts = options("select * limit abc");
    opts.syntax_only = true;
    assert!(matches!(execute_compile(&opts).unwrap(), CheckResult::SyntaxValid));

    opts.syntax_only = false;
    assert!(matches!(execute_compile(&opts), Err(CliError::Compile(_))));
}

#[test]
fn test_syntax_only_reports_syntax_errors() {
    let mut opts = options("select");
    opts.syntax_only = true;
    assert!(matches!(execute_compile(&opts), Err(CliError::Syntax(_))));
}

#[test]
fn test_actions_listing() {
    let actions = execute_actions(&options("select x order by x")).unwrap();
    let lines: Vec<String> = actions.iter().map(Action::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "set-select-op",
            "push \"x\"",
            "set-simple-selector",
            "push \"x\"",
            "add-order-selector",
            "set-order",
        ]
    );
}

#[test]
fn test_vocabulary_file() {
    let path = std::env::temp_dir().join(format!("mcql-vocab-{}.json", std::process::id()));
    fs::write(&path, r#"{"keywords": {"select": "pick"}}"#).unwrap();

    let opts = CheckOptions {
        query: "pick a".to_string(),
        vocabulary: Some(path.clone()),
        syntax_only: false,
    };
    let result = execute_compile(&opts);
    fs::remove_file(&path).ok();
    assert!(matches!(result.unwrap(), CheckResult::Compiled(_)));
}

#[test]
fn test_missing_vocabulary_file() {
    let opts = CheckOptions {
        query: "select a".to_string(),
        vocabulary: Some(PathBuf::from("/nonexistent/mcql/vocabulary.json")),
        syntax_only: false,
    };
    let err = execute_compile(&opts).unwrap_err();
    assert!(matches!(err, CliError::Vocabulary(_)));
    assert!(err.to_string().starts_with("Vocabulary error: failed to read vocabulary from"));
}

#[test]
fn test_docs_mention_every_clause() {
    let docs = get_docs_overview();
    for word in ["select", "delete", "where", "order by", "limit", "not", "non-negative"] {
        assert!(docs.contains(word), "docs missing {}", word);
    }
}
