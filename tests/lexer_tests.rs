// tests/lexer_tests.rs

use mcql::ast::Token;
use mcql::lexer::{LexError, Lexer};

fn word(s: &str) -> Token {
    Token::Word(s.to_string())
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", Token::LParen),
        (")", Token::RParen),
        (",", Token::Comma),
        ("=", Token::Eq),
        ("<", Token::Lt),
        (">", Token::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![
        ("==", Token::Eq),
        ("!=", Token::NotEq),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_words() {
    let test_cases = vec!["publisher", "_private", "images.dpla", "images.*", "*", "42", "-7", "a-b"];

    for input in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), word(input), "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_are_plain_words() {
    let tokens = Lexer::new("SELECT where And").tokenize().unwrap();
    assert_eq!(tokens, vec![word("SELECT"), word("where"), word("And"), Token::Eof]);
}

#[test]
fn test_operators_split_words() {
    let tokens = Lexer::new("age>=21").tokenize().unwrap();
    assert_eq!(tokens, vec![word("age"), Token::GtEq, word("21"), Token::Eof]);
}

#[test]
fn test_function_selector() {
    let tokens = Lexer::new("count(*)").tokenize().unwrap();
    assert_eq!(
        tokens,
        vec![word("count"), Token::LParen, word("*"), Token::RParen, Token::Eof]
    );
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn test_double_and_single_quoted_strings() {
    let mut lexer = Lexer::new(r#""hello world" 'it''s'"#);
    assert_eq!(lexer.next_token().unwrap(), Token::String("hello world".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::String("it".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::String("s".to_string()));
}

#[test]
fn test_string_escapes() {
    let mut lexer = Lexer::new(r#""a\"b\\c\nd\te""#);
    assert_eq!(lexer.next_token().unwrap(), Token::String("a\"b\\c\nd\te".to_string()));
}

#[test]
fn test_string_keeps_operators_and_keywords() {
    let mut lexer = Lexer::new(r#""x = 1 and not y""#);
    assert_eq!(lexer.next_token().unwrap(), Token::String("x = 1 and not y".to_string()));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("  \"abc");
    match lexer.next_token() {
        Err(LexError::UnterminatedString { position }) => {
            assert_eq!(position.offset, 2);
            assert_eq!(position.column, 3);
        }
        other => panic!("Expected unterminated string, got {:?}", other),
    }
}

#[test]
fn test_invalid_escape() {
    let mut lexer = Lexer::new(r#""a\qb""#);
    assert!(matches!(lexer.next_token(), Err(LexError::InvalidEscape { ch: 'q', .. })));
}

#[test]
fn test_lone_bang() {
    let mut lexer = Lexer::new("a ! b");
    lexer.next_token().unwrap();
    assert!(matches!(lexer.next_token(), Err(LexError::LoneBang { .. })));
}

#[test]
fn test_unexpected_character() {
    let err = Lexer::new("select a; drop").tokenize().unwrap_err();
    match err {
        LexError::UnexpectedChar { ch, position } => {
            assert_eq!(ch, ';');
            assert_eq!(position.offset, 8);
        }
        other => panic!("Expected unexpected character, got {:?}", other),
    }
}

#[test]
fn test_error_messages_include_position() {
    let err = Lexer::new("select\n  #").tokenize().unwrap_err();
    assert_eq!(err.to_string(), "unexpected character '#' at line 2, column 3");
}
