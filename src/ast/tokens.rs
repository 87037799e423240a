use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word: field names, namespaces, keywords, numbers
    ///
    /// Letters, digits, `_`, `.`, `-` and `*`. Keywords are not separate
    /// tokens; the parser classifies words through the active vocabulary.
    ///
    /// # Examples
    /// ```text
    /// publisher
    /// images.dpla
    /// images.*
    /// 42
    /// -7
    /// ```
    Word(String),

    /// String literal enclosed in double or single quotes
    ///
    /// # Examples
    /// ```text
    /// "dpla"
    /// 'item #1'
    /// ```
    String(String),

    // Comparison
    /// Equality operator (`=` or `==`)
    Eq,

    /// Inequality operator
    NotEq,

    /// Less than
    Lt,

    /// Greater than
    Gt,

    /// Less than or equal
    LtEq,

    /// Greater than or equal
    GtEq,

    // Delimiters
    /// Left parenthesis for grouping or function selectors
    LParen,

    /// Right parenthesis
    RParen,

    /// Comma separating compound selectors and order items
    Comma,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => write!(f, "'{}'", w),
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::Eq => f.write_str("'='"),
            Token::NotEq => f.write_str("'!='"),
            Token::Lt => f.write_str("'<'"),
            Token::Gt => f.write_str("'>'"),
            Token::LtEq => f.write_str("'<='"),
            Token::GtEq => f.write_str("'>='"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
