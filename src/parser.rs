use std::mem;

use crate::{
    action::Action,
    ast::{BoolOp, Direction, RangeOp, Token, ValueOp},
    lexer::{LexError, Lexer, Position},
    vocabulary::{Keyword, Vocabulary},
};

/// Query text that does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("expected {expected}, found {found} at {position}")]
    Unexpected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("'{name}' is not a valid field name at {position}")]
    InvalidField { name: String, position: Position },

    #[error("'{name}' is not a valid function name at {position}")]
    InvalidFunction { name: String, position: Position },

    #[error("'{name}' is not a valid namespace at {position}")]
    InvalidNamespace { name: String, position: Position },

    #[error("criteria nested more than {limit} levels deep at {position}")]
    NestingTooDeep { limit: usize, position: Position },
}

impl ParseError {
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(
                LexError::UnexpectedChar { position, .. }
                | LexError::LoneBang { position }
                | LexError::UnterminatedString { position }
                | LexError::InvalidEscape { position, .. },
            ) => *position,
            ParseError::Unexpected { position, .. }
            | ParseError::InvalidField { position, .. }
            | ParseError::InvalidFunction { position, .. }
            | ParseError::InvalidNamespace { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
        }
    }
}

/// Grammar recognizer.
///
/// Matches query text against the grammar and records the semantic actions
/// of the successful parse in bottom-up order. Nothing is built here; the
/// recorded actions are replayed by [`crate::state::ParseState`] only once
/// the whole input has been recognized.
pub struct Parser<'v> {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    vocabulary: &'v Vocabulary,
    actions: Vec<Action>,
    depth: usize,
}

impl<'v> Parser<'v> {
    pub fn new(mut lexer: Lexer, vocabulary: &'v Vocabulary) -> Result<Self, ParseError> {
        let (current_token, current_position) = lexer.next_spanned()?;
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            vocabulary,
            actions: Vec::new(),
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        let (token, position) = self.lexer.next_spanned()?;
        self.current_token = token;
        self.current_position = position;
        Ok(())
    }

    fn emit(&mut self, action: Action) {
        self.actions.push(action);
    }

    fn push(&mut self, text: impl Into<String>) {
        self.emit(Action::Push(text.into()));
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        ParseError::Unexpected {
            expected: expected.into(),
            found: self.current_token.to_string(),
            position: self.current_position,
        }
    }

    fn quoted(&self, keyword: Keyword) -> String {
        format!("'{}'", self.vocabulary.spelling(keyword))
    }

    /// Opens one level of `not` or parenthesis nesting.
    fn enter(&mut self) -> Result<(), ParseError> {
        let limit = self.vocabulary.max_nesting();
        if self.depth >= limit {
            return Err(ParseError::NestingTooDeep {
                limit,
                position: self.current_position,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(expected.to_string()));
        }
        self.advance()
    }

    fn current_keyword(&self) -> Option<Keyword> {
        match &self.current_token {
            Token::Word(word) => self.vocabulary.keyword(word),
            _ => None,
        }
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current_keyword() == Some(keyword)
    }

    /// Consumes `keyword` if it is the current token.
    fn eat_keyword(&mut self, keyword: Keyword) -> Result<bool, ParseError> {
        if self.check_keyword(keyword) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if !self.check_keyword(keyword) {
            return Err(self.unexpected(self.quoted(keyword)));
        }
        self.advance()
    }

    /// Consumes a word that is not a keyword, returning it with its position.
    fn expect_word(&mut self, expected: &str) -> Result<(String, Position), ParseError> {
        let position = self.current_position;
        match &self.current_token {
            Token::Word(word) if self.vocabulary.keyword(word).is_none() => {}
            _ => return Err(self.unexpected(expected)),
        }
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Word(word) => {
                self.advance()?;
                Ok((word, position))
            }
            _ => unreachable!(),
        }
    }

    fn expect_field(&mut self) -> Result<String, ParseError> {
        let (name, position) = self.expect_word("field name")?;
        if !self.vocabulary.is_field(&name) {
            return Err(ParseError::InvalidField { name, position });
        }
        Ok(name)
    }

    /// String literal or bare word.
    fn expect_literal(&mut self) -> Result<String, ParseError> {
        if let Token::String(_) = &self.current_token {
            match mem::replace(&mut self.current_token, Token::Eof) {
                Token::String(value) => {
                    self.advance()?;
                    return Ok(value);
                }
                _ => unreachable!(),
            }
        }
        self.expect_word("literal value").map(|(word, _)| word)
    }
}

impl Parser<'_> {
    /// Recognizes a complete query and returns its semantic actions.
    pub fn parse_query(mut self) -> Result<Vec<Action>, ParseError> {
        match self.current_keyword() {
            Some(Keyword::Select) => self.parse_select()?,
            Some(Keyword::Delete) => self.parse_delete()?,
            _ => {
                let expected = format!("{} or {}", self.quoted(Keyword::Select), self.quoted(Keyword::Delete));
                return Err(self.unexpected(expected));
            }
        }

        if !self.check(&Token::Eof) {
            return Err(self.unexpected("end of input"));
        }
        Ok(self.actions)
    }

    fn parse_select(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume select
        self.emit(Action::SetSelectOp);
        self.parse_selector()?;
        self.parse_source()?;
        self.parse_where()?;
        self.parse_order()?;
        self.parse_limit()
    }

    fn parse_delete(&mut self) -> Result<(), ParseError> {
        self.advance()?; // consume delete
        self.emit(Action::SetDeleteOp);
        self.parse_source()?;
        self.parse_where()?;
        self.parse_limit()
    }

    fn parse_selector(&mut self) -> Result<(), ParseError> {
        let (first, position) = self.expect_word("selector")?;

        if self.check(&Token::LParen) {
            let valid = first.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_')
                && first.chars().all(|c| c.is_alphanumeric() || c == '_');
            if !valid {
                return Err(ParseError::InvalidFunction { name: first, position });
            }
            self.advance()?; // consume (
            let field = self.expect_field()?;
            self.expect(Token::RParen)?;

            self.push(first);
            self.push(field);
            self.emit(Action::SetFunctionSelector);
            return Ok(());
        }

        if !self.vocabulary.is_field(&first) {
            return Err(ParseError::InvalidField { name: first, position });
        }
        self.push(first);

        if !self.check(&Token::Comma) {
            self.emit(Action::SetSimpleSelector);
            return Ok(());
        }

        while self.check(&Token::Comma) {
            self.advance()?;
            let field = self.expect_field()?;
            self.push(field);
        }
        self.emit(Action::SetCompoundSelector);
        Ok(())
    }

    fn parse_source(&mut self) -> Result<(), ParseError> {
        if !self.eat_keyword(Keyword::From)? {
            return Ok(());
        }
        let (name, position) = self.expect_word("namespace")?;
        if !self.vocabulary.is_namespace(&name) {
            return Err(ParseError::InvalidNamespace { name, position });
        }
        self.emit(Action::SetNamespace(name));
        Ok(())
    }

    fn parse_where(&mut self) -> Result<(), ParseError> {
        if !self.eat_keyword(Keyword::Where)? {
            return Ok(());
        }
        self.parse_or()?;
        self.emit(Action::SetCriteria);
        Ok(())
    }

    fn parse_or(&mut self) -> Result<(), ParseError> {
        self.parse_and()?;

        while self.eat_keyword(Keyword::Or)? {
            self.push(BoolOp::Or.as_str());
            self.parse_and()?;
            self.emit(Action::AddCompoundCriteria);
        }
        Ok(())
    }

    fn parse_and(&mut self) -> Result<(), ParseError> {
        self.parse_unary()?;

        while self.eat_keyword(Keyword::And)? {
            self.push(BoolOp::And.as_str());
            self.parse_unary()?;
            self.emit(Action::AddCompoundCriteria);
        }
        Ok(())
    }

    fn parse_unary(&mut self) -> Result<(), ParseError> {
        if self.check_keyword(Keyword::Not) {
            self.enter()?;
            self.advance()?;
            self.parse_unary()?; // Right-associative
            self.leave();
            self.emit(Action::AddNegatedCriteria);
            return Ok(());
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<(), ParseError> {
        if self.check(&Token::LParen) {
            self.enter()?;
            self.advance()?;
            self.parse_or()?;
            self.expect(Token::RParen)?;
            self.leave();
            return Ok(());
        }

        let field = self.expect_field()?;
        self.push(field);

        let value_op = match &self.current_token {
            Token::Eq => Some(ValueOp::Equal),
            Token::NotEq => Some(ValueOp::NotEqual),
            _ => None,
        };
        if let Some(op) = value_op {
            self.advance()?;
            self.push(op.as_str());
            let value = self.expect_literal()?;
            self.push(value);
            self.emit(Action::AddValueCriteria);
            return Ok(());
        }

        let range_op = match &self.current_token {
            Token::Lt => Some(RangeOp::LessThan),
            Token::LtEq => Some(RangeOp::LessEqual),
            Token::Gt => Some(RangeOp::GreaterThan),
            Token::GtEq => Some(RangeOp::GreaterEqual),
            _ => None,
        };
        if let Some(op) = range_op {
            self.advance()?;
            self.push(op.as_str());
            // Integer conversion is the handler's job; any word is accepted here.
            let (value, _) = self.expect_word("integer")?;
            self.push(value);
            self.emit(Action::AddRangeCriteria);
            return Ok(());
        }

        if self.eat_keyword(Keyword::In)? {
            let value = self.expect_literal()?;
            self.push(value);
            self.emit(Action::AddIndexCriteria);
            return Ok(());
        }

        Err(self.unexpected(format!("comparison operator or {}", self.quoted(Keyword::In))))
    }

    fn parse_order(&mut self) -> Result<(), ParseError> {
        if !self.eat_keyword(Keyword::Order)? {
            return Ok(());
        }
        self.expect_keyword(Keyword::By)?;

        loop {
            let field = self.expect_field()?;
            self.push(field);
            self.emit(Action::AddOrderSelector);

            let dir = match self.current_keyword() {
                Some(Keyword::Asc) => Some(Direction::Ascending),
                Some(Keyword::Desc) => Some(Direction::Descending),
                _ => None,
            };
            if let Some(dir) = dir {
                self.advance()?;
                self.push(dir.as_str());
                self.emit(Action::SetOrderDirection);
            }

            if !self.check(&Token::Comma) {
                break;
            }
            self.advance()?;
        }

        self.emit(Action::SetOrder);
        Ok(())
    }

    fn parse_limit(&mut self) -> Result<(), ParseError> {
        if !self.eat_keyword(Keyword::Limit)? {
            return Ok(());
        }
        let (text, _) = self.expect_word("limit")?;
        self.emit(Action::SetLimit(text));
        Ok(())
    }
}
