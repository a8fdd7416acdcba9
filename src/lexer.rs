use crate::error::{CalcError, Span};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Literals
    Integer,

    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,

    // Special
    Eof,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Integer => "INTEGER",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MUL",
            TokenType::Slash => "DIV",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::Eof => "EOF",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    /// Parsed literal, only present on `Integer` tokens.
    pub value: Option<i64>,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            value: None,
            span,
        }
    }

    pub fn integer(value: i64, lexeme: String, span: Span) -> Self {
        Self {
            token_type: TokenType::Integer,
            lexeme,
            value: Some(value),
            span,
        }
    }

    pub fn eof(pos: usize) -> Self {
        Self::new(TokenType::Eof, String::new(), Span::single(pos))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.token_type, self.value) {
            (TokenType::Eof, _) => write!(f, "Token({}, None)", self.token_type),
            (_, Some(value)) => write!(f, "Token({}, {})", self.token_type, value),
            (_, None) => write!(f, "Token({}, '{}')", self.token_type, self.lexeme),
        }
    }
}

/// Pull-based scanner: holds the source, a byte offset and the character
/// under it, and produces one token per `next_token` call.
pub struct Lexer {
    source: String,
    current: usize,
    current_char: Option<char>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        let current_char = source.chars().next();
        Self {
            source,
            current: 0,
            current_char,
            finished: false,
        }
    }

    /// Byte offset of the cursor. Always within `0..=source.len()`.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn next_token(&mut self) -> Result<Token, CalcError> {
        self.skip_whitespace();

        let start = self.current;
        let c = match self.current_char {
            Some(c) => c,
            None => return Ok(Token::eof(self.current)),
        };

        let token_type = match c {
            c if c.is_ascii_digit() => return self.integer(),
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            _ => {
                return Err(CalcError::lex_error(
                    Span::new(start, start + c.len_utf8()),
                    format!("Unexpected character: '{}'", c),
                ));
            }
        };

        self.advance();
        Ok(Token::new(
            token_type,
            c.to_string(),
            Span::new(start, self.current),
        ))
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char {
            self.current += c.len_utf8();
            self.current_char = self.source[self.current..].chars().next();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current_char, Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn integer(&mut self) -> Result<Token, CalcError> {
        let start = self.current;
        while matches!(self.current_char, Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let span = Span::new(start, self.current);
        let number_slice = &self.source[start..self.current];
        let value = number_slice.parse::<i64>().map_err(|_| {
            CalcError::lex_error(span, format!("Invalid integer: {}", number_slice))
        })?;

        Ok(Token::integer(value, number_slice.to_string(), span))
    }
}

/// Yields tokens up to and including the first `Eof`, or the first error.
impl Iterator for Lexer {
    type Item = Result<Token, CalcError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        match &result {
            Ok(token) if token.token_type != TokenType::Eof => {}
            _ => self.finished = true,
        }
        Some(result)
    }
}
