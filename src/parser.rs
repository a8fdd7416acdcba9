use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, Span};
use crate::lexer::{Lexer, Token, TokenType};
use std::mem;

/// Deepest tree (and deepest paren nesting) the parser will build. Folding
/// and dropping a tree both recurse once per level.
pub const MAX_DEPTH: usize = 256;

/// Recursive-descent parser over a lazy token stream.
///
/// ```text
/// expr   := term (("+"|"-") term)*
/// term   := factor (("*"|"/") factor)*
/// factor := INTEGER | "(" expr ")"
/// ```
///
/// The parser keeps exactly one lookahead token. After every rule returns,
/// `current` is the first token that rule did not consume, and `height` is
/// the height of the tree it returned.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    previous_end: usize,
    height: usize,
    paren_depth: usize,
}

impl Parser {
    /// Primes the lookahead, so an invalid first character already fails here.
    pub fn new(mut lexer: Lexer) -> Result<Self, CalcError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            previous_end: 0,
            height: 0,
            paren_depth: 0,
        })
    }

    /// Parses one expression and requires the input to end right after it.
    pub fn parse(&mut self) -> Result<Expr, CalcError> {
        let expr = self.expression()?;

        if !self.is_at_end() {
            let help = if self.check(TokenType::RightParen) {
                "Found ')' without matching '('. Check for unbalanced parentheses."
            } else {
                "An expression was already complete here; remove the extra input or join it with an operator."
            };
            return Err(CalcError::parse_error_with_help(
                self.current.span,
                format!("Unexpected '{}' after expression", self.current.lexeme),
                help.to_string(),
            ));
        }

        Ok(expr)
    }

    /// `expr := term (("+"|"-") term)*`
    ///
    /// Leaves any trailing tokens unconsumed; use [`Parser::parse`] to reject them.
    pub fn expression(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.term()?;
        let mut height = self.height;

        while self.check(TokenType::Plus) || self.check(TokenType::Minus) {
            let operator_token = self.advance()?;
            let operator = match operator_token.token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => unreachable!(),
            };

            self.expect_operand(
                &operator_token,
                "Arithmetic operators like '+' and '-' require expressions on both sides.",
            )?;
            let right = self.term()?;
            height = self.grow(height, &operator_token)?;
            expr = Self::binary(expr, operator, right);
        }

        self.height = height;
        Ok(expr)
    }

    /// `term := factor (("*"|"/") factor)*`
    fn term(&mut self) -> Result<Expr, CalcError> {
        let mut expr = self.factor()?;
        let mut height = self.height;

        while self.check(TokenType::Star) || self.check(TokenType::Slash) {
            let operator_token = self.advance()?;
            let operator = match operator_token.token_type {
                TokenType::Star => BinaryOp::Multiply,
                TokenType::Slash => BinaryOp::Divide,
                _ => unreachable!(),
            };

            self.expect_operand(
                &operator_token,
                "Multiplication and division operators require expressions on both sides.",
            )?;
            let right = self.factor()?;
            height = self.grow(height, &operator_token)?;
            expr = Self::binary(expr, operator, right);
        }

        self.height = height;
        Ok(expr)
    }

    /// `factor := INTEGER | "(" expr ")"`
    fn factor(&mut self) -> Result<Expr, CalcError> {
        match self.current.token_type {
            TokenType::Integer => {
                let token = self.consume(TokenType::Integer, "Expected integer")?;
                let value = token.value.ok_or_else(|| {
                    CalcError::parse_error(token.span, "Invalid integer".to_string())
                })?;
                self.height = 1;
                Ok(Expr::Number {
                    value,
                    span: token.span,
                })
            }
            TokenType::LeftParen => {
                let open = self.consume(TokenType::LeftParen, "Expected '('")?;
                if self.paren_depth >= MAX_DEPTH {
                    return Err(Self::too_deep(open.span));
                }

                if self.check(TokenType::RightParen) {
                    return Err(CalcError::parse_error_with_help(
                        open.span.to(&self.current.span),
                        "Empty parentheses are not allowed".to_string(),
                        "Parentheses must contain an expression. Example: (1 + 2)".to_string(),
                    ));
                }

                self.paren_depth += 1;
                let expr = self.expression()?;
                self.paren_depth -= 1;
                let close = self.consume_with_help(
                    TokenType::RightParen,
                    "Expected ')' after expression",
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'."
                        .to_string(),
                )?;

                // Grouping only affects shape; widen the span to cover the parens.
                Ok(match expr {
                    Expr::Number { value, .. } => Expr::Number {
                        value,
                        span: open.span.to(&close.span),
                    },
                    Expr::Binary {
                        left,
                        operator,
                        right,
                        ..
                    } => Expr::Binary {
                        left,
                        operator,
                        right,
                        span: open.span.to(&close.span),
                    },
                })
            }
            TokenType::Eof => Err(CalcError::parse_error_with_help(
                self.current.span,
                "Unexpected end of input".to_string(),
                "Expected a number or a parenthesized expression here.".to_string(),
            )),
            _ => {
                let help_msg = match self.current.token_type {
                    TokenType::RightParen => {
                        "Found ')' without matching '('. Check for unbalanced parentheses."
                    }
                    _ => "Expected a number or a parenthesized expression here.",
                };

                Err(CalcError::parse_error_with_help(
                    self.current.span,
                    format!("Expected expression, found '{}'", self.current.lexeme),
                    help_msg.to_string(),
                ))
            }
        }
    }

    fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
        let span = left.span().to(right.span());
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    /// Height of a new binary node over a left operand of `left_height` and the
    /// right operand just parsed.
    fn grow(&self, left_height: usize, operator_token: &Token) -> Result<usize, CalcError> {
        let height = left_height.max(self.height) + 1;
        if height > MAX_DEPTH {
            return Err(Self::too_deep(operator_token.span));
        }
        Ok(height)
    }

    fn too_deep(span: Span) -> CalcError {
        CalcError::parse_error_with_help(
            span,
            "Expression nested too deeply".to_string(),
            format!(
                "Expressions may be at most {} levels deep; split long chains or nested parentheses.",
                MAX_DEPTH
            ),
        )
    }

    /// Reports a missing right operand against the operator, not the token after it.
    fn expect_operand(&self, operator_token: &Token, help: &str) -> Result<(), CalcError> {
        if self.check(TokenType::Integer) || self.check(TokenType::LeftParen) {
            return Ok(());
        }

        Err(CalcError::parse_error_with_help(
            operator_token.span,
            format!("Expected expression after '{}'", operator_token.lexeme),
            help.to_string(),
        ))
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenType::Eof)
    }

    /// Swaps in the next token from the lexer and hands back the old lookahead.
    fn advance(&mut self) -> Result<Token, CalcError> {
        let next = self.lexer.next_token()?;
        let previous = mem::replace(&mut self.current, next);
        self.previous_end = previous.span.end;
        Ok(previous)
    }

    fn consume(&mut self, token_type: TokenType, message: &str) -> Result<Token, CalcError> {
        if self.check(token_type) {
            self.advance()
        } else {
            Err(CalcError::parse_error(self.error_span(), message.to_string()))
        }
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        message: &str,
        help: String,
    ) -> Result<Token, CalcError> {
        if self.check(token_type) {
            self.advance()
        } else {
            Err(CalcError::parse_error_with_help(
                self.error_span(),
                message.to_string(),
                help,
            ))
        }
    }

    fn error_span(&self) -> Span {
        if self.is_at_end() {
            // At EOF, point just past the last consumed token
            Span::single(self.previous_end)
        } else {
            self.current.span
        }
    }
}
