use crate::error::Span;
use std::fmt;

/// Expression tree. Each `Binary` node owns its children outright, so a
/// tree has no sharing and is never mutated after the parser builds it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        value: i64,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Number { span, .. } => span,
            Expr::Binary { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let tag = match self {
            BinaryOp::Add => "Add",
            BinaryOp::Subtract => "Sub",
            BinaryOp::Multiply => "Mul",
            BinaryOp::Divide => "Div",
        };
        write!(f, "{}", tag)
    }
}
