use crate::ast::{BinaryOp, Expr};
use crate::error::{CalcError, Span};
use crate::parser::Parser;
use crate::value::Value;

pub struct Evaluator {
    parser: Parser,
}

impl Evaluator {
    pub fn new(parser: Parser) -> Self {
        Self { parser }
    }

    /// Parses one complete expression from the wrapped parser and folds it.
    pub fn interpret(&mut self) -> Result<Value, CalcError> {
        let tree = self.parser.parse()?;
        self.evaluate_expression(&tree)
    }

    pub fn evaluate_expression(&self, expr: &Expr) -> Result<Value, CalcError> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Int(*value)),
            Expr::Binary {
                left,
                operator,
                right,
                span,
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                self.evaluate_binary_op(operator, left_val, right_val, span)
            }
        }
    }

    fn evaluate_binary_op(
        &self,
        operator: &BinaryOp,
        left: Value,
        right: Value,
        span: &Span,
    ) -> Result<Value, CalcError> {
        match operator {
            BinaryOp::Add => match (left, right) {
                (Value::Int(l), Value::Int(r)) => self.checked(l.checked_add(r), operator, span),
                (l, r) => Ok(Value::Double(l.as_f64() + r.as_f64())),
            },
            BinaryOp::Subtract => match (left, right) {
                (Value::Int(l), Value::Int(r)) => self.checked(l.checked_sub(r), operator, span),
                (l, r) => Ok(Value::Double(l.as_f64() - r.as_f64())),
            },
            BinaryOp::Multiply => match (left, right) {
                (Value::Int(l), Value::Int(r)) => self.checked(l.checked_mul(r), operator, span),
                (l, r) => Ok(Value::Double(l.as_f64() * r.as_f64())),
            },
            BinaryOp::Divide => {
                if right.is_zero() {
                    return Err(CalcError::division_by_zero(*span));
                }
                match (left, right) {
                    (Value::Int(l), Value::Int(r)) => Ok(Value::Double(divide_integers(l, r))),
                    (l, r) => Ok(Value::Double(l.as_f64() / r.as_f64())),
                }
            }
        }
    }

    fn checked(
        &self,
        result: Option<i64>,
        operator: &BinaryOp,
        span: &Span,
    ) -> Result<Value, CalcError> {
        result.map(Value::Int).ok_or_else(|| {
            CalcError::runtime_error(
                *span,
                format!("Integer overflow in '{}'", operator.symbol()),
            )
        })
    }
}

/// Integers with magnitude up to 2^53 convert to `f64` exactly.
const EXACT_F64_INT: u64 = 1 << 53;

/// True division of two integers, `r != 0`. Exact quotients stay exact even
/// when the operands themselves are too wide for `f64`.
fn divide_integers(l: i64, r: i64) -> f64 {
    // Only `i64::MIN / -1` overflows; its quotient 2^63 is an exact double.
    let (quotient, remainder) = match (l.checked_div(r), l.checked_rem(r)) {
        (Some(q), Some(rem)) => (q, rem),
        _ => return -(l as f64),
    };

    if remainder == 0 {
        quotient as f64
    } else if l.unsigned_abs() <= EXACT_F64_INT && r.unsigned_abs() <= EXACT_F64_INT {
        // Both operands are exact doubles, so IEEE division rounds correctly.
        l as f64 / r as f64
    } else {
        quotient as f64 + remainder as f64 / r as f64
    }
}
