//! Binary and unary operator implementations.
//!
//! Operands arrive already evaluated. Dispatch is a plain match on
//! [`BinaryOp`]; the operator set is closed.

use std::rc::Rc;

use crate::errors::{type_mismatch, EvalResult};
use crate::{render, Value};

/// The eager two-operand builtins.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Lt,
    LtEq,
    And,
    Or,
}

impl BinaryOp {
    pub const fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Eq => "=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

/// Apply a binary operator.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are consumed straight from evaluation"
)]
pub fn evaluate_binary(op: BinaryOp, left: Value, right: Value) -> EvalResult {
    match op {
        BinaryOp::Add => add(&left, &right),
        BinaryOp::Sub => arithmetic(op, &left, &right, |a, b| a - b),
        BinaryOp::Mul => arithmetic(op, &left, &right, |a, b| a * b),
        // IEEE semantics: x / 0 is ±inf, 0 / 0 and x % 0 are NaN.
        BinaryOp::Div => arithmetic(op, &left, &right, |a, b| a / b),
        BinaryOp::Rem => arithmetic(op, &left, &right, |a, b| a % b),
        BinaryOp::Eq => Ok(Value::Bool(loose_eq(&left, &right))),
        BinaryOp::Lt => compare(op, &left, &right, |a, b| a < b, |a, b| a < b),
        BinaryOp::LtEq => compare(op, &left, &right, |a, b| a <= b, |a, b| a <= b),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

/// `not`.
pub fn evaluate_not(value: &Value) -> Value {
    Value::Bool(!value.is_truthy())
}

/// Numeric addition, or concatenation when either side is a string.
fn add(left: &Value, right: &Value) -> EvalResult {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        let mut text = render(left);
        text.push_str(&render(right));
        return Ok(Value::Str(Rc::from(text)));
    }
    arithmetic(BinaryOp::Add, left, right, |a, b| a + b)
}

#[inline]
fn arithmetic(op: BinaryOp, left: &Value, right: &Value, f: fn(f64, f64) -> f64) -> EvalResult {
    let a = number_operand(op, left)?;
    let b = number_operand(op, right)?;
    Ok(Value::Number(f(a, b)))
}

#[inline]
fn number_operand(op: BinaryOp, value: &Value) -> EvalResult<f64> {
    value
        .as_number()
        .ok_or_else(|| type_mismatch(op.name(), "number", value))
}

/// Numbers and booleans compare numerically, strings by content, `nil`
/// equals only `nil`, tables and functions by identity.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn compare(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    numbers: fn(f64, f64) -> bool,
    strings: fn(&str, &str) -> bool,
) -> EvalResult {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Ok(Value::Bool(strings(a, b)));
    }
    let a = left
        .as_number()
        .ok_or_else(|| type_mismatch(op.name(), "numbers or strings", left))?;
    let b = right
        .as_number()
        .ok_or_else(|| type_mismatch(op.name(), "numbers or strings", right))?;
    Ok(Value::Bool(numbers(a, b)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
