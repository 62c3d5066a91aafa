//! Runtime errors.
//!
//! Every runtime error is fatal: evaluation stops and the error propagates
//! to the host. Unbound names and missing table keys are not errors; they
//! read as `nil`.
//!
//! Construct errors through the factory functions below rather than the
//! variants, so call sites stay one line.

use crate::Value;

/// Result of evaluating a form.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// A fatal runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// An operator received a value of the wrong type.
    #[error("type mismatch in `{operation}`: expected {expected}, found {found}")]
    TypeMismatch {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A call whose head is neither a function nor a table received
    /// arguments.
    #[error("{type_name} is not callable")]
    NotCallable { type_name: &'static str },

    /// A definition or binding form with an unusable header.
    #[error("malformed `{operation}`: {reason}")]
    MalformedDefinition {
        operation: &'static str,
        reason: String,
    },

    /// A builtin call built with the wrong number of operands. The parser
    /// never produces one; forms assembled by hand can.
    #[error("`{operation}` expects {expected} operands, found {found}")]
    OperandCount {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    /// A `:` field marker evaluated anywhere but directly inside `table`.
    #[error("`:` field marker outside a table")]
    FieldOutsideTable,
}

/// `operation` expected `expected` but got `found`.
#[cold]
pub fn type_mismatch(operation: &'static str, expected: &'static str, found: &Value) -> EvalError {
    EvalError::TypeMismatch {
        operation,
        expected,
        found: found.type_name(),
    }
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::NotCallable {
        type_name: value.type_name(),
    }
}

#[cold]
pub fn malformed_definition(operation: &'static str, reason: impl Into<String>) -> EvalError {
    EvalError::MalformedDefinition {
        operation,
        reason: reason.into(),
    }
}

#[cold]
pub fn operand_count(operation: &'static str, expected: usize, found: usize) -> EvalError {
    EvalError::OperandCount {
        operation,
        expected,
        found,
    }
}

#[cold]
pub fn field_outside_table() -> EvalError {
    EvalError::FieldOutsideTable
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
