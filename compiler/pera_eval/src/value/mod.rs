//! Runtime values.

mod table;

pub use table::{Key, Table, TableRef};

use std::fmt;
use std::rc::Rc;

use pera_ir::{Form, Symbol};

use crate::Environment;

/// A runtime value.
///
/// Tables and functions are handles: cloning a `Value` aliases them.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    /// A name used as data, such as a table key written as a bare word.
    Str(Rc<str>),
    Table(TableRef),
    Function(Rc<FunctionValue>),
}

/// A user function defined with `on`.
pub struct FunctionValue {
    /// The name the function was defined under.
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: Form,
    /// Private copy of the defining environment. Every call merges the
    /// caller's bindings into it and evaluates the body inside it, so state
    /// accumulates here across calls.
    pub closure: Environment,
}

impl Value {
    pub fn str(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    /// Wrap a table in a fresh handle.
    pub fn table(table: Table) -> Self {
        Value::Table(TableRef::new(table))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::Function(_) => "function",
        }
    }

    /// `nil`, `false`, `0`, `NaN` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Table(_) | Value::Function(_) => true,
        }
    }

    /// Numeric view used by arithmetic and comparison: booleans count as
    /// `0`/`1`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableRef> {
        match self {
            Value::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Rc<FunctionValue>> {
        match self {
            Value::Function(func) => Some(func),
            _ => None,
        }
    }
}

/// Structural for scalars, identity for tables and functions.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(func).finish(),
        }
    }
}

// The closure may contain the function itself.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::render(self))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
mod tests;
