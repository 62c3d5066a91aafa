//! Source-like rendering of values.

use std::cell::RefCell;

use rustc_hash::FxHashSet;

use pera_ir::format_number;
use pera_stack::ensure_sufficient_stack;

use crate::value::{FunctionValue, Table, TableRef};
use crate::Value;

/// Render a value the way `print` shows it.
pub fn render(value: &Value) -> String {
    let mut printer = Printer::default();
    printer.value(value);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    /// Tables currently being rendered, to cut cycles.
    open: FxHashSet<*const RefCell<Table>>,
}

impl Printer {
    fn value(&mut self, value: &Value) {
        match value {
            Value::Nil => self.out.push_str("nil"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.out.push_str(&format_number(*n)),
            Value::Str(s) => self.out.push_str(s),
            Value::Table(table) => ensure_sufficient_stack(|| self.table(table)),
            Value::Function(func) => self.function(func),
        }
    }

    fn table(&mut self, table: &TableRef) {
        if !self.open.insert(table.as_ptr()) {
            self.out.push_str("( table ... )");
            return;
        }
        self.out.push_str("( table");
        for (name, value) in table.borrow().iter() {
            if let Some(name) = name {
                self.out.push_str(" : ");
                self.out.push_str(name);
            }
            self.out.push(' ');
            self.value(value);
        }
        self.out.push_str(" )");
        self.open.remove(&table.as_ptr());
    }

    fn function(&mut self, func: &FunctionValue) {
        self.out.push_str("( on ( ");
        self.out.push_str(&func.name);
        for param in &func.params {
            self.out.push(' ');
            self.out.push_str(param);
        }
        self.out.push_str(" ) ");
        self.out.push_str(&func.body.to_string());
        self.out.push_str(" )");
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
