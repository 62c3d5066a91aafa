//! Evaluator for Pera.
//!
//! Takes the [`Form`](pera_ir::Form) tree produced by `pera_parse` and runs
//! it on a trampoline. The pieces:
//!
//! - [`Value`], [`Table`] and [`FunctionValue`]: the runtime data model;
//! - [`Environment`]: flat shared scopes with the cumulative closure merge;
//! - [`Interpreter`]: the trampoline and the builtin library;
//! - [`render`]: the printer used by `print` and by hosts;
//! - print handlers: where `print` output goes.

mod environment;
mod errors;
mod interpreter;
mod operators;
mod print_handler;
mod printer;
mod shared;
mod value;

pub use environment::{Environment, Scope};
pub use errors::{
    field_outside_table, malformed_definition, not_callable, operand_count, type_mismatch,
    EvalError, EvalResult,
};
pub use interpreter::{EvalStats, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_not, BinaryOp};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use printer::render;
pub use shared::Shared;
pub use value::{FunctionValue, Key, Table, TableRef, Value};
