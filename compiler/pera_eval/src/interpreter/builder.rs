//! `InterpreterBuilder` for creating configured interpreters.

use super::{EvalStats, Interpreter};
use crate::{stdout_handler, Environment, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: an empty top-level environment and stdout printing.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    print_handler: Option<SharedPrintHandler>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level environment. Bindings already in it are visible to
    /// the program, and the program's definitions land in it.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Set where `print` output goes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: self.env.unwrap_or_default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            depth: 0,
            stats: EvalStats::default(),
        }
    }
}
