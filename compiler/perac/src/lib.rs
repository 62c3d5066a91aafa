//! Pera driver.
//!
//! Glues the pipeline together (lex, parse, evaluate, render) for the `pera`
//! binary and for embedders and tests:
//!
//! ```ignore
//! let handler = pera_eval::buffer_handler();
//! let output = perac::run_source("print + 1 2", handler.clone())?;
//! assert_eq!(handler.get_output(), "3\n");
//! ```

pub mod commands;

use std::sync::Once;

use pera_eval::{render, EvalError, EvalStats, InterpreterBuilder, SharedPrintHandler, Value};
use pera_parse::{parse_program, ParseError};

/// Environment variable holding the log filter, e.g. `PERA_LOG=pera_eval=trace`.
pub const LOG_ENV: &str = "PERA_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Reads the filter from `PERA_LOG`, falling back to `RUST_LOG`. With neither
/// set nothing is installed. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let filter = if let Ok(directives) = std::env::var(LOG_ENV) {
            EnvFilter::new(directives)
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true),
            )
            .with(filter)
            .init();
    });
}

/// Any failure of a run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Result of a successful run.
#[derive(Debug)]
pub struct RunOutput {
    /// Value of the last top-level form.
    pub value: Value,
    /// `value` rendered for display.
    pub rendered: String,
    pub stats: EvalStats,
}

/// Parse and evaluate `source` in a fresh top-level environment, sending
/// `print` output to `handler`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn run_source(source: &str, handler: SharedPrintHandler) -> Result<RunOutput, RunError> {
    let program = parse_program(source)?;
    let mut interpreter = InterpreterBuilder::new().print_handler(handler).build();
    let value = interpreter.run(&program)?;
    Ok(RunOutput {
        rendered: render(&value),
        value,
        stats: interpreter.stats(),
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
