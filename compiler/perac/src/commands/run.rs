//! The `run` and `eval` commands.

use pera_eval::stdout_handler;

use super::{fail, read_file};
use crate::run_source;

/// Run a source file and print its result.
///
/// With `stats`, the evaluator counters are reported on stderr afterwards.
pub fn run_file(path: &str, stats: bool) {
    let source = read_file(path);
    eval_source(&source, stats);
}

/// Evaluate source text and print its result.
pub fn eval_source(source: &str, stats: bool) {
    match run_source(source, stdout_handler()) {
        Ok(output) => {
            println!("{}", output.rendered);
            if stats {
                let stats = output.stats;
                eprintln!(
                    "steps: {}, calls: {}, max depth: {}",
                    stats.steps, stats.calls, stats.max_depth
                );
            }
        }
        Err(err) => fail(&err),
    }
}
