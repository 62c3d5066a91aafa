//! Command handlers for the `pera` CLI.
//!
//! Handlers report failures on stderr and exit with status 1; they never
//! return an error to `main`.

mod debug;
mod run;

pub use debug::{lex_file, parse_file};
pub use run::{eval_source, run_file};

/// Read a source file, exiting with a message if it cannot be read.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Print an error and exit.
pub(crate) fn fail(err: &dyn std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
