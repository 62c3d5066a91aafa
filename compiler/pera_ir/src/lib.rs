//! Pera IR - shared representation types.
//!
//! This crate contains the data structures every stage of the Pera pipeline
//! agrees on:
//! - `Span` for byte offsets into the source
//! - `Token` and `TokenList` for lexer output
//! - `Form`, the parsed program tree
//! - `Builtin`, the static operator table (names, arities, tail set)
//! - `format_number`, the canonical textual form of a number
//!
//! Forms are immutable and reference counted, so the evaluator can hand a
//! sub-tree around (a function body, an `if` branch) without copying it.

mod builtin;
mod form;
mod number;
mod span;
mod token;

pub use builtin::{Arity, Builtin};
pub use form::{Call, Form, Symbol};
pub use number::format_number;
pub use span::Span;
pub use token::{Token, TokenList};
