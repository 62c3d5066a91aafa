//! Parse error types.
//!
//! Every parse error is fatal: the program is rejected as a whole and
//! nothing is evaluated.

use pera_ir::Span;

/// Reasons the token stream does not form a program.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input ran out (or a group closed) before an operator received
    /// all of its operands.
    #[error("`{operator}` expects {expected} operand{}, found {found} (at {span})", plural(.expected))]
    ArityMismatch {
        operator: &'static str,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// End of input inside a parenthesized group.
    #[error("unclosed `(` opened at {span}")]
    UnclosedGroup { span: Span },

    /// A `)` where a form was required.
    #[error("unexpected `)` at {span}")]
    UnexpectedClose { span: Span },

    /// No tokens at all where a form was required.
    #[error("unexpected end of input at {span}")]
    UnexpectedEof { span: Span },

    /// Tokens left over after the program form was complete, usually a
    /// stray `)` that closed the implicit top-level group early.
    #[error("unexpected `{text}` after the end of the program (at {span})")]
    TrailingInput { text: String, span: Span },
}

impl ParseError {
    /// Location of the offending token.
    pub fn span(&self) -> Span {
        match self {
            ParseError::ArityMismatch { span, .. }
            | ParseError::UnclosedGroup { span }
            | ParseError::UnexpectedClose { span }
            | ParseError::UnexpectedEof { span }
            | ParseError::TrailingInput { span, .. } => *span,
        }
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes fields by reference"
)]
fn plural(n: &usize) -> &'static str {
    if *n == 1 {
        ""
    } else {
        "s"
    }
}
