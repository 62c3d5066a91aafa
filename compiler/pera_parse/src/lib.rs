//! Recursive descent parser for Pera.
//!
//! The grammar is driven entirely by the static arity table in
//! [`pera_ir::Builtin`]:
//!
//! - `nil` is the nil literal;
//! - `(` scans forms up to the matching `)`. A group holding exactly one
//!   operator call unwraps to that call, so `(+ 1 2)` and `+ 1 2` are the
//!   same form. A group led by a name becomes a call to that name; any other
//!   group stays a bare [`Form::Group`];
//! - an arity-table operator reads exactly that many operand forms;
//! - anything else is a number if it parses as one, otherwise a name.
//!
//! Programs are lexed with the implicit `(do ...)` wrapper, so the result of
//! [`parse_program`] is always a single `do` call.

mod cursor;
mod error;

pub use cursor::Cursor;
pub use error::ParseError;

use pera_ir::{Builtin, Call, Form, Span, TokenList};
use pera_stack::ensure_sufficient_stack;
use std::rc::Rc;
use tracing::debug;

/// Lex and parse a program.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_program(source: &str) -> Result<Form, ParseError> {
    let tokens = pera_lexer::lex(source);
    parse(&tokens)
}

/// Parse a token stream into exactly one form.
///
/// Trailing tokens after that form are an error.
pub fn parse(tokens: &TokenList<'_>) -> Result<Form, ParseError> {
    let mut parser = Parser::new(tokens);
    let form = parser.parse_form()?;
    if let Some(token) = parser.cursor.current() {
        return Err(ParseError::TrailingInput {
            text: token.text.to_owned(),
            span: token.span,
        });
    }
    debug!(tokens = tokens.len(), "parsed program");
    Ok(form)
}

/// Parser state.
pub struct Parser<'a, 'src> {
    cursor: Cursor<'a, 'src>,
}

impl<'a, 'src> Parser<'a, 'src> {
    pub fn new(tokens: &'a TokenList<'src>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// Parse one form starting at the current token.
    pub fn parse_form(&mut self) -> Result<Form, ParseError> {
        ensure_sufficient_stack(|| self.parse_form_inner())
    }

    fn parse_form_inner(&mut self) -> Result<Form, ParseError> {
        let span = self.cursor.current_span();
        let Some(token) = self.cursor.advance() else {
            return Err(ParseError::UnexpectedEof { span });
        };

        match token.text {
            "nil" => Ok(Form::Nil),
            "(" => self.parse_group(token.span),
            ")" => Err(ParseError::UnexpectedClose { span: token.span }),
            text => match Builtin::operator(text) {
                Some((builtin, arity)) => self.parse_operands(builtin, arity, token.span),
                None => Ok(literal(text)),
            },
        }
    }

    /// Scan forms until the `)` matching the already consumed `(`.
    fn parse_group(&mut self, open: Span) -> Result<Form, ParseError> {
        let mut items = Vec::new();
        loop {
            if self.cursor.is_at_end() {
                return Err(ParseError::UnclosedGroup { span: open });
            }
            if self.cursor.at_close() {
                self.cursor.advance();
                return Ok(group_form(items));
            }
            items.push(self.parse_form()?);
        }
    }

    /// Read exactly `arity` operand forms for `builtin`.
    fn parse_operands(
        &mut self,
        builtin: Builtin,
        arity: usize,
        span: Span,
    ) -> Result<Form, ParseError> {
        let mut args = Vec::with_capacity(arity);
        while args.len() < arity {
            if self.cursor.is_at_end() || self.cursor.at_close() {
                return Err(ParseError::ArityMismatch {
                    operator: builtin.name(),
                    expected: arity,
                    found: args.len(),
                    span,
                });
            }
            args.push(self.parse_form()?);
        }
        Ok(Form::call(builtin.name(), args))
    }
}

/// Build the form for a scanned group.
fn group_form(mut items: Vec<Form>) -> Form {
    let single_operator_call = items.len() == 1
        && items[0]
            .head()
            .is_some_and(|head| Builtin::operator(head).is_some());
    if single_operator_call {
        if let Some(call) = items.pop() {
            return call;
        }
    }

    if let Some(Form::Atom(head)) = items.first() {
        let head = head.clone();
        let args = items.split_off(1);
        return Form::Call(Rc::new(Call { head, args }));
    }
    Form::group(items)
}

/// A number if the token parses as one, otherwise a name.
fn literal(text: &str) -> Form {
    match parse_number(text) {
        Some(n) => Form::Number(n),
        None => Form::atom(text),
    }
}

/// Decimal literals only: `inf` and `nan` stay names.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }
    let starts_numeric = unsigned
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.');
    if !starts_numeric {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
