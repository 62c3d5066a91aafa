//! Token cursor.
//!
//! The parser consumes tokens strictly front to back; the only lookahead it
//! needs is a peek at the current token to detect the end of a group.

use pera_ir::{Span, Token, TokenList};
use tracing::trace;

/// Position in a token stream.
pub struct Cursor<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
    /// Empty span just past the last token, for end-of-input errors.
    end: Span,
}

impl<'a, 'src> Cursor<'a, 'src> {
    pub fn new(tokens: &'a TokenList<'src>) -> Self {
        let end = tokens
            .as_slice()
            .last()
            .map_or(Span::DUMMY, |token| Span::new(token.span.end, token.span.end));
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
            end,
        }
    }

    /// The token under the cursor, without consuming it.
    #[inline]
    pub fn current(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).copied()
    }

    /// Consume and return the current token.
    #[inline]
    pub fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.current()?;
        trace!(pos = self.pos, token = token.text, "advance");
        self.pos += 1;
        Some(token)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Whether the current token closes a group.
    #[inline]
    pub fn at_close(&self) -> bool {
        self.current().is_some_and(|token| token.is_close())
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Span of the current token, or the end-of-input span.
    pub fn current_span(&self) -> Span {
        self.current().map_or(self.end, |token| token.span)
    }
}
