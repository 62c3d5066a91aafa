//! Lexer for Pera.
//!
//! There is exactly one tokenizing rule: a token is either the longest run
//! of characters containing no whitespace and no parenthesis, or a single
//! parenthesis. No comments, no string literals, no escapes.
//!
//! [`lex`] additionally wraps the program in an implicit `(do ...)` group so
//! that a sequence of top-level statements parses as a single form.

use pera_ir::{Span, Token, TokenList};

/// Tokenize a program, wrapped as `(do <source>)`.
///
/// The synthetic `(` and `do` tokens sit at offset 0, the closing `)` at the
/// end of the source; all three have empty spans.
pub fn lex(source: &str) -> TokenList<'_> {
    let mut tokens = TokenList::with_capacity(source.len() / 2 + 3);
    tokens.push(Token::new("(", Span::DUMMY));
    tokens.push(Token::new("do", Span::DUMMY));
    Scanner::new(source).scan_into(&mut tokens);
    tokens.push(Token::new(")", Span::point(source.len())));
    tokens
}

/// Tokenize source text as-is, without the implicit wrapper.
pub fn lex_raw(source: &str) -> TokenList<'_> {
    let mut tokens = TokenList::with_capacity(source.len() / 2);
    Scanner::new(source).scan_into(&mut tokens);
    tokens
}

#[inline]
fn is_paren(c: char) -> bool {
    c == '(' || c == ')'
}

/// Single pass over the source, yielding borrowed token slices.
struct Scanner<'src> {
    source: &'src str,
    pos: usize,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str) -> Self {
        Scanner { source, pos: 0 }
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn scan_into(mut self, tokens: &mut TokenList<'src>) {
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn next_token(&mut self) -> Option<Token<'src>> {
        self.skip_whitespace();
        let start = self.pos;
        let first = self.current()?;
        self.pos += first.len_utf8();

        if !is_paren(first) {
            while let Some(c) = self.current() {
                if c.is_whitespace() || is_paren(c) {
                    break;
                }
                self.pos += c.len_utf8();
            }
        }

        Some(Token::new(
            &self.source[start..self.pos],
            Span::from_range(start..self.pos),
        ))
    }
}

#[cfg(test)]
mod tests;
