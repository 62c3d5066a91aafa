//! Lexer output.

use std::fmt;
use std::ops::Index;

use crate::Span;

/// A single token: an opaque slice of the source plus where it came from.
///
/// Tokens carry no kind. Whether a token is a paren, an operator, a number
/// or a name is decided by the parser from its text alone.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    #[inline]
    pub const fn new(text: &'src str, span: Span) -> Self {
        Token { text, span }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.text == "("
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        self.text == ")"
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.text, self.span)
    }
}

/// Ordered token stream produced by the lexer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    /// Token texts in order, mostly useful for tests and debug output.
    pub fn texts(&self) -> Vec<&'src str> {
        self.tokens.iter().map(|token| token.text).collect()
    }
}

impl<'src> Index<usize> for TokenList<'src> {
    type Output = Token<'src>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a TokenList<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
