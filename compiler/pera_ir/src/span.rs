//! Source location spans.

use std::fmt;

/// Byte range into the source text.
///
/// Spans exist for error reporting only; evaluation never looks at them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for synthetic tokens that have no source text.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create a span from a byte range, saturating offsets past `u32::MAX`.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    /// Empty span positioned at `offset`.
    #[inline]
    pub fn point(offset: usize) -> Self {
        Self::from_range(offset..offset)
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_range_keeps_offsets() {
        let span = Span::from_range(3..7);
        assert_eq!(span, Span::new(3, 7));
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());
    }

    #[test]
    fn point_is_empty() {
        assert!(Span::point(12).is_empty());
        assert_eq!(Span::point(12).to_string(), "12..12");
    }
}
