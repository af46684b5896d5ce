//! Source location tracking for tokens and AST nodes.

use std::fmt;

/// Represents a span in the source code.
///
/// `start` and `end` are byte offsets. `line` and `column` locate the first
/// character of the span and are both 1-based; columns count characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Line of the first character.
    pub line: usize,
    /// Column of the first character.
    pub column: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merges two spans into one that covers both.
    ///
    /// The position of the merged span is the position of whichever span
    /// starts first.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let first = if self.start <= other.start {
            self
        } else {
            other
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self {
            start: first.start,
            end,
            line: first.line,
            column: first.column,
        }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::new(0, 0, 1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(5, 10, 2, 3);
        assert_eq!(span.start, 5);
        assert_eq!(span.end, 10);
        assert_eq!(span.line, 2);
        assert_eq!(span.column, 3);
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10, 1, 6);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(5, 5, 1, 6).is_empty());
    }

    #[test]
    fn test_span_merge_keeps_first_position() {
        let first = Span::new(5, 10, 1, 6);
        let second = Span::new(12, 15, 2, 1);
        let merged = second.merge(first);
        assert_eq!(merged.start, 5);
        assert_eq!(merged.end, 15);
        assert_eq!(merged.line, 1);
        assert_eq!(merged.column, 6);
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(0, 1, 3, 7).to_string(), "line 3, column 7");
    }

    #[test]
    fn test_default_span_is_origin() {
        let span = Span::default();
        assert_eq!((span.line, span.column), (1, 1));
    }
}
