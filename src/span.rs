//! Byte ranges into parsed text.

use std::ops::Range;

/// Location in a parsed text
///
/// The offsets are zero-indexed byte offsets from the beginning of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span ends before it starts");
        Self { start, end }
    }

    /// Start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// End (exclusive) offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Len of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both
    pub(crate) fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The text under the span
    ///
    /// Empty if the span is out of bounds or splits a character.
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.range()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge() {
        let a = Span::new(2, 4);
        assert_eq!(a.merge(Span::new(7, 7)), Span::new(2, 7));
        assert_eq!(Span::new(5, 9).merge(a), Span::new(2, 9));
        assert_eq!(a.merge(Span::new(3, 3)), a);
    }

    #[test]
    fn slice() {
        let input = "5 µm^2";
        assert_eq!(Span::new(2, 5).slice(input), "µm");
        assert_eq!(Span::new(5, 7).slice(input), "^2");
        assert_eq!(Span::new(3, 5).slice(input), "");
        assert_eq!(Span::new(6, 20).slice(input), "");
    }
}
