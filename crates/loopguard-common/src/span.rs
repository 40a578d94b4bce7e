//! Byte-offset spans into a source file.

use serde::Serialize;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `other` lies strictly inside this span (no shared endpoint).
    #[must_use]
    pub const fn strictly_contains(&self, other: Span) -> bool {
        other.start > self.start && other.end < self.end
    }

    /// Slice the span out of `source`, or "" when it is out of bounds.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_contains() {
        let outer = Span::new(0, 10);
        assert!(outer.strictly_contains(Span::new(1, 9)));
        assert!(!outer.strictly_contains(Span::new(0, 9)));
        assert!(!outer.strictly_contains(Span::new(1, 10)));
    }

    #[test]
    fn test_text_out_of_bounds() {
        assert_eq!(Span::new(2, 5).text("abcdef"), "cde");
        assert_eq!(Span::new(4, 50).text("abc"), "");
    }
}
