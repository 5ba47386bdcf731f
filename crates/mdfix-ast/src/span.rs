//! Source spans and line/column lookup.

use std::ops::Range;

/// Byte range of a node in the source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Zero-based line and column of a source offset.
///
/// The column counts characters, not bytes, from the start of the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// Precomputed line start offsets of a source text.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub(crate) fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { line_starts }
    }

    /// Resolve an offset against `source`. Offsets past the end clamp to it.
    pub(crate) fn line_column(&self, source: &str, offset: usize) -> LineColumn {
        let offset = offset.min(source.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        LineColumn { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(2, 8);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_span_from_range() {
        assert_eq!(Span::from(1..4), Span::new(1, 4));
    }

    #[test]
    fn test_line_column_first_line() {
        let source = "> [!TIP]\n> text";
        let index = LineIndex::new(source);
        assert_eq!(
            index.line_column(source, 2),
            LineColumn { line: 0, column: 2 }
        );
    }

    #[test]
    fn test_line_column_later_line() {
        let source = "a\nbc\n   > [!NOTE]";
        let index = LineIndex::new(source);
        assert_eq!(
            index.line_column(source, 10),
            LineColumn { line: 2, column: 5 }
        );
        assert_eq!(
            index.line_column(source, 2),
            LineColumn { line: 1, column: 0 }
        );
    }

    #[test]
    fn test_line_column_counts_chars() {
        let source = "héllo";
        let index = LineIndex::new(source);
        assert_eq!(index.line_column(source, 3).column, 2);
    }

    #[test]
    fn test_line_column_clamps() {
        let source = "ab";
        let index = LineIndex::new(source);
        assert_eq!(
            index.line_column(source, 99),
            LineColumn { line: 0, column: 2 }
        );
    }
}
