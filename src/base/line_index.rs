//! Offset <-> line/column conversion.

use text_size::{TextRange, TextSize};

use super::position::{Position, Span};

/// Zero-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl From<LineCol> for Position {
    fn from(lc: LineCol) -> Self {
        Position::new(lc.line as usize, lc.col as usize)
    }
}

/// Precomputed line starts of one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column of a byte offset. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let col = offset - self.line_starts[line];
        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Byte offset of a line/column, or `None` when it lies outside the text.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = self
            .line_starts
            .get(line + 1)
            .map(|&next| next - TextSize::new(1))
            .unwrap_or(self.len);
        let offset = start + TextSize::new(line_col.col);
        (offset <= end).then_some(offset)
    }

    pub fn position_offset(&self, position: Position) -> Option<TextSize> {
        self.offset(LineCol {
            line: u32::try_from(position.line).ok()?,
            col: u32::try_from(position.column).ok()?,
        })
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(
            self.line_col(range.start()).into(),
            self.line_col(range.end()).into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        let index = LineIndex::new("ab\ncde\n\nf");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 1, col: 1 });
        assert_eq!(
            index.offset(LineCol { line: 1, col: 1 }),
            Some(TextSize::new(4))
        );
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(8)), LineCol { line: 3, col: 0 });
    }

    #[test]
    fn rejects_out_of_range() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.offset(LineCol { line: 0, col: 3 }), None);
        assert_eq!(index.offset(LineCol { line: 5, col: 0 }), None);
        assert_eq!(
            index.offset(LineCol { line: 1, col: 2 }),
            Some(TextSize::new(5))
        );
    }
}
