//! Line and column positions for diagnostics.
use std::fmt::Display;

/// A location in the source text.
///
/// Lines and columns are 1-based; the column counts characters, not bytes.
/// `offset` is the byte offset into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Position {
    pub const START: Position = Position {
        line: 1,
        column: 1,
        offset: 0,
    };
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Maps byte offsets in a source text to [`Position`]s.
///
/// Built once per parse; lookups binary search the table of line starts.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();

        Self {
            source,
            line_starts,
        }
    }

    /// Position of the byte at `offset`.
    ///
    /// Offsets past the end of the text resolve to the position just after
    /// the last character.
    pub fn position(&self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count() + 1;

        Position {
            line: line + 1,
            column,
            offset,
        }
    }
}
