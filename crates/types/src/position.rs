//! Position and range types for source locations.

/// Position in a source file (0-indexed).
///
/// - `line` is 0-indexed (first line is 0)
/// - `character` is the byte offset from the start of the line
///
/// Use [`Position::one_based_line`] when presenting a line to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: u32,
    /// Byte offset within the line (0-indexed)
    pub character: u32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Compute the position of a byte offset within `source`.
    ///
    /// Offsets past the end of `source` are clamped to the end.
    #[must_use]
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |idx| idx + 1);

        Self {
            line: line as u32,
            character: (offset - line_start) as u32,
        }
    }

    /// The line number as users see it (1-indexed).
    #[must_use]
    pub const fn one_based_line(&self) -> u32 {
        self.line + 1
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.character.cmp(&other.character),
            ord => ord,
        }
    }
}

/// Range in a source file.
///
/// A range represents a span of text from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Range {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Compute the range covering `start..end` byte offsets within `source`.
    #[must_use]
    pub fn from_offsets(source: &str, start: usize, end: usize) -> Self {
        Self {
            start: Position::from_offset(source, start),
            end: Position::from_offset(source, end),
        }
    }

    /// Returns `true` if this is a zero-width range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.line == self.end.line && self.start.character == self.end.character
    }

    /// Check if this range contains a position.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        position >= self.start && position < self.end
    }
}
