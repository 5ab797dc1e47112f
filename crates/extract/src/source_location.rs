//! Source location information for extracted GraphQL.

use graphql_types::Range;

/// Source location information for extracted GraphQL.
///
/// Contains both byte offsets (for text manipulation) and line/column
/// range (for display to users).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Byte offset in the original source file
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
    /// Range in the original source file (line/column)
    pub range: Range,
}

impl SourceLocation {
    /// Create a new source location.
    #[must_use]
    pub const fn new(offset: usize, length: usize, range: Range) -> Self {
        Self {
            offset,
            length,
            range,
        }
    }

    /// Compute the location of the byte span `offset..offset + length` in `source`.
    #[must_use]
    pub fn from_span(source: &str, offset: usize, length: usize) -> Self {
        Self::new(offset, length, Range::from_offsets(source, offset, offset + length))
    }

    /// The 1-based line on which the extracted text starts.
    #[must_use]
    pub const fn start_line(&self) -> u32 {
        self.range.start.one_based_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_span() {
        let source = "import gql from 'graphql-tag';\n\nconst q = gql`{ me }`;\n";
        let offset = source.find("{ me }").unwrap();
        let location = SourceLocation::from_span(source, offset, 6);

        assert_eq!(location.offset, offset);
        assert_eq!(location.length, 6);
        assert_eq!(location.start_line(), 3);
        assert_eq!(location.range.start.character, 14);
    }
}
