//! File-related types: [`Language`].

use std::path::Path;

/// Source language of a file (determines parsing strategy).
///
/// Host languages are parsed into a full syntax tree before tagged template
/// literals are collected from them, so `.ts` and `.tsx` are kept apart: a
/// TypeScript angle-bracket cast is only legal outside JSX.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Raw GraphQL files (.graphql, .gql, .graphqls)
    GraphQL,
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
    /// JavaScript with JSX (.js, .jsx, .mjs, .cjs)
    JavaScript,
}

impl Language {
    /// Detect language from a file path based on its extension.
    ///
    /// Returns `None` if the extension is not recognized as a GraphQL-related language.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        Self::from_extension(extension)
    }

    /// Detect language from a bare file extension (without the leading dot).
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "graphql" | "gql" | "graphqls" => Some(Self::GraphQL),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Check if this language requires extraction (vs. direct GraphQL parsing).
    #[must_use]
    pub const fn requires_extraction(&self) -> bool {
        !matches!(self, Self::GraphQL)
    }

    /// Check if this language is a TypeScript dialect.
    #[must_use]
    pub const fn is_typescript(&self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }
}
