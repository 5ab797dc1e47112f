use crate::{FinderError, Result};
use graphql_extract::{extract_from_file, ExtractConfig, ExtractError};
use std::path::{Path, PathBuf};

/// One GraphQL document embedded in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLiteral {
    /// Path as reported in output (relative to the repository root)
    pub path: PathBuf,
    /// 1-based line on which the literal starts
    pub line: u32,
    pub raw: String,
}

/// Extract every query literal from the file at `root.join(path)`.
///
/// A file that does not parse as its host language fails the whole run.
#[tracing::instrument(skip(root, config), fields(path = %path.display()))]
pub fn extract_literals(root: &Path, path: &Path, config: &ExtractConfig) -> Result<Vec<QueryLiteral>> {
    let extracted = extract_from_file(&root.join(path), config).map_err(|e| match e {
        ExtractError::Parse { line, message, .. } => FinderError::HostParse {
            path: path.to_path_buf(),
            line,
            message,
        },
        ExtractError::Io { path, source } => FinderError::Io { path, source },
        ExtractError::UnsupportedFileType(_) => FinderError::HostParse {
            path: path.to_path_buf(),
            line: 0,
            message: "unsupported file extension".to_string(),
        },
    })?;

    Ok(extracted
        .into_iter()
        .map(|graphql| QueryLiteral {
            path: path.to_path_buf(),
            line: graphql.location.start_line(),
            raw: graphql.source,
        })
        .collect())
}
