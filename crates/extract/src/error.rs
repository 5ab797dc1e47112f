use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("Failed to parse {language:?} source at line {line}: {message}")]
    Parse {
        language: graphql_types::Language,
        line: u32,
        message: String,
    },
}
