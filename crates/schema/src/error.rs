use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("No schema files matched {}", .patterns.join(", "))]
    NoFiles { patterns: Vec<String> },

    #[error("Failed to parse schema {path}: {}", .messages.join("; "))]
    Syntax {
        path: PathBuf,
        messages: Vec<String>,
    },

    #[error("Failed to parse introspection result {path}: {message}")]
    Introspection { path: PathBuf, message: String },

    #[error("Remote schema '{0}' is not supported; save the schema to a local SDL or introspection JSON file")]
    Remote(String),
}
