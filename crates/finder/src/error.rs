use graphql_config::ConfigError;
use graphql_schema::SchemaError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FinderError>;

/// Every way a run can fail. All of them abort the run before any output.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to parse {path} at line {line}: {message}")]
    HostParse {
        path: PathBuf,
        line: u32,
        message: String,
    },

    #[error("Invalid GraphQL in {path} (literal starting at line {line}): {message}\n{raw}")]
    QueryParse {
        path: PathBuf,
        line: u32,
        raw: String,
        message: String,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The repository, its config, or its schema could not be used.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Repository path {0} does not exist or is not a directory")]
    RepositoryNotFound(PathBuf),

    #[error("No GraphQL config file found in {0} or any parent directory")]
    ConfigNotFound(PathBuf),

    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Invalid extractConfig in {path}: {message}")]
    InvalidExtractConfig { path: PathBuf, message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<ConfigError> for FinderError {
    fn from(err: ConfigError) -> Self {
        Self::Configuration(err.into())
    }
}

impl From<SchemaError> for FinderError {
    fn from(err: SchemaError) -> Self {
        Self::Configuration(err.into())
    }
}

/// The `Type.field` argument does not name a field of the loaded schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing field argument: expected `Type.field`")]
    MissingArgument,

    #[error("Unknown type '{type_name}'{}", Suggestion(.suggestion))]
    UnknownType {
        type_name: String,
        suggestion: Option<String>,
    },

    #[error("Type '{type_name}' has no field '{field_name}'{}", Suggestion(.suggestion))]
    UnknownField {
        type_name: String,
        field_name: String,
        suggestion: Option<String>,
    },
}

struct Suggestion<'a>(&'a Option<String>);

impl fmt::Display for Suggestion<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(name) => write!(f, " (did you mean '{name}'?)"),
            None => Ok(()),
        }
    }
}
