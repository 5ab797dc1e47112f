//! Process exit codes.
//!
//! Each failure class gets its own code so scripts can tell a bad target
//! apart from a broken repository.

use graphql_field_finder::{ConfigurationError, FinderError};

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The search completed, whether or not anything was found
    Success = 0,
    /// The `Type.field` argument is missing or not in the schema
    ValidationError = 1,
    /// Repository, config file or project selection problem
    ConfigError = 2,
    /// The project schema could not be loaded
    SchemaError = 3,
    /// A file could not be read or output could not be written
    IoError = 4,
    /// A source file or an embedded GraphQL document does not parse
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    /// The exit code for a failed run.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(err) = err.downcast_ref::<FinderError>() {
            return Self::for_finder_error(err);
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return Self::IoError;
        }
        Self::ConfigError
    }

    #[must_use]
    pub const fn for_finder_error(err: &FinderError) -> Self {
        match err {
            FinderError::Validation(_) => Self::ValidationError,
            FinderError::Configuration(ConfigurationError::Schema(_)) => Self::SchemaError,
            FinderError::Configuration(_) => Self::ConfigError,
            FinderError::HostParse { .. } | FinderError::QueryParse { .. } => Self::ParseError,
            FinderError::Io { .. } => Self::IoError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ValidationError => write!(f, "validation error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}
