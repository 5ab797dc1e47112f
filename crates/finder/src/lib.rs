//! Find the GraphQL queries in a codebase that select a given schema field.
//!
//! A run validates a `Type.field` target against the project schema, lists
//! candidate TypeScript/JavaScript files, extracts their `gql` tagged
//! templates and resolves every field selection in them to the type that
//! declares it. Each selection of the target becomes a [`UsageRecord`].
//!
//! ```no_run
//! use graphql_field_finder::{FieldFinder, FinderOptions, OutputFormat};
//! use std::path::Path;
//!
//! let finder = FieldFinder::from_config(Path::new("."), &FinderOptions::default())?;
//! for record in finder.run(Some("User.email"))? {
//!     println!("{}", record.display(OutputFormat::Line));
//! }
//! # Ok::<(), graphql_field_finder::FinderError>(())
//! ```

mod error;
mod finder;
mod literal;
mod locator;
mod resolver;
mod target;
mod usage;

pub use error::{ConfigurationError, FinderError, Result, ValidationError};
pub use finder::{FieldFinder, FinderOptions};
pub use literal::{extract_literals, QueryLiteral};
pub use locator::{find_candidate_files, CandidateFilter, DEFAULT_EXTENSIONS};
pub use resolver::{resolve, TypeContext};
pub use target::TargetSpecifier;
pub use usage::{render, DisplayUsage, OutputFormat, UsageRecord, ANONYMOUS_OPERATION};

// Re-exported so callers can build a finder without depending on the lower crates
pub use graphql_extract::{ExtractConfig, InterpolationPolicy};
pub use graphql_schema::Schema;
