//! Extraction of GraphQL documents embedded in TypeScript/JavaScript.
//!
//! Each source file is parsed into a full ECMAScript/TypeScript syntax tree and
//! every tagged template literal whose tag is a configured identifier (`gql` by
//! default) is collected together with its location in the file.

mod error;
mod extractor;
mod source_location;

pub use error::{ExtractError, Result};
pub use extractor::{
    extract_from_file, extract_from_source, is_query_tag, ExtractConfig, ExtractedGraphQL,
    InterpolationPolicy,
};
pub use source_location::SourceLocation;

// Re-export types from graphql-types for convenience
pub use graphql_types::{Language, Position, Range};
