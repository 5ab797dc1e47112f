//! Extensions for `apollo-parser`: name extraction, type unwrapping and definition helpers.
//!
//! This crate provides:
//! - **Name extraction helpers** for getting names from CST nodes
//! - **Base type unwrapping** for `[Type!]!` style references
//! - **Definition iterators** for filtering document definitions
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::{DocumentExt, NameExt};
//!
//! let source = "query GetUser { user { id } } fragment UserFields on User { name }";
//! let tree = apollo_parser::Parser::new(source).parse();
//!
//! assert_eq!(tree.first_definition_name(), Some("GetUser".to_string()));
//! let fragment = tree.fragments().next().unwrap();
//! assert_eq!(fragment.name_text(), Some("UserFields".to_string()));
//! ```

mod definitions;
mod names;

pub use definitions::*;
pub use names::*;
