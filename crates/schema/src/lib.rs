//! GraphQL schema model.
//!
//! A [`Schema`] is an immutable map from type name to type definition, with the
//! root operation types resolved. It is built once per run from the SDL files or
//! introspection results named by a project's graphql-config and then shared by
//! reference with everything that resolves field references against it.

mod error;
mod introspection;
mod loader;
mod schema;
mod sdl;

pub use error::{Result, SchemaError};
pub use introspection::parse_introspection;
pub use loader::{load_project_schema, resolve_schema_files};
pub use schema::{
    FieldDefinition, Schema, SchemaBuilder, TypeDefinition, TypeKind, TypeRef, BUILTIN_SCALARS,
};
pub use sdl::parse_sdl;
