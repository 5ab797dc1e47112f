//! GraphQL project configuration.
//!
//! Discovers and loads [graphql-config](https://the-guild.dev/graphql/config)
//! files, including the legacy `.graphqlconfig` format, and selects the project
//! whose schema the finder resolves against.

mod config;
mod error;
mod loader;

pub use config::{
    GraphQLConfig, IntrospectionSchemaConfig, ProjectConfig, SchemaConfig, DEFAULT_PROJECT,
};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
