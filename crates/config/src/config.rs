use crate::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name given to the only project of a single-project config.
pub const DEFAULT_PROJECT: &str = "default";

/// Top-level GraphQL configuration.
/// Either a single project or multiple named projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GraphQLConfig {
    /// Multi-project configuration
    Multi {
        projects: HashMap<String, ProjectConfig>,
    },
    /// Single project configuration (boxed to reduce enum size)
    Single(Box<ProjectConfig>),
}

impl GraphQLConfig {
    /// Get all projects as an iterator.
    /// For single project configs, yields a single item with name "default".
    #[must_use]
    pub fn projects(&self) -> Box<dyn Iterator<Item = (&str, &ProjectConfig)> + '_> {
        match self {
            Self::Single(config) => Box::new(std::iter::once((DEFAULT_PROJECT, config.as_ref()))),
            Self::Multi { projects, .. } => Box::new(
                projects
                    .iter()
                    .map(|(name, config)| (name.as_str(), config)),
            ),
        }
    }

    /// Project names in sorted order, for diagnostics.
    #[must_use]
    pub fn project_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.projects().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }

    /// Get a specific project by name.
    /// For single project configs, returns the project if name is "default".
    #[must_use]
    pub fn get_project(&self, name: &str) -> Option<&ProjectConfig> {
        match self {
            Self::Single(config) if name == DEFAULT_PROJECT => Some(config.as_ref()),
            Self::Single(_) => None,
            Self::Multi { projects, .. } => projects.get(name),
        }
    }

    /// Select the project to work with.
    ///
    /// With an explicit name, that project must exist. Without one, single-project
    /// configs yield their only project and multi-project configs fall back to a
    /// project named "default" if there is one.
    pub fn select_project(&self, name: Option<&str>) -> Result<(&str, &ProjectConfig)> {
        match (self, name) {
            (Self::Single(config), None) => Ok((DEFAULT_PROJECT, config.as_ref())),
            (Self::Multi { projects }, None) => projects
                .get_key_value(DEFAULT_PROJECT)
                .map(|(name, config)| (name.as_str(), config))
                .ok_or_else(|| ConfigError::ProjectRequired {
                    available: self.project_names(),
                }),
            (_, Some(requested)) => self
                .projects()
                .find(|(candidate, _)| *candidate == requested)
                .ok_or_else(|| ConfigError::ProjectNotFound {
                    name: requested.to_string(),
                    available: self.project_names(),
                }),
        }
    }

    /// Check if this is a multi-project configuration
    #[must_use]
    pub const fn is_multi_project(&self) -> bool {
        matches!(self, Self::Multi { .. })
    }

    /// Get the number of projects
    #[must_use]
    pub fn project_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi { projects } => projects.len(),
        }
    }
}

/// Configuration for a single GraphQL project
///
/// Accepts both current graphql-config keys and the legacy `.graphqlconfig`
/// spellings (`schemaPath`, `includes`, `excludes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Schema source(s)
    #[serde(alias = "schemaPath")]
    pub schema: SchemaConfig,

    /// File patterns to include
    #[serde(alias = "includes", skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,

    /// File patterns to exclude
    #[serde(alias = "excludes", skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Tool-specific extensions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<HashMap<String, serde_json::Value>>,
}

impl ProjectConfig {
    /// Get the extraction configuration from extensions.
    ///
    /// ```yaml
    /// extensions:
    ///   extractConfig:
    ///     tagIdentifiers: ["gql", "graphql"]
    ///     interpolation: skip
    /// ```
    #[must_use]
    pub fn extract_config(&self) -> Option<&serde_json::Value> {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.get("extractConfig"))
    }
}

/// Schema source configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    /// Single file path or glob pattern
    Path(String),
    /// Multiple file paths or glob patterns
    Paths(Vec<String>),
    /// Introspection configuration for remote schemas
    Introspection(IntrospectionSchemaConfig),
}

/// Configuration for introspecting a remote GraphQL endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchemaConfig {
    /// The GraphQL endpoint URL to introspect
    pub url: String,

    /// HTTP headers to include in the introspection request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
}

impl SchemaConfig {
    /// Get all schema paths/patterns
    /// For introspection configs, returns an empty vec
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Path(path) => vec![path.as_str()],
            Self::Paths(paths) => paths.iter().map(String::as_str).collect(),
            Self::Introspection(_) => vec![],
        }
    }

    /// Check if this schema config contains URLs (HTTP/HTTPS) or is an introspection config
    #[must_use]
    pub fn has_remote_schema(&self) -> bool {
        match self {
            Self::Introspection(_) => true,
            _ => self
                .paths()
                .iter()
                .any(|p| p.starts_with("http://") || p.starts_with("https://")),
        }
    }

    /// Check if this is an introspection configuration
    #[must_use]
    pub const fn is_introspection(&self) -> bool {
        matches!(self, Self::Introspection(_))
    }
}
