use crate::{
    extract_literals, find_candidate_files, resolve, CandidateFilter, ConfigurationError, Result,
    TargetSpecifier, UsageRecord, DEFAULT_EXTENSIONS,
};
use graphql_config::{find_config, load_config};
use graphql_extract::ExtractConfig;
use graphql_schema::{load_project_schema, Schema};
use std::path::{Path, PathBuf};

/// How to find a repository's schema and which files to search.
#[derive(Debug, Clone, Default)]
pub struct FinderOptions {
    /// Config file to use instead of discovering one from the repository
    pub config_path: Option<PathBuf>,
    /// Project to select in a multi-project config
    pub project: Option<String>,
    /// Candidate file extensions; empty means [`DEFAULT_EXTENSIONS`]
    pub extensions: Vec<String>,
}

/// A repository paired with the schema its queries are resolved against.
///
/// The schema is loaded once and only read afterwards.
#[derive(Debug)]
pub struct FieldFinder {
    repository: PathBuf,
    schema: Schema,
    extract_config: ExtractConfig,
    filter: CandidateFilter,
}

impl FieldFinder {
    /// Build a finder from an already loaded schema.
    #[must_use]
    pub fn new(repository: &Path, schema: Schema, extract_config: ExtractConfig) -> Self {
        let filter = CandidateFilter::new(
            default_extensions(),
            extract_config.tag_identifiers.clone(),
        );
        Self {
            repository: repository.to_path_buf(),
            schema,
            extract_config,
            filter,
        }
    }

    /// Replace the candidate file filter.
    #[must_use]
    pub fn with_filter(mut self, filter: CandidateFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Load the repository's graphql-config, select a project and load its schema.
    #[tracing::instrument(skip(options), fields(repository = %repository.display()))]
    pub fn from_config(repository: &Path, options: &FinderOptions) -> Result<Self> {
        if !repository.is_dir() {
            return Err(ConfigurationError::RepositoryNotFound(repository.to_path_buf()).into());
        }

        let config_path = match &options.config_path {
            Some(path) => path.clone(),
            None => find_config(repository)?
                .ok_or_else(|| ConfigurationError::ConfigNotFound(repository.to_path_buf()))?,
        };
        tracing::debug!(config = %config_path.display(), "Using config file");

        let config = load_config(&config_path)?;
        let (project_name, project) = config.select_project(options.project.as_deref())?;
        tracing::info!(project = project_name, "Project selected");

        let base_dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(repository);
        let schema = load_project_schema(project, base_dir)?;

        let extract_config = match project.extract_config() {
            Some(value) => serde_json::from_value::<ExtractConfig>(value.clone()).map_err(|e| {
                ConfigurationError::InvalidExtractConfig {
                    path: config_path.clone(),
                    message: e.to_string(),
                }
            })?,
            None => ExtractConfig::default(),
        };
        tracing::debug!(
            tag_identifiers = ?extract_config.tag_identifiers,
            interpolation = ?extract_config.interpolation,
            "Extract configuration"
        );

        let extensions = if options.extensions.is_empty() {
            default_extensions()
        } else {
            options.extensions.clone()
        };
        let filter = CandidateFilter::new(extensions, extract_config.tag_identifiers.clone())
            .with_patterns(
                project.include.as_deref().unwrap_or_default(),
                project.exclude.as_deref().unwrap_or_default(),
            )?;

        Ok(Self::new(repository, schema, extract_config).with_filter(filter))
    }

    #[must_use]
    pub fn repository(&self) -> &Path {
        &self.repository
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate a raw `Type.field` argument against this finder's schema.
    pub fn validate_target(&self, raw: Option<&str>) -> Result<TargetSpecifier> {
        Ok(TargetSpecifier::validate(raw, &self.schema)?)
    }

    /// Validate `raw` and search the repository for it.
    ///
    /// Validation happens before any file is read.
    pub fn run(&self, raw: Option<&str>) -> Result<Vec<UsageRecord>> {
        let target = self.validate_target(raw)?;
        self.find(&target)
    }

    /// Every selection of `target` in the repository.
    ///
    /// Records are ordered by file path, then literal order within a file,
    /// then traversal order within a literal. The first failure aborts the
    /// search and no records are returned.
    #[tracing::instrument(skip(self), fields(target = %target))]
    pub fn find(&self, target: &TargetSpecifier) -> Result<Vec<UsageRecord>> {
        tracing::debug!(extensions = ?self.filter.extensions(), "Locating candidate files");
        let files = find_candidate_files(&self.repository, &self.filter)?;

        let mut records = Vec::new();
        let mut literal_count = 0;
        for file in &files {
            let literals = extract_literals(&self.repository, file, &self.extract_config)?;
            literal_count += literals.len();
            for literal in &literals {
                records.extend(resolve(literal, target, &self.schema)?);
            }
        }

        tracing::info!(
            files = files.len(),
            literals = literal_count,
            usages = records.len(),
            "Search complete"
        );
        Ok(records)
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}
