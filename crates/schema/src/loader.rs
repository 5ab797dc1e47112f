use crate::{parse_introspection, parse_sdl, Result, Schema, SchemaError};
use graphql_config::{ProjectConfig, SchemaConfig};
use std::path::{Path, PathBuf};

/// Expand a project's schema patterns into a sorted, de-duplicated file list.
///
/// Patterns are resolved relative to `base_dir` (the directory holding the
/// config file). Every pattern must match at least one file.
pub fn resolve_schema_files(project: &ProjectConfig, base_dir: &Path) -> Result<Vec<PathBuf>> {
    if project.schema.has_remote_schema() {
        let source = match &project.schema {
            SchemaConfig::Introspection(introspection) => introspection.url.clone(),
            other => other
                .paths()
                .into_iter()
                .find(|p| p.starts_with("http://") || p.starts_with("https://"))
                .unwrap_or_default()
                .to_string(),
        };
        return Err(SchemaError::Remote(source));
    }

    let mut files = Vec::new();
    for pattern in project.schema.paths() {
        let full_pattern = base_dir.join(pattern).display().to_string();
        let paths = glob::glob(&full_pattern).map_err(|e| SchemaError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let before = files.len();
        for entry in paths {
            let path = entry.map_err(|e| SchemaError::Io {
                path: e.path().to_path_buf(),
                source: std::io::Error::from(e),
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.len() == before {
            return Err(SchemaError::NoFiles {
                patterns: vec![pattern.to_string()],
            });
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Load and merge every schema source of a project.
///
/// `.json` files are read as introspection results; anything else as SDL.
#[tracing::instrument(skip(project), fields(base_dir = %base_dir.display()))]
pub fn load_project_schema(project: &ProjectConfig, base_dir: &Path) -> Result<Schema> {
    let files = resolve_schema_files(project, base_dir)?;
    let mut builder = Schema::builder();

    for path in &files {
        let source = std::fs::read_to_string(path).map_err(|e| SchemaError::Io {
            path: path.clone(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            parse_introspection(&mut builder, &source, path)?;
        } else {
            parse_sdl(&mut builder, &source, path)?;
        }
    }

    let schema = builder.build();
    tracing::info!(
        files = files.len(),
        types = schema.type_count(),
        "Schema loaded"
    );
    Ok(schema)
}
