use crate::{ConfigurationError, FinderError, Result};
use glob::{MatchOptions, Pattern};
use graphql_types::Language;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// File extensions searched when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Decides which files under a repository are worth extracting.
///
/// `include`/`exclude` patterns are matched against paths relative to the
/// repository root.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    extensions: Vec<String>,
    tag_identifiers: Vec<String>,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl CandidateFilter {
    #[must_use]
    pub fn new(extensions: Vec<String>, tag_identifiers: Vec<String>) -> Self {
        Self {
            extensions,
            tag_identifiers,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Restrict candidates to files matching any `include` pattern (when
    /// non-empty) and matching no `exclude` pattern.
    pub fn with_patterns(mut self, include: &[String], exclude: &[String]) -> Result<Self> {
        self.include = compile_patterns(include)?;
        self.exclude = compile_patterns(exclude)?;
        Ok(self)
    }

    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn accepts_path(&self, relative: &Path) -> bool {
        let extension_matches = relative
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext));
        if !extension_matches {
            return false;
        }

        if !self.include.is_empty()
            && !self
                .include
                .iter()
                .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
        {
            return false;
        }

        !self
            .exclude
            .iter()
            .any(|p| p.matches_path_with(relative, MATCH_OPTIONS))
    }

    fn accepts_contents(&self, contents: &str) -> bool {
        self.tag_identifiers
            .iter()
            .any(|tag| contents.contains(tag.as_str()))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|e| {
                FinderError::Configuration(ConfigurationError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

/// List files under `root` that may contain query literals.
///
/// The walk honours `.gitignore` and skips hidden entries. Host-language files
/// must also mention one of the tag identifiers somewhere in their text; this
/// is a plain substring check. Paths are returned relative to `root`, sorted
/// as byte strings.
#[tracing::instrument(skip(filter), fields(root = %root.display()))]
pub fn find_candidate_files(root: &Path, filter: &CandidateFilter) -> Result<Vec<PathBuf>> {
    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .require_git(false)
        .build();

    let mut candidates = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| walk_error(root, e))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !filter.accepts_path(relative) {
            continue;
        }

        let Some(language) = Language::from_path(path) else {
            tracing::debug!(path = %relative.display(), "Skipping file with unsupported extension");
            continue;
        };

        if language.requires_extraction() {
            let contents = std::fs::read_to_string(path).map_err(|source| FinderError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if !filter.accepts_contents(&contents) {
                continue;
            }
        }

        candidates.push(relative.to_path_buf());
    }

    // Whole-path byte order, so `a-b.ts` sorts before `a/b.ts`
    candidates.sort_by(|a, b| {
        a.as_os_str()
            .as_encoded_bytes()
            .cmp(b.as_os_str().as_encoded_bytes())
    });
    tracing::debug!(count = candidates.len(), "Candidate files found");
    Ok(candidates)
}

fn walk_error(root: &Path, err: ignore::Error) -> FinderError {
    let message = err.to_string();
    FinderError::Io {
        path: root.to_path_buf(),
        source: err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other(message)),
    }
}
