use crate::{ExtractError, Result, SourceLocation};
use graphql_types::Language;
use serde::{Deserialize, Serialize};
use std::path::Path;
use swc_common::{sync::Lrc, BytePos, FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Expr, Module, TaggedTpl};
use swc_core::ecma::parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};
use swc_core::ecma::visit::{Visit, VisitWith};

/// What to do with a tagged template that contains `${...}` interpolations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationPolicy {
    /// Keep only the text before the first interpolation.
    ///
    /// Fragment interpolations conventionally trail the document
    /// (`gql\`query { ...F } ${F}\``), so the first segment is usually the
    /// complete operation.
    #[default]
    FirstSegment,
    /// Drop interpolated templates entirely.
    Skip,
}

/// Configuration for GraphQL extraction from TypeScript/JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractConfig {
    /// Identifiers that mark a tagged template as GraphQL (`gql` by default)
    pub tag_identifiers: Vec<String>,

    /// Handling of templates with `${...}` interpolations
    pub interpolation: InterpolationPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tag_identifiers: vec!["gql".to_string()],
            interpolation: InterpolationPolicy::default(),
        }
    }
}

/// A GraphQL document extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGraphQL {
    /// The raw GraphQL text (template escapes are left untouched)
    pub source: String,
    /// Where the text sits in the original file
    pub location: SourceLocation,
    /// The tag identifier the template was marked with, if any
    pub tag: Option<String>,
    /// Whether the template had `${...}` holes and was truncated to its first segment
    pub truncated: bool,
}

/// Returns `true` if `tag` is one of the configured GraphQL tag identifiers.
///
/// Only bare identifiers qualify: `gql\`...\`` matches, `client.gql\`...\`` does not.
#[must_use]
pub fn is_query_tag(tag: &Expr, config: &ExtractConfig) -> bool {
    match tag {
        Expr::Ident(ident) => config
            .tag_identifiers
            .iter()
            .any(|name| &*ident.sym == name.as_str()),
        _ => false,
    }
}

/// Read a file from disk and extract its GraphQL documents.
///
/// The language is detected from the file extension.
#[tracing::instrument(skip(config), fields(path = %path.display()))]
pub fn extract_from_file(path: &Path, config: &ExtractConfig) -> Result<Vec<ExtractedGraphQL>> {
    let language = Language::from_path(path)
        .ok_or_else(|| ExtractError::UnsupportedFileType(path.to_path_buf()))?;

    let source = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    extract_from_source(&source, language, config)
}

/// Extract GraphQL documents from source text.
///
/// Pure GraphQL sources are returned whole as a single document. Host-language
/// sources are parsed completely; any syntax error, including ones the parser
/// could recover from, fails the whole file.
#[tracing::instrument(skip(source, config), fields(len = source.len()))]
pub fn extract_from_source(
    source: &str,
    language: Language,
    config: &ExtractConfig,
) -> Result<Vec<ExtractedGraphQL>> {
    if !language.requires_extraction() {
        return Ok(vec![ExtractedGraphQL {
            source: source.to_string(),
            location: SourceLocation::from_span(source, 0, source.len()),
            tag: None,
            truncated: false,
        }]);
    }

    let (module, start_pos) = parse_module(source, language)?;

    let mut collector = TaggedTemplateCollector {
        config,
        start_pos,
        templates: Vec::new(),
    };
    module.visit_with(&mut collector);

    let mut extracted = Vec::with_capacity(collector.templates.len());
    for template in collector.templates {
        let location = SourceLocation::from_span(source, template.offset, template.raw.len());

        if template.interpolated {
            match config.interpolation {
                InterpolationPolicy::Skip => {
                    tracing::warn!(
                        line = location.start_line(),
                        "Skipping interpolated GraphQL template"
                    );
                    continue;
                }
                InterpolationPolicy::FirstSegment => {
                    tracing::debug!(
                        line = location.start_line(),
                        "Using first segment of interpolated GraphQL template"
                    );
                }
            }
        }

        extracted.push(ExtractedGraphQL {
            source: template.raw,
            location,
            tag: Some(template.tag),
            truncated: template.interpolated,
        });
    }

    tracing::debug!(count = extracted.len(), "Extracted GraphQL templates");
    Ok(extracted)
}

fn syntax_for(language: Language) -> Syntax {
    match language {
        Language::TypeScript | Language::Tsx => Syntax::Typescript(TsSyntax {
            tsx: matches!(language, Language::Tsx),
            decorators: true,
            ..Default::default()
        }),
        Language::JavaScript | Language::GraphQL => Syntax::Es(EsSyntax {
            jsx: true,
            decorators: true,
            ..Default::default()
        }),
    }
}

fn parse_module(source: &str, language: Language) -> Result<(Module, BytePos)> {
    let cm: Lrc<SourceMap> = Lrc::default();
    let fm = cm.new_source_file(Lrc::new(FileName::Anon), source.to_string());

    let mut recovered = Vec::new();
    let module = parse_file_as_module(
        &fm,
        syntax_for(language),
        EsVersion::EsNext,
        None,
        &mut recovered,
    )
    .map_err(|e| parse_error(source, language, fm.start_pos, e.span(), &e.kind().msg()))?;

    if let Some(e) = recovered.first() {
        return Err(parse_error(
            source,
            language,
            fm.start_pos,
            e.span(),
            &e.kind().msg(),
        ));
    }

    Ok((module, fm.start_pos))
}

fn parse_error(
    source: &str,
    language: Language,
    start_pos: BytePos,
    span: Span,
    message: &str,
) -> ExtractError {
    let offset = span.lo.0.saturating_sub(start_pos.0) as usize;
    let line = graphql_types::Position::from_offset(source, offset).one_based_line();
    ExtractError::Parse {
        language,
        line,
        message: message.to_string(),
    }
}

struct FoundTemplate {
    offset: usize,
    raw: String,
    tag: String,
    interpolated: bool,
}

/// Collects tagged templates in source order (outer templates before nested ones).
struct TaggedTemplateCollector<'a> {
    config: &'a ExtractConfig,
    start_pos: BytePos,
    templates: Vec<FoundTemplate>,
}

impl Visit for TaggedTemplateCollector<'_> {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if is_query_tag(&node.tag, self.config) {
            if let (Some(first), Expr::Ident(ident)) = (node.tpl.quasis.first(), &*node.tag) {
                self.templates.push(FoundTemplate {
                    offset: first.span.lo.0.saturating_sub(self.start_pos.0) as usize,
                    raw: first.raw.to_string(),
                    tag: ident.sym.to_string(),
                    interpolated: !node.tpl.exprs.is_empty(),
                });
            }
        }

        node.visit_children_with(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_ts(source: &str) -> Vec<ExtractedGraphQL> {
        extract_from_source(source, Language::TypeScript, &ExtractConfig::default()).unwrap()
    }

    #[test]
    fn test_extracts_single_template_with_line() {
        let source = r"import gql from 'graphql-tag';


const q = gql`query GetUser { user { id name } }`;
";
        let extracted = extract_ts(source);

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].source, "query GetUser { user { id name } }");
        assert_eq!(extracted[0].location.start_line(), 4);
        assert_eq!(extracted[0].tag.as_deref(), Some("gql"));
        assert!(!extracted[0].truncated);
    }

    #[test]
    fn test_extracts_multiple_templates_in_order() {
        let source = r"
const A = gql`
  query A { user { id } }
`;

const other = css`color: red;`;

export const B = gql`
  query B { user { id } }
`;
";
        let extracted = extract_ts(source);

        assert_eq!(extracted.len(), 2);
        assert!(extracted[0].source.contains("query A"));
        assert_eq!(extracted[0].location.start_line(), 2);
        assert!(extracted[1].source.contains("query B"));
        assert_eq!(extracted[1].location.start_line(), 8);
    }

    #[test]
    fn test_ignores_plain_template_literals_and_other_tags() {
        let source = r"
const a = `query NotTagged { id }`;
const b = graphql`query WrongTag { id }`;
const c = client.gql`query Member { id }`;
";
        assert!(extract_ts(source).is_empty());
    }

    #[test]
    fn test_custom_tag_identifiers() {
        let source = "const q = graphql`query Q { id }`;\nconst r = gql`query R { id }`;";
        let config = ExtractConfig {
            tag_identifiers: vec!["graphql".to_string()],
            ..Default::default()
        };

        let extracted = extract_from_source(source, Language::TypeScript, &config).unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].source, "query Q { id }");
        assert_eq!(extracted[0].tag.as_deref(), Some("graphql"));
    }

    #[test]
    fn test_interpolated_template_uses_first_segment() {
        let source = r"
const Q = gql`query Q { user { ...UserFields } }
${USER_FIELDS}`;
";
        let extracted = extract_ts(source);

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].source, "query Q { user { ...UserFields } }\n");
        assert!(extracted[0].truncated);
    }

    #[test]
    fn test_interpolated_template_skipped_when_configured() {
        let source = "const Q = gql`query Q { ...F } ${F}`;\nconst R = gql`query R { id }`;";
        let config = ExtractConfig {
            interpolation: InterpolationPolicy::Skip,
            ..Default::default()
        };

        let extracted = extract_from_source(source, Language::TypeScript, &config).unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].source, "query R { id }");
    }

    #[test]
    fn test_nested_template_inside_interpolation() {
        let source = "const Q = gql`query Q { id } ${gql`fragment F on User { id }`}`;";
        let extracted = extract_ts(source);

        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].source, "query Q { id } ");
        assert_eq!(extracted[1].source, "fragment F on User { id }");
    }

    #[test]
    fn test_typescript_syntax_is_accepted() {
        let source = r"
interface Props { id: string }
type Maybe<T> = T | null;
const value = <string>someValue;
export function useUser(props: Props): Maybe<string> {
  return useQuery<UserQuery>(gql`query UseUser { user { id } }`) as any;
}
";
        let extracted = extract_ts(source);
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].location.start_line(), 6);
    }

    #[test]
    fn test_tsx_syntax_is_accepted() {
        let source = r"
const QUERY = gql`query Profile { me { name } }`;
export const Profile = ({ id }: { id: string }) => <div className='profile'>{id}</div>;
";
        let extracted =
            extract_from_source(source, Language::Tsx, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].location.start_line(), 2);
    }

    #[test]
    fn test_javascript_jsx_is_accepted() {
        let source = r"
const QUERY = gql`query Profile { me { name } }`;
export const Profile = () => <div>{QUERY}</div>;
";
        let extracted =
            extract_from_source(source, Language::JavaScript, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.len(), 1);
    }

    #[test]
    fn test_syntax_error_fails_whole_file() {
        let source = "const q = gql`query Q { id }`;\nconst broken = ;\n";
        let result = extract_from_source(source, Language::TypeScript, &ExtractConfig::default());

        match result {
            Err(ExtractError::Parse { line, language, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(language, Language::TypeScript);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_graphql_source_is_returned_whole() {
        let source = "query Q {\n  user { id }\n}\n";
        let extracted =
            extract_from_source(source, Language::GraphQL, &ExtractConfig::default()).unwrap();

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].source, source);
        assert_eq!(extracted[0].location.start_line(), 1);
        assert_eq!(extracted[0].tag, None);
    }

    #[test]
    fn test_is_query_tag() {
        let config = ExtractConfig::default();
        let ident = Expr::Ident(swc_core::ecma::ast::Ident::new_no_ctxt(
            "gql".into(),
            swc_common::DUMMY_SP,
        ));
        let other = Expr::Ident(swc_core::ecma::ast::Ident::new_no_ctxt(
            "css".into(),
            swc_common::DUMMY_SP,
        ));

        assert!(is_query_tag(&ident, &config));
        assert!(!is_query_tag(&other, &config));
    }

    #[test]
    fn test_extract_config_deserialize() {
        let config: ExtractConfig = serde_json::from_str(
            r#"{ "tagIdentifiers": ["gql", "graphql"], "interpolation": "skip" }"#,
        )
        .unwrap();
        assert_eq!(config.tag_identifiers, vec!["gql", "graphql"]);
        assert_eq!(config.interpolation, InterpolationPolicy::Skip);

        let defaults: ExtractConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, ExtractConfig::default());
    }

    #[test]
    fn test_extract_from_file_detects_language() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.tsx");
        std::fs::write(&path, "export const Q = gql`query Q { id }`;\n").unwrap();

        let extracted = extract_from_file(&path, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.len(), 1);

        let unsupported = dir.path().join("notes.md");
        std::fs::write(&unsupported, "gql").unwrap();
        assert!(matches!(
            extract_from_file(&unsupported, &ExtractConfig::default()),
            Err(ExtractError::UnsupportedFileType(_))
        ));
    }
}
