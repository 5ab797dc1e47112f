use crate::ValidationError;
use graphql_schema::Schema;
use std::fmt;

const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A `Type.field` pair known to exist in the schema it was validated against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetSpecifier {
    type_name: String,
    field_name: String,
}

impl TargetSpecifier {
    /// Validate a raw `Type.field` argument against `schema`.
    ///
    /// The argument is split on its first `.`; anything after that belongs to
    /// the field name (and so never matches a real field).
    pub fn validate(raw: Option<&str>, schema: &Schema) -> Result<Self, ValidationError> {
        let raw = raw
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(ValidationError::MissingArgument)?;

        let (type_name, field_name) = raw.split_once('.').unwrap_or((raw, ""));

        let Some(ty) = schema.get_type(type_name) else {
            return Err(ValidationError::UnknownType {
                type_name: type_name.to_string(),
                suggestion: closest(type_name, schema.type_names()),
            });
        };

        if ty.field(field_name).is_none() {
            return Err(ValidationError::UnknownField {
                type_name: type_name.to_string(),
                field_name: field_name.to_string(),
                suggestion: closest(field_name, ty.fields().map(|f| f.name.as_str())),
            });
        }

        tracing::debug!(type_name, field_name, "Target validated");
        Ok(Self {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        })
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Whether a field named `field_name` selected on `parent_type` is this target.
    #[must_use]
    pub fn matches(&self, parent_type: &str, field_name: &str) -> bool {
        self.type_name == parent_type && self.field_name == field_name
    }
}

impl fmt::Display for TargetSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.type_name, self.field_name)
    }
}

fn closest<'a>(name: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_schema::parse_sdl;
    use std::path::Path;

    fn schema() -> Schema {
        let mut builder = Schema::builder();
        parse_sdl(
            &mut builder,
            "type Query { user: User } type User { id: ID name: String }",
            Path::new("schema.graphql"),
        )
        .unwrap();
        builder.build()
    }

    #[test]
    fn test_valid_target() {
        let target = TargetSpecifier::validate(Some("User.name"), &schema()).unwrap();
        assert_eq!(target.type_name(), "User");
        assert_eq!(target.field_name(), "name");
        assert_eq!(target.to_string(), "User.name");
        assert!(target.matches("User", "name"));
        assert!(!target.matches("Query", "name"));
    }

    #[test]
    fn test_missing_argument() {
        let schema = schema();
        assert_eq!(
            TargetSpecifier::validate(None, &schema),
            Err(ValidationError::MissingArgument)
        );
        assert_eq!(
            TargetSpecifier::validate(Some("  "), &schema),
            Err(ValidationError::MissingArgument)
        );
    }

    #[test]
    fn test_unknown_type_with_suggestion() {
        let err = TargetSpecifier::validate(Some("Usr.name"), &schema()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownType {
                type_name: "Usr".to_string(),
                suggestion: Some("User".to_string()),
            }
        );
        insta::assert_snapshot!(err.to_string(), @"Unknown type 'Usr' (did you mean 'User'?)");
    }

    #[test]
    fn test_unknown_type_without_suggestion() {
        let err = TargetSpecifier::validate(Some("Foo.bar"), &schema()).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Unknown type 'Foo'");
    }

    #[test]
    fn test_unknown_field() {
        let err = TargetSpecifier::validate(Some("User.email"), &schema()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownField { ref type_name, ref field_name, suggestion: None }
                if type_name == "User" && field_name == "email"
        ));
        insta::assert_snapshot!(err.to_string(), @"Type 'User' has no field 'email'");
    }

    #[test]
    fn test_unknown_field_with_suggestion() {
        let err = TargetSpecifier::validate(Some("User.nmae"), &schema()).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"Type 'User' has no field 'nmae' (did you mean 'name'?)");
    }

    #[test]
    fn test_split_on_first_dot() {
        let schema = schema();
        let err = TargetSpecifier::validate(Some("User.name.first"), &schema).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownField { ref field_name, .. } if field_name == "name.first"
        ));

        let err = TargetSpecifier::validate(Some("User"), &schema).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UnknownField { ref field_name, suggestion: None, .. } if field_name.is_empty()
        ));
    }
}
