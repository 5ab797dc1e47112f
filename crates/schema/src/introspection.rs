//! Introspection result input.
//!
//! These types mirror the parts of a GraphQL introspection query response the
//! schema model needs. Either the full response (`{"data": {"__schema": ...}}`)
//! or the bare `{"__schema": ...}` object is accepted.

use crate::{FieldDefinition, Result, SchemaBuilder, SchemaError, TypeKind, TypeRef};
use graphql_apollo_ext::OperationType;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntrospectionDocument {
    Response { data: IntrospectionData },
    Bare(IntrospectionData),
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<IntrospectionTypeName>,
    mutation_type: Option<IntrospectionTypeName>,
    subscription_type: Option<IntrospectionTypeName>,
    types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionTypeName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: IntrospectionKind,
    name: String,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
    #[serde(default)]
    input_fields: Option<Vec<IntrospectionField>>,
}

/// Fields and input values share the shape this model needs.
#[derive(Debug, Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(rename = "type")]
    type_ref: IntrospectionTypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: IntrospectionKind,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum IntrospectionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl IntrospectionKind {
    const fn type_kind(self) -> Option<TypeKind> {
        match self {
            Self::Scalar => Some(TypeKind::Scalar),
            Self::Object => Some(TypeKind::Object),
            Self::Interface => Some(TypeKind::Interface),
            Self::Union => Some(TypeKind::Union),
            Self::Enum => Some(TypeKind::Enum),
            Self::InputObject => Some(TypeKind::InputObject),
            Self::List | Self::NonNull => None,
        }
    }
}

impl IntrospectionTypeRef {
    fn to_type_ref(&self) -> Option<TypeRef> {
        match self.kind {
            IntrospectionKind::NonNull => {
                let mut inner = self.of_type.as_ref()?.to_type_ref()?;
                inner.is_non_null = true;
                Some(inner)
            }
            IntrospectionKind::List => {
                let mut inner = self.of_type.as_ref()?.to_type_ref()?;
                inner.is_list = true;
                inner.is_non_null = false;
                Some(inner)
            }
            _ => self.name.clone().map(TypeRef::named),
        }
    }
}

/// Parse an introspection result and add its types to `builder`.
#[tracing::instrument(skip(builder, source), fields(path = %path.display(), len = source.len()))]
pub fn parse_introspection(builder: &mut SchemaBuilder, source: &str, path: &Path) -> Result<()> {
    let document: IntrospectionDocument =
        serde_json::from_str(source).map_err(|e| SchemaError::Introspection {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let schema = match document {
        IntrospectionDocument::Response { data } | IntrospectionDocument::Bare(data) => {
            data.schema
        }
    };

    for ty in &schema.types {
        let Some(kind) = ty.kind.type_kind() else {
            tracing::debug!(name = %ty.name, "Skipping wrapper kind in type list");
            continue;
        };
        builder.add_type(&ty.name, kind);

        let fields = ty.fields.iter().chain(ty.input_fields.iter()).flatten();
        for field in fields {
            if let Some(type_ref) = field.type_ref.to_type_ref() {
                builder.add_field(
                    &ty.name,
                    FieldDefinition {
                        name: field.name.clone(),
                        type_ref,
                    },
                );
            }
        }
    }

    builder.define_schema();
    let roots = [
        (OperationType::Query, &schema.query_type),
        (OperationType::Mutation, &schema.mutation_type),
        (OperationType::Subscription, &schema.subscription_type),
    ];
    for (operation, root) in roots {
        if let Some(root) = root {
            builder.set_root_type(operation, &root.name);
        }
    }

    tracing::debug!(types = schema.types.len(), "Introspection result parsed");
    Ok(())
}
