//! Schema Definition Language input.

use crate::{FieldDefinition, Result, SchemaBuilder, SchemaError, TypeKind, TypeRef};
use apollo_parser::cst;
use graphql_apollo_ext::{BaseTypeExt, NameExt, OperationType};
use std::path::Path;

/// Parse SDL text and add its definitions and extensions to `builder`.
///
/// Executable definitions (operations, fragments) in the same file are ignored.
#[tracing::instrument(skip(builder, source), fields(path = %path.display(), len = source.len()))]
pub fn parse_sdl(builder: &mut SchemaBuilder, source: &str, path: &Path) -> Result<()> {
    let tree = apollo_parser::Parser::new(source).parse();

    let messages: Vec<String> = tree
        .errors()
        .map(|e| format!("{} (at offset {})", e.message(), e.index()))
        .collect();
    if !messages.is_empty() {
        return Err(SchemaError::Syntax {
            path: path.to_path_buf(),
            messages,
        });
    }

    for definition in tree.document().definitions() {
        match definition {
            cst::Definition::ObjectTypeDefinition(obj) => {
                if let Some(name) = obj.name_text() {
                    builder.add_type(&name, TypeKind::Object);
                    add_fields(builder, &name, obj.fields_definition());
                }
            }
            cst::Definition::ObjectTypeExtension(ext) => {
                if let Some(name) = ext.name_text() {
                    builder.extend_type(&name, TypeKind::Object);
                    add_fields(builder, &name, ext.fields_definition());
                }
            }
            cst::Definition::InterfaceTypeDefinition(iface) => {
                if let Some(name) = iface.name_text() {
                    builder.add_type(&name, TypeKind::Interface);
                    add_fields(builder, &name, iface.fields_definition());
                }
            }
            cst::Definition::InterfaceTypeExtension(ext) => {
                if let Some(name) = ext.name_text() {
                    builder.extend_type(&name, TypeKind::Interface);
                    add_fields(builder, &name, ext.fields_definition());
                }
            }
            cst::Definition::InputObjectTypeDefinition(input) => {
                if let Some(name) = input.name_text() {
                    builder.add_type(&name, TypeKind::InputObject);
                    add_input_fields(builder, &name, input.input_fields_definition());
                }
            }
            cst::Definition::InputObjectTypeExtension(ext) => {
                if let Some(name) = ext.name_text() {
                    builder.extend_type(&name, TypeKind::InputObject);
                    add_input_fields(builder, &name, ext.input_fields_definition());
                }
            }
            cst::Definition::UnionTypeDefinition(union) => {
                if let Some(name) = union.name_text() {
                    builder.add_type(&name, TypeKind::Union);
                }
            }
            cst::Definition::UnionTypeExtension(ext) => {
                if let Some(name) = ext.name_text() {
                    builder.extend_type(&name, TypeKind::Union);
                }
            }
            cst::Definition::EnumTypeDefinition(enum_def) => {
                if let Some(name) = enum_def.name_text() {
                    builder.add_type(&name, TypeKind::Enum);
                }
            }
            cst::Definition::EnumTypeExtension(ext) => {
                if let Some(name) = ext.name_text() {
                    builder.extend_type(&name, TypeKind::Enum);
                }
            }
            cst::Definition::ScalarTypeDefinition(scalar) => {
                if let Some(name) = scalar.name_text() {
                    builder.add_type(&name, TypeKind::Scalar);
                }
            }
            cst::Definition::SchemaDefinition(schema) => {
                builder.define_schema();
                for root in schema.root_operation_type_definitions() {
                    add_root(builder, &root);
                }
            }
            cst::Definition::SchemaExtension(ext) => {
                builder.define_schema();
                for root in ext.root_operation_type_definitions() {
                    add_root(builder, &root);
                }
            }
            _ => {}
        }
    }

    Ok(())
}

fn add_fields(builder: &mut SchemaBuilder, type_name: &str, fields: Option<cst::FieldsDefinition>) {
    for field in fields.iter().flat_map(cst::FieldsDefinition::field_definitions) {
        if let (Some(name), Some(ty)) = (field.name_text(), field.ty()) {
            if let Some(type_ref) = type_ref(&ty) {
                builder.add_field(type_name, FieldDefinition { name, type_ref });
            }
        }
    }
}

fn add_input_fields(
    builder: &mut SchemaBuilder,
    type_name: &str,
    fields: Option<cst::InputFieldsDefinition>,
) {
    for field in fields
        .iter()
        .flat_map(cst::InputFieldsDefinition::input_value_definitions)
    {
        if let (Some(name), Some(ty)) = (field.name_text(), field.ty()) {
            if let Some(type_ref) = type_ref(&ty) {
                builder.add_field(type_name, FieldDefinition { name, type_ref });
            }
        }
    }
}

fn add_root(builder: &mut SchemaBuilder, root: &cst::RootOperationTypeDefinition) {
    let operation = root
        .operation_type()
        .map_or(OperationType::Query, |op| OperationType::from_cst(&op));
    if let Some(name) = root.named_type().and_then(|nt| nt.name_text()) {
        builder.set_root_type(operation, &name);
    }
}

fn type_ref(ty: &cst::Type) -> Option<TypeRef> {
    Some(TypeRef {
        name: ty.base_type_name()?,
        is_list: ty.is_list(),
        is_non_null: ty.is_non_null(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Schema;

    fn build(sdl: &str) -> Schema {
        let mut builder = Schema::builder();
        parse_sdl(&mut builder, sdl, Path::new("schema.graphql")).unwrap();
        builder.build()
    }

    #[test]
    fn test_object_fields_and_types() {
        let schema = build(
            r"
            type Query { user(id: ID!): User users: [User!]! }
            type User { id: ID! name: String }
            ",
        );

        let query = schema.get_type("Query").unwrap();
        assert_eq!(query.kind, TypeKind::Object);
        let users = query.field("users").unwrap();
        assert_eq!(users.type_ref.name, "User");
        assert!(users.type_ref.is_list);
        assert!(users.type_ref.is_non_null);
        assert_eq!(query.field("user").unwrap().type_ref.to_string(), "User");

        let user = schema.get_type("User").unwrap();
        assert!(user.field("name").is_some());
        assert!(user.field("email").is_none());
    }

    #[test]
    fn test_all_type_kinds() {
        let schema = build(
            r"
            interface Node { id: ID! }
            union SearchResult = User | Post
            enum Status { ACTIVE INACTIVE }
            scalar DateTime
            input UserInput { name: String! }
            type User implements Node { id: ID! }
            type Post implements Node { id: ID! }
            ",
        );

        assert_eq!(schema.get_type("Node").unwrap().kind, TypeKind::Interface);
        assert_eq!(schema.get_type("SearchResult").unwrap().kind, TypeKind::Union);
        assert_eq!(schema.get_type("Status").unwrap().kind, TypeKind::Enum);
        assert_eq!(schema.get_type("DateTime").unwrap().kind, TypeKind::Scalar);
        let input = schema.get_type("UserInput").unwrap();
        assert_eq!(input.kind, TypeKind::InputObject);
        assert!(input.field("name").is_some());
    }

    #[test]
    fn test_type_extensions_merge() {
        let schema = build(
            r"
            extend type User { email: String }
            type User { id: ID! }
            extend interface Node { createdAt: String }
            interface Node { id: ID! }
            ",
        );

        let user = schema.get_type("User").unwrap();
        assert!(user.field("id").is_some());
        assert!(user.field("email").is_some());
        let node = schema.get_type("Node").unwrap();
        assert!(node.field("createdAt").is_some());
    }

    #[test]
    fn test_schema_definition_roots() {
        let schema = build(
            r"
            schema { query: RootQuery mutation: RootMutation }
            type RootQuery { me: String }
            type RootMutation { noop: Boolean }
            type Query { unused: String }
            ",
        );

        assert_eq!(
            schema.root_type(OperationType::Query).unwrap().name,
            "RootQuery"
        );
        assert_eq!(
            schema.root_type(OperationType::Mutation).unwrap().name,
            "RootMutation"
        );
    }

    #[test]
    fn test_schema_definition_roots_have_no_defaults() {
        let schema = build(
            r"
            schema { query: Root }
            type Root { user: User }
            type Mutation { user: User }
            type User { id: ID }
            ",
        );

        assert_eq!(schema.root_type(OperationType::Query).unwrap().name, "Root");
        assert!(schema.root_type(OperationType::Mutation).is_none());
    }

    #[test]
    fn test_syntax_error() {
        let mut builder = Schema::builder();
        let result = parse_sdl(&mut builder, "type User {", Path::new("broken.graphql"));
        match result {
            Err(SchemaError::Syntax { path, messages }) => {
                assert_eq!(path, Path::new("broken.graphql"));
                assert!(!messages.is_empty());
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_executable_definitions_ignored() {
        let schema = build("type Query { me: String } query Q { me }");
        assert!(schema.get_type("Q").is_none());
        assert!(schema.get_type("Query").is_some());
    }
}
