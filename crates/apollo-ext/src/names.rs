//! Name extraction utilities for GraphQL CST nodes.
//!
//! Extension traits that make it easier to extract names and text from CST
//! nodes without long option chains.
//!
//! ```
//! use graphql_apollo_ext::NameExt;
//! use apollo_parser::Parser;
//!
//! let source = "fragment UserFields on User { name }";
//! let tree = Parser::new(source).parse();
//!
//! for def in tree.document().definitions() {
//!     if let apollo_parser::cst::Definition::FragmentDefinition(frag) = def {
//!         // Instead of: frag.fragment_name().and_then(|n| n.name()).map(|n| n.text().to_string())
//!         assert_eq!(frag.name_text(), Some("UserFields".to_string()));
//!     }
//! }
//! ```

use apollo_parser::cst;

/// Extension trait for extracting names from CST nodes.
pub trait NameExt {
    /// Get the name text as a String, if available.
    fn name_text(&self) -> Option<String>;
}

/// Nodes whose name is a direct `Name` child.
macro_rules! impl_direct_name {
    ($($node:ty),* $(,)?) => {
        $(
            impl NameExt for $node {
                fn name_text(&self) -> Option<String> {
                    self.name().map(|n| n.text().to_string())
                }
            }
        )*
    };
}

impl_direct_name!(
    cst::OperationDefinition,
    cst::Field,
    cst::NamedType,
    cst::ObjectTypeDefinition,
    cst::ObjectTypeExtension,
    cst::InterfaceTypeDefinition,
    cst::InterfaceTypeExtension,
    cst::UnionTypeDefinition,
    cst::UnionTypeExtension,
    cst::EnumTypeDefinition,
    cst::EnumTypeExtension,
    cst::ScalarTypeDefinition,
    cst::InputObjectTypeDefinition,
    cst::InputObjectTypeExtension,
    cst::FieldDefinition,
    cst::InputValueDefinition,
);

impl NameExt for cst::FragmentDefinition {
    fn name_text(&self) -> Option<String> {
        self.fragment_name()
            .and_then(|n| n.name())
            .map(|n| n.text().to_string())
    }
}

impl NameExt for cst::FragmentSpread {
    fn name_text(&self) -> Option<String> {
        self.fragment_name()
            .and_then(|n| n.name())
            .map(|n| n.text().to_string())
    }
}

/// Extension trait for reading `on Type` conditions.
pub trait TypeConditionExt {
    /// The type named by the `on Type` condition, if present.
    fn type_condition_name(&self) -> Option<String>;
}

impl TypeConditionExt for cst::FragmentDefinition {
    fn type_condition_name(&self) -> Option<String> {
        self.type_condition()
            .and_then(|tc| tc.named_type())
            .and_then(|nt| nt.name_text())
    }
}

impl TypeConditionExt for cst::InlineFragment {
    fn type_condition_name(&self) -> Option<String> {
        self.type_condition()
            .and_then(|tc| tc.named_type())
            .and_then(|nt| nt.name_text())
    }
}

/// Extension trait for extracting the base type name from a Type reference.
///
/// This unwraps `NonNull` and `List` wrappers to get the underlying named type.
pub trait BaseTypeExt {
    /// Get the base type name (unwrapping `NonNull` and `List`).
    fn base_type_name(&self) -> Option<String>;

    /// Whether the outermost wrapper is `NonNull`.
    fn is_non_null(&self) -> bool;

    /// Whether the type is a list at any depth.
    fn is_list(&self) -> bool;
}

impl BaseTypeExt for cst::Type {
    fn base_type_name(&self) -> Option<String> {
        match self {
            cst::Type::NamedType(named) => named.name_text(),
            cst::Type::ListType(list) => list.ty().and_then(|t| t.base_type_name()),
            cst::Type::NonNullType(non_null) => {
                if let Some(named) = non_null.named_type() {
                    named.name_text()
                } else if let Some(list) = non_null.list_type() {
                    list.ty().and_then(|t| t.base_type_name())
                } else {
                    None
                }
            }
        }
    }

    fn is_non_null(&self) -> bool {
        matches!(self, cst::Type::NonNullType(_))
    }

    fn is_list(&self) -> bool {
        match self {
            cst::Type::NamedType(_) => false,
            cst::Type::ListType(_) => true,
            cst::Type::NonNullType(non_null) => non_null.list_type().is_some(),
        }
    }
}
