//! Definition filtering utilities for GraphQL documents.
//!
//! # Example
//!
//! ```
//! use graphql_apollo_ext::DocumentExt;
//! use apollo_parser::Parser;
//!
//! let source = r"
//!     query GetUser { user { id } }
//!     mutation UpdateUser { updateUser { id } }
//!     fragment UserFields on User { name }
//! ";
//! let tree = Parser::new(source).parse();
//!
//! assert_eq!(tree.operations().count(), 2);
//! assert_eq!(tree.fragments().count(), 1);
//! ```

use crate::NameExt;
use apollo_parser::cst;
use apollo_parser::SyntaxTree;

/// Extension trait for convenient access to document definitions.
pub trait DocumentExt {
    /// Iterate over all operation definitions in the document.
    fn operations(&self) -> impl Iterator<Item = cst::OperationDefinition>;

    /// Iterate over all fragment definitions in the document.
    fn fragments(&self) -> impl Iterator<Item = cst::FragmentDefinition>;

    /// Name of the first top-level definition, if it is a named operation or fragment.
    fn first_definition_name(&self) -> Option<String>;
}

impl DocumentExt for SyntaxTree {
    fn operations(&self) -> impl Iterator<Item = cst::OperationDefinition> {
        self.document().definitions().filter_map(|def| {
            if let cst::Definition::OperationDefinition(op) = def {
                Some(op)
            } else {
                None
            }
        })
    }

    fn fragments(&self) -> impl Iterator<Item = cst::FragmentDefinition> {
        self.document().definitions().filter_map(|def| {
            if let cst::Definition::FragmentDefinition(frag) = def {
                Some(frag)
            } else {
                None
            }
        })
    }

    fn first_definition_name(&self) -> Option<String> {
        match self.document().definitions().next()? {
            cst::Definition::OperationDefinition(op) => op.name_text(),
            cst::Definition::FragmentDefinition(frag) => frag.name_text(),
            _ => None,
        }
    }
}

/// Operation type (query, mutation, subscription).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// Get the conventional root type name for this operation type.
    #[must_use]
    pub const fn default_root_type_name(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }

    /// Operation type named by a `query`/`mutation`/`subscription` keyword node.
    #[must_use]
    pub fn from_cst(op_type: &cst::OperationType) -> Self {
        if op_type.mutation_token().is_some() {
            Self::Mutation
        } else if op_type.subscription_token().is_some() {
            Self::Subscription
        } else {
            Self::Query
        }
    }
}

/// Extension trait for operation definitions.
pub trait OperationExt {
    /// Get the operation type. The `{ ... }` shorthand is a query.
    fn operation_kind(&self) -> OperationType;
}

impl OperationExt for cst::OperationDefinition {
    fn operation_kind(&self) -> OperationType {
        self.operation_type()
            .map_or(OperationType::Query, |op_type| OperationType::from_cst(&op_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apollo_parser::Parser;

    #[test]
    fn test_operations() {
        let source = r"
            query GetUser { user { id } }
            mutation UpdateUser { updateUser { id } }
            subscription OnUserUpdate { userUpdated { id } }
            { viewer { id } }
        ";
        let tree = Parser::new(source).parse();

        let kinds: Vec<_> = tree.operations().map(|op| op.operation_kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OperationType::Query,
                OperationType::Mutation,
                OperationType::Subscription,
                OperationType::Query,
            ]
        );
    }

    #[test]
    fn test_fragments() {
        let source = r"
            fragment UserFields on User { name }
            fragment AdminFields on Admin { role }
        ";
        let tree = Parser::new(source).parse();

        let names: Vec<_> = tree.fragments().filter_map(|f| f.name_text()).collect();
        assert_eq!(names, vec!["UserFields", "AdminFields"]);
    }

    #[test]
    fn test_first_definition_name() {
        let tree = Parser::new("fragment F on User { id } query Q { user { ...F } }").parse();
        assert_eq!(tree.first_definition_name(), Some("F".to_string()));

        let tree = Parser::new("{ user { id } } query Named { user { id } }").parse();
        assert_eq!(tree.first_definition_name(), None);

        let tree = Parser::new("").parse();
        assert_eq!(tree.first_definition_name(), None);
    }

    #[test]
    fn test_default_root_type_names() {
        assert_eq!(OperationType::Query.default_root_type_name(), "Query");
        assert_eq!(OperationType::Mutation.default_root_type_name(), "Mutation");
        assert_eq!(
            OperationType::Subscription.default_root_type_name(),
            "Subscription"
        );
    }
}
