//! Type-directed traversal of a query literal.
//!
//! Each selection set is walked with a [`TypeContext`] naming the type its
//! fields are selected on. The context is an immutable value: entering a
//! field or inline fragment produces the child context, so siblings never
//! observe each other's state.
//!
//! Resolution follows the usual GraphQL type-info rules:
//!
//! - an operation starts at its root type, a fragment definition at its type condition
//! - a field's selection set is on the field's named return type
//! - an inline fragment with a type condition switches to that type; without one it keeps the current type
//! - only object, interface and union types can be a parent type
//!
//! Once resolution fails (unknown field, scalar with a selection set, unknown
//! type condition) the whole subtree stays unresolved and none of its fields
//! can match.

use crate::{FinderError, QueryLiteral, Result, TargetSpecifier, UsageRecord};
use apollo_parser::cst;
use graphql_apollo_ext::{DocumentExt, NameExt, OperationExt, TypeConditionExt};
use graphql_schema::{Schema, TypeDefinition};

const TYPENAME_FIELD: &str = "__typename";

/// The type fields are resolved against at one point of the traversal.
#[derive(Debug, Clone, Copy)]
pub struct TypeContext<'s> {
    schema: &'s Schema,
    parent: Option<&'s TypeDefinition>,
}

impl<'s> TypeContext<'s> {
    /// A context in which nothing resolves.
    #[must_use]
    pub const fn unresolved(schema: &'s Schema) -> Self {
        Self {
            schema,
            parent: None,
        }
    }

    /// A context on the named type, unresolved unless it is a composite type.
    #[must_use]
    pub fn on_type(schema: &'s Schema, type_name: &str) -> Self {
        Self {
            schema,
            parent: schema.get_type(type_name).filter(|ty| ty.is_composite()),
        }
    }

    /// The root context of an operation.
    #[must_use]
    pub fn for_operation(schema: &'s Schema, operation: &cst::OperationDefinition) -> Self {
        Self {
            schema,
            parent: schema
                .root_type(operation.operation_kind())
                .filter(|ty| ty.is_composite()),
        }
    }

    /// The root context of a fragment definition.
    #[must_use]
    pub fn for_fragment(schema: &'s Schema, fragment: &cst::FragmentDefinition) -> Self {
        fragment
            .type_condition_name()
            .map_or_else(|| Self::unresolved(schema), |name| Self::on_type(schema, &name))
    }

    /// The current parent type, if resolution has not failed.
    #[must_use]
    pub const fn parent_type(&self) -> Option<&'s TypeDefinition> {
        self.parent
    }

    /// The context for the selection set of field `field_name`.
    #[must_use]
    pub fn enter_field(&self, field_name: &str) -> Self {
        let Some(parent) = self.parent else {
            return *self;
        };

        if field_name == TYPENAME_FIELD {
            return Self::on_type(self.schema, "String");
        }

        match parent.field(field_name) {
            Some(field) => Self::on_type(self.schema, &field.type_ref.name),
            None => Self::unresolved(self.schema),
        }
    }

    /// The context for the selection set of an inline fragment.
    #[must_use]
    pub fn enter_inline_fragment(&self, type_condition: Option<&str>) -> Self {
        match (self.parent, type_condition) {
            (Some(_), Some(type_name)) => Self::on_type(self.schema, type_name),
            _ => *self,
        }
    }
}

/// Find every selection of `target` in `literal`.
///
/// All records carry the literal's own line and the name of its first
/// definition. A literal that is not valid GraphQL fails the run.
#[tracing::instrument(skip_all, fields(path = %literal.path.display(), line = literal.line))]
pub fn resolve(
    literal: &QueryLiteral,
    target: &TargetSpecifier,
    schema: &Schema,
) -> Result<Vec<UsageRecord>> {
    let tree = apollo_parser::Parser::new(&literal.raw).parse();

    let messages: Vec<String> = tree
        .errors()
        .map(|e| format!("{} (at offset {})", e.message(), e.index()))
        .collect();
    if !messages.is_empty() {
        return Err(FinderError::QueryParse {
            path: literal.path.clone(),
            line: literal.line,
            raw: literal.raw.clone(),
            message: messages.join("; "),
        });
    }

    let mut resolution = Resolution {
        literal,
        target,
        operation_name: tree.first_definition_name(),
        records: Vec::new(),
    };

    for definition in tree.document().definitions() {
        match definition {
            cst::Definition::OperationDefinition(operation) => {
                if let Some(selection_set) = operation.selection_set() {
                    let context = TypeContext::for_operation(schema, &operation);
                    resolution.walk_selection_set(&selection_set, context);
                }
            }
            cst::Definition::FragmentDefinition(fragment) => {
                if let Some(selection_set) = fragment.selection_set() {
                    let context = TypeContext::for_fragment(schema, &fragment);
                    resolution.walk_selection_set(&selection_set, context);
                }
            }
            _ => {}
        }
    }

    tracing::trace!(matches = resolution.records.len(), "Literal resolved");
    Ok(resolution.records)
}

struct Resolution<'a> {
    literal: &'a QueryLiteral,
    target: &'a TargetSpecifier,
    operation_name: Option<String>,
    records: Vec<UsageRecord>,
}

impl Resolution<'_> {
    fn walk_selection_set(&mut self, selection_set: &cst::SelectionSet, context: TypeContext<'_>) {
        for selection in selection_set.selections() {
            match selection {
                cst::Selection::Field(field) => {
                    let Some(field_name) = field.name_text() else {
                        continue;
                    };

                    match context.parent_type() {
                        Some(parent) if self.target.matches(&parent.name, &field_name) => {
                            self.records.push(UsageRecord {
                                path: self.literal.path.clone(),
                                line: self.literal.line,
                                operation_name: self.operation_name.clone(),
                            });
                        }
                        Some(_) => {}
                        None => tracing::trace!(field = %field_name, "Skipping unresolved field"),
                    }

                    if let Some(nested) = field.selection_set() {
                        self.walk_selection_set(&nested, context.enter_field(&field_name));
                    }
                }
                cst::Selection::InlineFragment(inline) => {
                    if let Some(nested) = inline.selection_set() {
                        let type_condition = inline.type_condition_name();
                        self.walk_selection_set(
                            &nested,
                            context.enter_inline_fragment(type_condition.as_deref()),
                        );
                    }
                }
                // Fragment definitions are walked on their own type condition.
                cst::Selection::FragmentSpread(_) => {}
            }
        }
    }
}
