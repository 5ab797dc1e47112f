use graphql_apollo_ext::OperationType;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Scalars every schema has, whether or not its SDL declares them.
pub const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Object, interface and union types can have selection sets.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }
}

/// Reference to a type (with list/non-null wrappers flattened)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// The underlying named type
    pub name: String,
    pub is_list: bool,
    pub is_non_null: bool,
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_list: false,
            is_non_null: false,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bang = if self.is_non_null { "!" } else { "" };
        if self.is_list {
            write!(f, "[{}]{bang}", self.name)
        } else {
            write!(f, "{}{bang}", self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub type_ref: TypeRef,
}

/// A named type and the fields it declares.
///
/// Input object fields are recorded alongside output fields so that a
/// `Type.field` specifier naming an input field still validates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    fields: BTreeMap<String, FieldDefinition>,
}

impl TypeDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }
}

/// Immutable, fully merged schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    types: HashMap<String, TypeDefinition>,
    root_types: HashMap<OperationType, String>,
}

impl Schema {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Type names in sorted order.
    #[must_use]
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// The root type for an operation kind, if the schema has one.
    #[must_use]
    pub fn root_type(&self, operation: OperationType) -> Option<&TypeDefinition> {
        self.root_types
            .get(&operation)
            .and_then(|name| self.get_type(name))
    }
}

/// Accumulates type definitions and extensions from any number of sources.
///
/// Extensions may arrive before the definition they extend; fields merge
/// into a single type either way.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: HashMap<String, PendingType>,
    root_types: HashMap<OperationType, String>,
    schema_defined: bool,
}

#[derive(Debug)]
struct PendingType {
    kind: TypeKind,
    fields: BTreeMap<String, FieldDefinition>,
}

impl SchemaBuilder {
    /// Declare a type (or extend it if already declared).
    pub fn add_type(&mut self, name: &str, kind: TypeKind) -> &mut Self {
        self.types
            .entry(name.to_string())
            .and_modify(|pending| pending.kind = kind)
            .or_insert_with(|| PendingType {
                kind,
                fields: BTreeMap::new(),
            });
        self
    }

    /// Record an extension of `name`, declaring the type if it has not been seen yet.
    pub fn extend_type(&mut self, name: &str, kind: TypeKind) -> &mut Self {
        self.types
            .entry(name.to_string())
            .or_insert_with(|| PendingType {
                kind,
                fields: BTreeMap::new(),
            });
        self
    }

    /// Add a field to a previously declared or extended type.
    pub fn add_field(&mut self, type_name: &str, field: FieldDefinition) -> &mut Self {
        if let Some(pending) = self.types.get_mut(type_name) {
            pending.fields.insert(field.name.clone(), field);
        } else {
            tracing::debug!(type_name, field = %field.name, "Field added to undeclared type");
        }
        self
    }

    /// Record that root types are declared explicitly (a `schema` definition,
    /// a schema extension or an introspection result). Roots left unset then
    /// stay unset instead of defaulting to `Query`/`Mutation`/`Subscription`.
    pub fn define_schema(&mut self) -> &mut Self {
        self.schema_defined = true;
        self
    }

    pub fn set_root_type(&mut self, operation: OperationType, name: &str) -> &mut Self {
        self.schema_defined = true;
        self.root_types.insert(operation, name.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> Schema {
        let mut types: HashMap<String, TypeDefinition> = self
            .types
            .into_iter()
            .map(|(name, pending)| {
                let definition = TypeDefinition {
                    name: name.clone(),
                    kind: pending.kind,
                    fields: pending.fields,
                };
                (name, definition)
            })
            .collect();

        for scalar in BUILTIN_SCALARS {
            types
                .entry((*scalar).to_string())
                .or_insert_with(|| TypeDefinition::new(*scalar, TypeKind::Scalar));
        }

        let mut root_types = self.root_types;
        if !self.schema_defined {
            for operation in [
                OperationType::Query,
                OperationType::Mutation,
                OperationType::Subscription,
            ] {
                let default_name = operation.default_root_type_name();
                if types.contains_key(default_name) {
                    root_types.insert(operation, default_name.to_string());
                }
            }
        }

        tracing::debug!(
            types = types.len(),
            roots = root_types.len(),
            "Schema built"
        );

        Schema { types, root_types }
    }
}
