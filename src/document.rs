//! The type-system document compared by the diff engine.
//!
//! A document is a read-only snapshot of one schema version: its named type
//! definitions and the root operation types. Documents are usually produced
//! from an introspection result (see [`crate::introspection`]), but they can
//! also be assembled by hand with the constructors below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::type_ref::TypeRef;
use crate::value::Value;

/// The three GraphQL root operations, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    pub const ALL: [OperationType; 3] = [
        OperationType::Query,
        OperationType::Mutation,
        OperationType::Subscription,
    ];

    /// The keyword used in schema definitions (`query`).
    pub fn keyword(&self) -> &'static str {
        match self {
            OperationType::Query => "query",
            OperationType::Mutation => "mutation",
            OperationType::Subscription => "subscription",
        }
    }

    /// The conventional root type name (`Query`).
    pub fn default_type_name(&self) -> &'static str {
        match self {
            OperationType::Query => "Query",
            OperationType::Mutation => "Mutation",
            OperationType::Subscription => "Subscription",
        }
    }
}

/// A directive applied to a definition, e.g. `@deprecated(reason: "use bar")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub arguments: BTreeMap<String, Value>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(name.into(), value);
        self
    }
}

/// An argument of a field, or a field of an input object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputValueDefinition {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl InputValueDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
            directives: Vec::new(),
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

/// An output field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub arguments: Vec<InputValueDefinition>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            arguments: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: InputValueDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDefinition {
    pub name: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl EnumValueDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceType {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionType {
    pub name: String,
    pub members: Vec<String>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,
    pub values: Vec<EnumValueDefinition>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarType {
    pub name: String,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputObjectType {
    pub name: String,
    pub fields: Vec<InputValueDefinition>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

/// A named type definition. The set of kinds is closed: every comparer
/// matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TypeDefinition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    Scalar(ScalarType),
    InputObject(InputObjectType),
}

/// The kind of a [`TypeDefinition`], plus `Operation` for root-level events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Operation,
    Object,
    Interface,
    Union,
    Enum,
    Scalar,
    InputObject,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Operation => "Operation",
            TypeKind::Object => "Object",
            TypeKind::Interface => "Interface",
            TypeKind::Union => "Union",
            TypeKind::Enum => "Enum",
            TypeKind::Scalar => "Scalar",
            TypeKind::InputObject => "InputObject",
        };
        f.write_str(name)
    }
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::Interface(_) => TypeKind::Interface,
            TypeDefinition::Union(_) => TypeKind::Union,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::InputObject(_) => TypeKind::InputObject,
        }
    }

    pub fn directives(&self) -> &[Directive] {
        match self {
            TypeDefinition::Object(def) => &def.directives,
            TypeDefinition::Interface(def) => &def.directives,
            TypeDefinition::Union(def) => &def.directives,
            TypeDefinition::Enum(def) => &def.directives,
            TypeDefinition::Scalar(def) => &def.directives,
            TypeDefinition::InputObject(def) => &def.directives,
        }
    }
}

/// One version of a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSystemDocument {
    pub types: BTreeMap<String, TypeDefinition>,
    /// Explicit root type names. `None` falls back to the naming convention.
    #[serde(default)]
    pub query_type: Option<String>,
    #[serde(default)]
    pub mutation_type: Option<String>,
    #[serde(default)]
    pub subscription_type: Option<String>,
}

impl TypeSystemDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a type definition keyed by its name.
    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.insert(definition);
        self
    }

    pub fn insert(&mut self, definition: TypeDefinition) {
        self.types.insert(definition.name().to_string(), definition);
    }

    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceType> {
        match self.types.get(name) {
            Some(TypeDefinition::Interface(def)) => Some(def),
            _ => None,
        }
    }

    pub fn explicit_root(&self, operation: OperationType) -> Option<&str> {
        match operation {
            OperationType::Query => self.query_type.as_deref(),
            OperationType::Mutation => self.mutation_type.as_deref(),
            OperationType::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// Resolves the root type name of an operation.
    ///
    /// A document with no explicit root declarations at all is treated as
    /// having an implicit schema definition: an object type named
    /// `Query`/`Mutation`/`Subscription` is the root of that operation.
    pub fn root_type_name(&self, operation: OperationType) -> Option<&str> {
        if self.has_schema_definition() {
            return self.explicit_root(operation);
        }
        let conventional = operation.default_type_name();
        match self.types.get(conventional) {
            Some(TypeDefinition::Object(_)) => Some(conventional),
            _ => None,
        }
    }

    pub fn has_schema_definition(&self) -> bool {
        self.query_type.is_some() || self.mutation_type.is_some() || self.subscription_type.is_some()
    }
}
