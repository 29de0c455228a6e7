//! Document builders shared by the integration tests

#![allow(dead_code)]

use graphql_sign::document::{
    EnumType, EnumValueDefinition, FieldDefinition, InputObjectType, InputValueDefinition,
    InterfaceType, ObjectType, ScalarType, TypeDefinition, UnionType,
};
use graphql_sign::{CapturingSink, DiffOptions, TypeRef, TypeSystemDocument, diff_schema};

pub fn ty(type_ref: &str) -> TypeRef {
    type_ref.parse().expect("Failed to parse type reference")
}

pub fn field(name: &str, type_ref: &str) -> FieldDefinition {
    FieldDefinition::new(name, ty(type_ref))
}

pub fn arg(name: &str, type_ref: &str) -> InputValueDefinition {
    InputValueDefinition::new(name, ty(type_ref))
}

pub fn object(name: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
    object_implementing(name, &[], fields)
}

pub fn object_implementing(
    name: &str,
    interfaces: &[&str],
    fields: Vec<FieldDefinition>,
) -> TypeDefinition {
    TypeDefinition::Object(ObjectType {
        name: name.to_string(),
        fields,
        interfaces: interfaces.iter().map(|i| i.to_string()).collect(),
        directives: Vec::new(),
    })
}

pub fn interface(name: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
    TypeDefinition::Interface(InterfaceType {
        name: name.to_string(),
        fields,
        directives: Vec::new(),
    })
}

pub fn union_of(name: &str, members: &[&str]) -> TypeDefinition {
    TypeDefinition::Union(UnionType {
        name: name.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
        directives: Vec::new(),
    })
}

pub fn enum_of(name: &str, values: &[&str]) -> TypeDefinition {
    TypeDefinition::Enum(EnumType {
        name: name.to_string(),
        values: values.iter().map(|v| EnumValueDefinition::new(*v)).collect(),
        directives: Vec::new(),
    })
}

pub fn input_object(name: &str, fields: Vec<InputValueDefinition>) -> TypeDefinition {
    TypeDefinition::InputObject(InputObjectType {
        name: name.to_string(),
        fields,
        directives: Vec::new(),
    })
}

pub fn scalar(name: &str) -> TypeDefinition {
    TypeDefinition::Scalar(ScalarType {
        name: name.to_string(),
        directives: Vec::new(),
    })
}

pub fn document(types: Vec<TypeDefinition>) -> TypeSystemDocument {
    let mut document = TypeSystemDocument::new();
    for definition in types {
        document.insert(definition);
    }
    document
}

/// Runs the engine and returns its count together with every captured event.
pub fn run_diff(
    old: &TypeSystemDocument,
    new: &TypeSystemDocument,
    options: &DiffOptions,
) -> (usize, CapturingSink) {
    let mut sink = CapturingSink::new();
    let count = diff_schema(old, new, &mut sink, options).expect("Diff should succeed");
    (count, sink)
}

pub fn run_default_diff(old: &TypeSystemDocument, new: &TypeSystemDocument) -> (usize, CapturingSink) {
    run_diff(old, new, &DiffOptions::default())
}
