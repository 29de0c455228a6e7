//! Converts a GraphQL introspection result into a [`TypeSystemDocument`].
//!
//! Both the raw HTTP response shape (`{"data": {"__schema": ...}}`) and the
//! bare `{"__schema": ...}` object are accepted. Decoding goes through
//! `cynic-introspection`; this module only maps its [`Schema`] into our model.

use cynic_introspection::{Deprecated, IntrospectionQuery, Schema, Type};
use serde::Deserialize;
use std::fmt;

use crate::document::{
    Directive, EnumType, EnumValueDefinition, FieldDefinition, InputObjectType,
    InputValueDefinition, InterfaceType, ObjectType, ScalarType, TypeDefinition,
    TypeSystemDocument, UnionType,
};
use crate::error::IntrospectionError;
use crate::type_ref::TypeRef;
use crate::value::Value;

const DEPRECATED_DIRECTIVE: &str = "deprecated";

impl TypeSystemDocument {
    /// Parses introspection JSON text.
    pub fn from_introspection_str(json: &str) -> Result<Self, IntrospectionError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_introspection_value(&value)
    }

    /// Converts an already-decoded introspection JSON value.
    pub fn from_introspection_value(value: &serde_json::Value) -> Result<Self, IntrospectionError> {
        let root = value.get("data").unwrap_or(value);
        if root.get("__schema").is_none_or(|schema| schema.is_null()) {
            return Err(IntrospectionError::MissingSchema);
        }

        let schema = IntrospectionQuery::deserialize(root)?
            .into_schema()
            .map_err(|e| IntrospectionError::Schema(e.to_string()))?;
        convert_schema(schema)
    }
}

fn convert_schema(schema: Schema) -> Result<TypeSystemDocument, IntrospectionError> {
    let mut document = TypeSystemDocument {
        query_type: Some(schema.query_type),
        mutation_type: schema.mutation_type,
        subscription_type: schema.subscription_type,
        ..Default::default()
    };

    for ty in schema.types {
        document.insert(convert_type(ty)?);
    }

    for definition in document.types.values() {
        if let TypeDefinition::Object(object) = definition {
            for interface in &object.interfaces {
                if document.interface(interface).is_none() {
                    return Err(IntrospectionError::UnknownInterface {
                        type_name: object.name.clone(),
                        interface: interface.clone(),
                    });
                }
            }
        }
    }

    tracing::debug!(
        types = document.types.len(),
        query = ?document.query_type,
        mutation = ?document.mutation_type,
        subscription = ?document.subscription_type,
        "converted introspection result"
    );
    Ok(document)
}

fn convert_type(ty: Type) -> Result<TypeDefinition, IntrospectionError> {
    let definition = match ty {
        Type::Scalar(scalar) => TypeDefinition::Scalar(ScalarType {
            name: scalar.name,
            directives: Vec::new(),
        }),
        Type::Object(object) => TypeDefinition::Object(ObjectType {
            fields: convert_fields(&object.name, object.fields)?,
            interfaces: object.interfaces,
            name: object.name,
            directives: Vec::new(),
        }),
        Type::Interface(interface) => TypeDefinition::Interface(InterfaceType {
            fields: convert_fields(&interface.name, interface.fields)?,
            name: interface.name,
            directives: Vec::new(),
        }),
        Type::Union(union_type) => TypeDefinition::Union(UnionType {
            members: union_type.possible_types,
            name: union_type.name,
            directives: Vec::new(),
        }),
        Type::Enum(enum_type) => TypeDefinition::Enum(EnumType {
            values: enum_type
                .values
                .into_iter()
                .map(|value| EnumValueDefinition {
                    directives: deprecation(value.deprecated),
                    name: value.name,
                })
                .collect(),
            name: enum_type.name,
            directives: Vec::new(),
        }),
        Type::InputObject(input) => TypeDefinition::InputObject(InputObjectType {
            fields: input
                .fields
                .into_iter()
                .map(|field| convert_input_value(&input.name, field))
                .collect::<Result<_, _>>()?,
            name: input.name,
            directives: Vec::new(),
        }),
    };
    Ok(definition)
}

fn convert_fields(
    type_name: &str,
    fields: Vec<cynic_introspection::Field>,
) -> Result<Vec<FieldDefinition>, IntrospectionError> {
    fields
        .into_iter()
        .map(|field| {
            let context = format!("{type_name}.{}", field.name);
            Ok(FieldDefinition {
                ty: convert_type_ref(&context, &field.ty)?,
                arguments: field
                    .args
                    .into_iter()
                    .map(|arg| convert_input_value(&context, arg))
                    .collect::<Result<_, _>>()?,
                directives: deprecation(field.deprecated),
                name: field.name,
            })
        })
        .collect()
}

fn convert_input_value(
    parent: &str,
    value: cynic_introspection::InputValue,
) -> Result<InputValueDefinition, IntrospectionError> {
    let context = format!("{parent}.{}", value.name);
    let default_value = value
        .default_value
        .as_deref()
        .map(Value::parse)
        .transpose()
        .map_err(|source| IntrospectionError::DefaultValue {
            context: context.clone(),
            source,
        })?;

    Ok(InputValueDefinition {
        ty: convert_type_ref(&context, &value.ty)?,
        name: value.name,
        default_value,
        directives: Vec::new(),
    })
}

/// Goes through the printed form (`[String!]!`) of the decoded reference.
fn convert_type_ref(context: &str, ty: &impl fmt::Display) -> Result<TypeRef, IntrospectionError> {
    ty.to_string()
        .parse()
        .map_err(|source| IntrospectionError::MalformedTypeRef {
            context: context.to_string(),
            source,
        })
}

/// Deprecation is the only directive information introspection carries;
/// it becomes a `@deprecated` application so directive enforcement sees it.
fn deprecation(deprecated: Deprecated) -> Vec<Directive> {
    match deprecated {
        Deprecated::No => Vec::new(),
        Deprecated::Yes(None) => vec![Directive::new(DEPRECATED_DIRECTIVE)],
        Deprecated::Yes(Some(reason)) => vec![
            Directive::new(DEPRECATED_DIRECTIVE).with_argument("reason", Value::String(reason)),
        ],
    }
}
