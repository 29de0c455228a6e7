//! Converts a `TypeSystemDocument` into the order-insensitive
//! `CanonicalDocument` representation used for fingerprinting.

use crate::canonical::{
    CanonicalDirective, CanonicalDocument, CanonicalEnumValue, CanonicalField, CanonicalInputValue,
    CanonicalType,
};
use crate::document::{
    Directive, FieldDefinition, InputValueDefinition, OperationType, TypeDefinition,
    TypeSystemDocument,
};

pub fn normalize_document(document: &TypeSystemDocument) -> CanonicalDocument {
    // Effective roots, so an implicit schema definition and the equivalent
    // explicit one fingerprint the same.
    let root = |operation: OperationType| document.root_type_name(operation).map(str::to_string);

    CanonicalDocument {
        query_type: root(OperationType::Query),
        mutation_type: root(OperationType::Mutation),
        subscription_type: root(OperationType::Subscription),
        types: document.types.values().map(normalize_type).collect(),
    }
}

fn normalize_type(definition: &TypeDefinition) -> CanonicalType {
    let mut canonical_type = CanonicalType {
        name: definition.name().to_string(),
        kind: definition.kind().to_string(),
        directives: normalize_directives(definition.directives()),
        ..Default::default()
    };

    match definition {
        TypeDefinition::Object(object) => {
            canonical_type.fields = object.fields.iter().map(normalize_field).collect();
            canonical_type.interfaces = object.interfaces.iter().cloned().collect();
        }
        TypeDefinition::Interface(interface) => {
            canonical_type.fields = interface.fields.iter().map(normalize_field).collect();
        }
        TypeDefinition::Union(union_type) => {
            canonical_type.members = union_type.members.iter().cloned().collect();
        }
        TypeDefinition::Enum(enum_type) => {
            canonical_type.values = enum_type
                .values
                .iter()
                .map(|value| CanonicalEnumValue {
                    name: value.name.clone(),
                    directives: normalize_directives(&value.directives),
                })
                .collect();
        }
        TypeDefinition::InputObject(input) => {
            canonical_type.input_fields = input.fields.iter().map(normalize_input_value).collect();
        }
        TypeDefinition::Scalar(_) => {}
    }

    canonical_type
}

fn normalize_field(field: &FieldDefinition) -> CanonicalField {
    CanonicalField {
        name: field.name.clone(),
        type_ref: field.ty.to_string(),
        arguments: field.arguments.iter().map(normalize_input_value).collect(),
        directives: normalize_directives(&field.directives),
    }
}

fn normalize_input_value(input: &InputValueDefinition) -> CanonicalInputValue {
    CanonicalInputValue {
        name: input.name.clone(),
        type_ref: input.ty.to_string(),
        default_value: input.default_value.as_ref().map(|value| value.to_string()),
        directives: normalize_directives(&input.directives),
    }
}

fn normalize_directives(directives: &[Directive]) -> std::collections::BTreeSet<CanonicalDirective> {
    directives
        .iter()
        .map(|directive| CanonicalDirective {
            name: directive.name.clone(),
            arguments: directive
                .arguments
                .iter()
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObjectType;
    use crate::type_ref::TypeRef;

    #[test]
    fn test_implicit_and_explicit_roots_match() {
        let query = TypeDefinition::Object(ObjectType {
            name: "Query".to_string(),
            fields: vec![FieldDefinition::new("version", TypeRef::named("String"))],
            interfaces: Vec::new(),
            directives: Vec::new(),
        });
        let implicit = TypeSystemDocument::new().with_type(query.clone());
        let mut explicit = TypeSystemDocument::new().with_type(query);
        explicit.query_type = Some("Query".to_string());

        assert_eq!(normalize_document(&implicit), normalize_document(&explicit));
    }
}
