use graphql_sign::schema::{Compatibility, Schema};
use graphql_sign::{TypeSystemDocument, generate_fingerprint};
use std::fs;

fn read_schema(file_name: &str) -> String {
    fs::read_to_string(format!("tests/data/{file_name}")).expect("Could not read test schema file")
}

fn load(file_name: &str) -> Schema {
    Schema::try_from(&read_schema(file_name)).expect("Failed to parse schema")
}

#[test]
fn test_fingerprint_consistency_for_identical_files() {
    let content1 = read_schema("petstore.json");
    let content2 = read_schema("petstore.json");

    let document1 = TypeSystemDocument::from_introspection_str(&content1).unwrap();
    let document2 = TypeSystemDocument::from_introspection_str(&content2).unwrap();

    assert_eq!(
        generate_fingerprint(&document1).unwrap(),
        generate_fingerprint(&document2).unwrap()
    );
}

#[test]
fn test_fingerprint_ignores_declaration_order() {
    let schema = load("petstore.json");
    let reordered = load("petstore_reordered.json");

    assert_eq!(schema.fingerprint, reordered.fingerprint);
}

#[test]
fn test_fingerprint_detects_semantic_change() {
    let schema = load("petstore.json");
    let additive = load("petstore_additive.json");
    let breaking = load("petstore_breaking.json");

    assert_ne!(schema.fingerprint, additive.fingerprint);
    assert_ne!(schema.fingerprint, breaking.fingerprint);
}

#[test]
fn test_fingerprint_is_hex_sha256() {
    let schema = load("petstore.json");

    assert_eq!(schema.fingerprint.len(), 64);
    assert!(schema.fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_compare_identical_schemas_is_green() {
    let old = load("petstore.json");
    let new = load("petstore_reordered.json");

    assert_eq!(old.compare_with(&new).unwrap(), Compatibility::Green);
}

#[test]
fn test_compare_additive_change_is_yellow() {
    let old = load("petstore.json");
    let new = load("petstore_additive.json");

    assert_eq!(old.compare_with(&new).unwrap(), Compatibility::Yellow);

    let result = old.check_breaking_changes(&new).unwrap();
    assert!(!result.has_breaking_changes);
    assert_eq!(result.dangerous_count, 1, "New enum value should be dangerous");
    assert_eq!(result.summary.get("ADDITION"), Some(&1));
}

#[test]
fn test_compare_breaking_change_is_red() {
    let old = load("petstore.json");
    let new = load("petstore_breaking.json");

    assert_eq!(old.compare_with(&new).unwrap(), Compatibility::Red);

    let result = old.check_breaking_changes(&new).unwrap();
    assert!(result.has_breaking_changes);
    assert_eq!(result.breaking_count, 2);
    assert_eq!(result.summary.get("MISSING"), Some(&1));
    assert_eq!(result.summary.get("INVALID"), Some(&1));
    assert!(
        result
            .breakages()
            .any(|e| e.object_name() == "Pet.name"),
        "Removed field should be reported"
    );
}

#[test]
fn test_reverse_direction_of_additive_change_breaks() {
    let old = load("petstore_additive.json");
    let new = load("petstore.json");

    let result = old.check_breaking_changes(&new).unwrap();

    // Pet.birthday and Status.ADOPTED disappear
    assert_eq!(result.breaking_count, 2);
}
