//! Tests for loading schemas from the filesystem

use graphql_sign::loader::{SchemaLocation, load_document};
use graphql_sign::schema::Schema;
use std::fs;

#[test]
fn test_load_document_from_file() {
    let location: SchemaLocation = "tests/data/petstore.json".parse().unwrap();

    let document = load_document(&location).expect("Failed to load petstore schema");

    assert!(document.type_definition("Pet").is_some());
    assert!(document.type_definition("PetInput").is_some());
}

#[test]
fn test_load_schema_matches_in_memory_conversion() {
    let location: SchemaLocation = "tests/data/petstore.json".parse().unwrap();
    let content = fs::read_to_string("tests/data/petstore.json").expect("Could not read fixture");

    let loaded = Schema::load(&location).expect("Failed to load schema");
    let parsed = Schema::try_from(&content).expect("Failed to parse schema");

    assert_eq!(loaded.fingerprint, parsed.fingerprint);
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("missing.json");
    let location = SchemaLocation::File(path.clone());

    let error = load_document(&location).expect_err("Missing file should fail");

    assert!(
        format!("{error:#}").contains(&path.display().to_string()),
        "Error should name the file: {error:#}"
    );
}

#[test]
fn test_invalid_json_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("Failed to write fixture");

    assert!(load_document(&SchemaLocation::File(path)).is_err());
}
