pub mod canonical;
pub mod compat;
pub mod compatibility;
pub mod document;
pub mod error;
pub mod introspection;
pub mod loader;
pub mod normalize;
pub mod schema;
pub mod type_ref;
pub mod value;

pub use compat::{
    CapturingSink, ChainedSink, CountingSink, DiffCategory, DiffEvent, DiffLevel, DiffLocation,
    DiffOptions, DiffResult, EventSink, PrintingSink, SchemaDiff, diff_schema,
};
pub use document::{OperationType, TypeDefinition, TypeKind, TypeSystemDocument};
pub use error::{DiffError, IntrospectionError};
pub use loader::{SchemaLocation, load_document};
pub use schema::{Compatibility, Schema};
pub use type_ref::TypeRef;
pub use value::Value;

use anyhow::Context;
use sha2::{Digest, Sha256};

/// Generates a semantic fingerprint for a type system document.
///
/// The fingerprint is a SHA-256 hash of the document's canonical, semantic
/// representation. This means it is insensitive to the order in which types,
/// fields, arguments, enum values and directives were declared.
///
/// # Returns
///
/// A `Result` containing the hex-encoded SHA-256 fingerprint string,
/// or an error if serialization fails.
pub fn generate_fingerprint(document: &TypeSystemDocument) -> anyhow::Result<String> {
    // 1. Normalize the document into our canonical representation.
    let canonical = normalize::normalize_document(document);

    // 2. Serialize the canonical representation to a stable JSON string.
    let json_string = serde_json::to_string_pretty(&canonical)
        .context("Failed to serialize canonical representation to JSON")?;

    // 3. Compute the SHA-256 hash of the JSON string.
    let mut hasher = Sha256::new();
    hasher.update(json_string.as_bytes());
    let hash_result = hasher.finalize();

    Ok(format!("{:x}", hash_result))
}
