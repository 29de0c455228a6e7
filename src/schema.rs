//! Provides the high-level Schema API for comparing GraphQL schemas.

use anyhow::Context;

use crate::compat::{DiffOptions, DiffResult, SchemaDiff};
use crate::document::TypeSystemDocument;
use crate::error::DiffError;
use crate::generate_fingerprint;
use crate::loader::{SchemaLocation, load_document};

/// The result of a compatibility comparison between two schemas.
#[derive(Debug, PartialEq, Eq)]
pub enum Compatibility {
    /// The two schemas are semantically identical.
    Green,
    /// The new schema differs but existing clients keep working (e.g., a new field was added).
    Yellow,
    /// The new schema breaks existing clients (e.g., a field was removed or made non-null).
    Red,
}

/// Represents a single schema version, holding its document and fingerprint.
#[derive(Debug, Clone)]
pub struct Schema {
    /// The converted type system document.
    pub document: TypeSystemDocument,
    /// The exact semantic fingerprint.
    pub fingerprint: String,
}

impl Schema {
    /// Creates a new `Schema` from introspection JSON.
    ///
    /// This converts and fingerprints the document, so it should be called
    /// once per schema.
    pub fn try_from(json: &str) -> anyhow::Result<Self> {
        let document = TypeSystemDocument::from_introspection_str(json)
            .context("Failed to convert introspection result")?;
        Self::from_document(document)
    }

    pub fn from_document(document: TypeSystemDocument) -> anyhow::Result<Self> {
        let fingerprint = generate_fingerprint(&document)?;
        Ok(Schema {
            document,
            fingerprint,
        })
    }

    /// Loads a schema from a file or a live endpoint.
    pub fn load(location: &SchemaLocation) -> anyhow::Result<Self> {
        Self::from_document(load_document(location)?)
    }

    /// Compares this `Schema` (the "old" version) with another `Schema` (the
    /// "new" version) to determine their compatibility level.
    pub fn compare_with(&self, new_schema: &Schema) -> Result<Compatibility, DiffError> {
        // If the exact fingerprints are identical, the schemas are semantically identical.
        if self.fingerprint == new_schema.fingerprint {
            return Ok(Compatibility::Green);
        }

        if self.check_breaking_changes(new_schema)?.has_breaking_changes {
            Ok(Compatibility::Red)
        } else {
            Ok(Compatibility::Yellow)
        }
    }

    /// Runs the difference engine with default options.
    pub fn check_breaking_changes(&self, new_schema: &Schema) -> Result<DiffResult, DiffError> {
        self.check_breaking_changes_with_options(new_schema, &DiffOptions::default())
    }

    pub fn check_breaking_changes_with_options(
        &self,
        new_schema: &Schema,
        options: &DiffOptions,
    ) -> Result<DiffResult, DiffError> {
        SchemaDiff::new(options.clone()).check(&self.document, &new_schema.document)
    }
}
