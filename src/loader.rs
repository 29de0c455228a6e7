//! Loads a schema from a local introspection file or a live endpoint.

use anyhow::Context;
use cynic::QueryBuilder;
use cynic_introspection::IntrospectionQuery;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::document::TypeSystemDocument;

/// Where a schema comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaLocation {
    /// A file holding an introspection result as JSON
    File(PathBuf),
    /// A GraphQL endpoint that answers the introspection query
    Url(String),
}

impl FromStr for SchemaLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(SchemaLocation::Url(s.to_string()))
        } else {
            Ok(SchemaLocation::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaLocation::File(path) => write!(f, "{}", path.display()),
            SchemaLocation::Url(url) => f.write_str(url),
        }
    }
}

/// Reads and converts the schema at `location`.
pub fn load_document(location: &SchemaLocation) -> anyhow::Result<TypeSystemDocument> {
    tracing::debug!(%location, "loading schema");

    let document = match location {
        SchemaLocation::File(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read schema file '{}'", path.display()))?;
            TypeSystemDocument::from_introspection_str(&content)
                .with_context(|| format!("Invalid introspection result in '{}'", path.display()))?
        }
        SchemaLocation::Url(url) => {
            let response = introspect(url)?;
            TypeSystemDocument::from_introspection_value(&response)
                .with_context(|| format!("Invalid introspection result from '{url}'"))?
        }
    };

    tracing::debug!(%location, types = document.types.len(), "schema loaded");
    Ok(document)
}

fn introspect(url: &str) -> anyhow::Result<serde_json::Value> {
    let client = reqwest::blocking::Client::new();
    let response = client
        .post(url)
        .json(&IntrospectionQuery::build(()))
        .send()
        .with_context(|| format!("Failed to send introspection query to '{url}'"))?
        .error_for_status()
        .with_context(|| format!("Introspection query to '{url}' was rejected"))?;

    let body: serde_json::Value = response
        .json()
        .with_context(|| format!("Failed to decode introspection response from '{url}'"))?;

    if let Some(errors) = body.get("errors").filter(|errors| !errors.is_null()) {
        tracing::warn!(url, %errors, "introspection response carried errors");
    }
    Ok(body)
}
