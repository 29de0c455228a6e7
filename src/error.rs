//! Error types for the library layer.
//!
//! Differences between schemas are never errors, they are reported as
//! [`DiffEvent`](crate::compat::DiffEvent)s. The errors here cover malformed
//! inputs and internally inconsistent documents.

use thiserror::Error;

/// A type reference in GraphQL notation could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid type reference '{input}': {reason}")]
pub struct TypeRefParseError {
    pub input: String,
    pub reason: &'static str,
}

impl TypeRefParseError {
    pub(crate) fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A GraphQL literal (e.g. an introspected `defaultValue`) could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid literal '{input}': {reason}")]
pub struct ValueParseError {
    pub input: String,
    pub reason: String,
}

/// Failure converting an introspection result into a type-system document.
#[derive(Error, Debug)]
pub enum IntrospectionError {
    /// The payload is not JSON, or does not have the introspection shape.
    #[error("malformed introspection payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither `__schema` nor `data.__schema` is present.
    #[error("introspection payload has no '__schema' object")]
    MissingSchema,

    /// The payload decoded but does not describe a consistent schema.
    #[error("invalid introspection schema: {0}")]
    Schema(String),

    /// A decoded type reference does not read back as a valid reference.
    #[error("malformed type reference in '{context}': {source}")]
    MalformedTypeRef {
        context: String,
        #[source]
        source: TypeRefParseError,
    },

    /// A `defaultValue` string is not a valid GraphQL literal.
    #[error("invalid default value for '{context}': {source}")]
    DefaultValue {
        context: String,
        #[source]
        source: ValueParseError,
    },

    /// An object claims to implement something that is not an interface of the same schema.
    #[error("type '{type_name}' implements unknown interface '{interface}'")]
    UnknownInterface { type_name: String, interface: String },
}

/// Precondition violations detected while diffing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A type declares an interface that its own document does not define.
    #[error("type '{type_name}' implements '{interface}', which is not an interface in the old schema")]
    UnresolvedInterface { type_name: String, interface: String },
}
