use serde::Serialize;

// Note: Using BTreeSet for sorted, unique collections.
// This requires `Ord` to be derived.
use std::collections::{BTreeMap, BTreeSet};

//==============================================================================
// Structs for Exact Semantic Fingerprinting
//==============================================================================

/// Represents the semantically significant content of a type system document.
#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutation_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub types: BTreeSet<CanonicalType>,
}

/// One named type. Members that do not apply to its kind stay empty.
#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalType {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub fields: BTreeSet<CanonicalField>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub interfaces: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub members: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub values: BTreeSet<CanonicalEnumValue>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub input_fields: BTreeSet<CanonicalInputValue>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub directives: BTreeSet<CanonicalDirective>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub arguments: BTreeSet<CanonicalInputValue>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub directives: BTreeSet<CanonicalDirective>,
}

/// An argument or input field.
#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalInputValue {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>, // GraphQL literal text
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub directives: BTreeSet<CanonicalDirective>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalEnumValue {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub directives: BTreeSet<CanonicalDirective>,
}

#[derive(Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct CanonicalDirective {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub arguments: BTreeMap<String, String>,
}
