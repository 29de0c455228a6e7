//! Core types for difference reporting

use serde::Serialize;
use std::fmt;

use crate::compat::categories::DiffCategory;
pub use crate::document::TypeKind;

/// Severity of a difference event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffLevel {
    /// Progress information from the engine
    Info,
    /// The new API has made a breaking change
    Breaking,
    /// The new API has made a dangerous (but non breaking) change
    Dangerous,
}

impl fmt::Display for DiffLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiffLevel::Info => "INFO",
            DiffLevel::Breaking => "BREAKING",
            DiffLevel::Dangerous => "DANGEROUS",
        })
    }
}

/// Where in the schema a difference was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLocation {
    /// Name of the type being compared
    pub type_name: String,
    /// Field (or operation keyword) inside that type, if any
    pub field_name: Option<String>,
    /// Kind of the type, when known
    pub type_kind: Option<TypeKind>,
}

/// One detected difference between the old and the new schema.
///
/// Events are immutable once built. They can only be created through
/// [`DiffEvent::info`], [`DiffEvent::breaking`] and [`DiffEvent::dangerous`],
/// which guarantees that informational events never carry a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEvent {
    level: DiffLevel,
    category: Option<DiffCategory>,
    type_name: String,
    field_name: Option<String>,
    type_kind: Option<TypeKind>,
    components: Vec<String>,
    reason_msg: String,
}

impl DiffEvent {
    pub fn info(location: DiffLocation, reason_msg: impl Into<String>) -> Self {
        Self::new(DiffLevel::Info, None, location, Vec::new(), reason_msg.into())
    }

    pub fn breaking(
        category: DiffCategory,
        location: DiffLocation,
        components: Vec<String>,
        reason_msg: impl Into<String>,
    ) -> Self {
        Self::new(
            DiffLevel::Breaking,
            Some(category),
            location,
            components,
            reason_msg.into(),
        )
    }

    pub fn dangerous(
        category: DiffCategory,
        location: DiffLocation,
        components: Vec<String>,
        reason_msg: impl Into<String>,
    ) -> Self {
        Self::new(
            DiffLevel::Dangerous,
            Some(category),
            location,
            components,
            reason_msg.into(),
        )
    }

    fn new(
        level: DiffLevel,
        category: Option<DiffCategory>,
        location: DiffLocation,
        components: Vec<String>,
        reason_msg: String,
    ) -> Self {
        let DiffLocation {
            type_name,
            field_name,
            type_kind,
        } = location;
        Self {
            level,
            category,
            type_name,
            field_name,
            type_kind,
            components,
            reason_msg,
        }
    }

    pub fn level(&self) -> DiffLevel {
        self.level
    }

    /// Always `None` for [`DiffLevel::Info`] events.
    pub fn category(&self) -> Option<DiffCategory> {
        self.category
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    pub fn type_kind(&self) -> Option<TypeKind> {
        self.type_kind
    }

    /// Old/new values or names involved in the change, in a fixed order per message.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn reason_msg(&self) -> &str {
        &self.reason_msg
    }

    pub fn is_breaking(&self) -> bool {
        self.level == DiffLevel::Breaking
    }

    pub fn is_dangerous(&self) -> bool {
        self.level == DiffLevel::Dangerous
    }

    /// `Type` or `Type.field`
    pub fn object_name(&self) -> String {
        match &self.field_name {
            Some(field) => format!("{}.{}", self.type_name, field),
            None => self.type_name.clone(),
        }
    }
}

impl fmt::Display for DiffEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self
            .type_kind
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "{} - '{}' : '{}' : {}",
            self.level,
            kind,
            self.object_name(),
            self.reason_msg
        )
    }
}
