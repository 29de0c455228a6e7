//! Difference categories describing how the new schema changed

use serde::{Deserialize, Serialize};

/// Classification of a non-informational difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffCategory {
    /// The new API is missing something
    Missing,
    /// The new API has become stricter for existing clients
    Stricter,
    /// The new API has an invalid structure
    Invalid,
    /// The new API has added something
    Addition,
    /// The new API has changed something
    Different,
}

impl DiffCategory {
    /// Get the string identifier for this category
    pub fn id(&self) -> &'static str {
        match self {
            DiffCategory::Missing => "MISSING",
            DiffCategory::Stricter => "STRICTER",
            DiffCategory::Invalid => "INVALID",
            DiffCategory::Addition => "ADDITION",
            DiffCategory::Different => "DIFFERENT",
        }
    }

    /// Get the description for this category
    pub fn description(&self) -> &'static str {
        match self {
            DiffCategory::Missing => "The new API is missing something the old API had.",
            DiffCategory::Stricter => {
                "The new API has become stricter for existing clients."
            }
            DiffCategory::Invalid => {
                "The new API has changed the shape of something in an incompatible way."
            }
            DiffCategory::Addition => "The new API has added something.",
            DiffCategory::Different => "The new API has changed a value.",
        }
    }

    /// Parse category from string ID
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "MISSING" => Some(DiffCategory::Missing),
            "STRICTER" => Some(DiffCategory::Stricter),
            "INVALID" => Some(DiffCategory::Invalid),
            "ADDITION" => Some(DiffCategory::Addition),
            "DIFFERENT" => Some(DiffCategory::Different),
            _ => None,
        }
    }

    /// Get all available categories
    pub fn all() -> Vec<Self> {
        vec![
            DiffCategory::Missing,
            DiffCategory::Stricter,
            DiffCategory::Invalid,
            DiffCategory::Addition,
            DiffCategory::Different,
        ]
    }
}

impl std::fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl std::str::FromStr for DiffCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| format!("Unknown difference category: {s}"))
    }
}
