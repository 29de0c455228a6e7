//! Normalized GraphQL type references.
//!
//! A reference such as `[String!]!` is stored as its base name (`String`) plus
//! the stack of wrappers around it, innermost first:
//! `[NonNull, List, NonNull]`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeRefParseError;

/// One wrapping layer around a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wrapper {
    List,
    NonNull,
}

/// A named type plus zero or more `List`/`NonNull` wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    name: String,
    /// Innermost first, so the last element is the outermost layer.
    wrappers: Vec<Wrapper>,
}

impl TypeRef {
    /// A bare named type, e.g. `String`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wrappers: Vec::new(),
        }
    }

    /// Wraps the current reference in `NonNull`.
    pub fn non_null(mut self) -> Self {
        self.wrappers.push(Wrapper::NonNull);
        self
    }

    /// Wraps the current reference in `List`.
    pub fn list(mut self) -> Self {
        self.wrappers.push(Wrapper::List);
        self
    }

    /// The base type name, with all wrappers removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrappers(&self) -> &[Wrapper] {
        &self.wrappers
    }

    pub fn outermost(&self) -> Option<Wrapper> {
        self.wrappers.last().copied()
    }

    pub fn is_non_null(&self) -> bool {
        self.outermost() == Some(Wrapper::NonNull)
    }

    pub fn is_list(&self) -> bool {
        self.outermost() == Some(Wrapper::List)
    }

    pub fn is_named(&self) -> bool {
        self.wrappers.is_empty()
    }

    /// Strips the outermost wrapper. A bare named type is returned unchanged.
    pub fn unwrap_one(&self) -> TypeRef {
        let mut inner = self.clone();
        inner.wrappers.pop();
        inner
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = self.name.clone();
        for wrapper in &self.wrappers {
            rendered = match wrapper {
                Wrapper::List => format!("[{rendered}]"),
                Wrapper::NonNull => format!("{rendered}!"),
            };
        }
        f.write_str(&rendered)
    }
}

impl FromStr for TypeRef {
    type Err = TypeRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut outer_first = Vec::new();
        let mut rest = s.trim();

        loop {
            if let Some(inner) = rest.strip_suffix('!') {
                if inner.ends_with('!') {
                    return Err(TypeRefParseError::new(s, "double non-null marker"));
                }
                outer_first.push(Wrapper::NonNull);
                rest = inner.trim_end();
            } else if let Some(inner) = rest.strip_prefix('[') {
                let inner = inner
                    .strip_suffix(']')
                    .ok_or_else(|| TypeRefParseError::new(s, "unbalanced list brackets"))?;
                outer_first.push(Wrapper::List);
                rest = inner.trim();
            } else {
                break;
            }
        }

        let is_name = !rest.is_empty()
            && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !rest.starts_with(|c: char| c.is_ascii_digit());
        if !is_name {
            return Err(TypeRefParseError::new(s, "expected a type name"));
        }

        outer_first.reverse();
        Ok(TypeRef {
            name: rest.to_string(),
            wrappers: outer_first,
        })
    }
}
