//! The type-reference compatibility rule.
//!
//! A new reference is compatible with an old one when every value a client
//! could previously rely on is still expressible: the base type is the same,
//! list nesting is unchanged, and nullability has only been relaxed.

use crate::compat::DiffCategory;
use crate::type_ref::{TypeRef, Wrapper};

/// Checks whether `new` can replace `old`.
///
/// Returns `None` when compatible, [`DiffCategory::Invalid`] for a different
/// base type or list shape, and [`DiffCategory::Stricter`] when a nullable
/// position became non-null.
pub fn check_compatibility(old: &TypeRef, new: &TypeRef) -> Option<DiffCategory> {
    if old.name() != new.name() {
        return Some(DiffCategory::Invalid);
    }

    // Wrapper stacks are innermost first; walk them from the end.
    let mut old_layers = old.wrappers();
    let mut new_layers = new.wrappers();

    loop {
        match (old_layers.last(), new_layers.last()) {
            (Some(Wrapper::NonNull), Some(Wrapper::NonNull)) => {
                old_layers = strip(old_layers);
                new_layers = strip(new_layers);
            }
            (Some(Wrapper::NonNull), _) => {
                old_layers = strip(old_layers);
            }
            (_, Some(Wrapper::NonNull)) => return Some(DiffCategory::Stricter),
            _ => {}
        }

        match (old_layers.last(), new_layers.last()) {
            (Some(Wrapper::List), Some(Wrapper::List)) => {
                old_layers = strip(old_layers);
                new_layers = strip(new_layers);
            }
            (None, None) => return None,
            // Only reachable with doubled NonNull layers; the next pass handles them.
            (Some(Wrapper::NonNull), _) | (_, Some(Wrapper::NonNull)) => {}
            _ => return Some(DiffCategory::Invalid),
        }
    }
}

fn strip(layers: &[Wrapper]) -> &[Wrapper] {
    &layers[..layers.len().saturating_sub(1)]
}
