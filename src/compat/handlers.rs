//! Per-kind comparers implementing the actual difference detection
//!
//! Every comparer receives the old and new definition of one type and
//! reports what changed. Members are visited in name order so the event
//! sequence is deterministic. Field types are always followed back into the
//! engine with [`check_type`]; argument and input field types only when they
//! stayed compatible.

use crate::compat::categories::DiffCategory;
use crate::compat::engine::{DiffContext, check_type};
use crate::compat::types::{DiffEvent, DiffLocation, TypeKind};
use crate::compatibility::check_compatibility;
use crate::document::{
    Directive, EnumType, FieldDefinition, InputObjectType, InputValueDefinition, InterfaceType,
    ObjectType, ScalarType, UnionType,
};
use crate::error::DiffError;
use crate::type_ref::TypeRef;
use crate::value::Value;
use std::collections::{BTreeMap, BTreeSet};

// ============================================================================
// LOCATION HELPERS
// ============================================================================

/// Helper function to create a type-level location
pub fn create_location(type_name: &str, type_kind: Option<TypeKind>) -> DiffLocation {
    DiffLocation {
        type_name: type_name.to_string(),
        field_name: None,
        type_kind,
    }
}

/// Helper function to create a field-level location
pub fn create_field_location(type_name: &str, type_kind: TypeKind, field_name: &str) -> DiffLocation {
    DiffLocation {
        type_name: type_name.to_string(),
        field_name: Some(field_name.to_string()),
        type_kind: Some(type_kind),
    }
}

/// The type whose members are being compared.
#[derive(Clone, Copy)]
struct Owner<'n> {
    name: &'n str,
    kind: TypeKind,
}

impl Owner<'_> {
    fn location(&self) -> DiffLocation {
        create_location(self.name, Some(self.kind))
    }

    fn field_location(&self, field_name: &str) -> DiffLocation {
        create_field_location(self.name, self.kind, field_name)
    }
}

/// Indexes definitions by name. On duplicate names the last one wins.
fn by_name<T, F>(items: &[T], name: F) -> BTreeMap<&str, &T>
where
    F: Fn(&T) -> &str,
{
    items.iter().map(|item| (name(item), item)).collect()
}

// ============================================================================
// OBJECTS AND INTERFACES
// ============================================================================

pub(crate) fn compare_object(
    ctx: &mut DiffContext<'_, '_>,
    old: &ObjectType,
    new: &ObjectType,
) -> Result<(), DiffError> {
    let owner = Owner {
        name: &old.name,
        kind: TypeKind::Object,
    };
    compare_fields(ctx, owner, &old.fields, &new.fields)?;
    compare_implements(ctx, old, new)?;
    compare_directives(ctx, &owner.location(), &old.directives, &new.directives);
    Ok(())
}

pub(crate) fn compare_interface(
    ctx: &mut DiffContext<'_, '_>,
    old: &InterfaceType,
    new: &InterfaceType,
) -> Result<(), DiffError> {
    let owner = Owner {
        name: &old.name,
        kind: TypeKind::Interface,
    };
    compare_fields(ctx, owner, &old.fields, &new.fields)?;
    compare_directives(ctx, &owner.location(), &old.directives, &new.directives);
    Ok(())
}

/// Every interface the old object implements must still be implemented, and
/// its definition is compared directly.
fn compare_implements(
    ctx: &mut DiffContext<'_, '_>,
    old: &ObjectType,
    new: &ObjectType,
) -> Result<(), DiffError> {
    let (old_doc, new_doc) = (ctx.old, ctx.new);
    let old_names: BTreeSet<&str> = old.interfaces.iter().map(String::as_str).collect();
    let new_names: BTreeSet<&str> = new.interfaces.iter().map(String::as_str).collect();

    for name in old_names {
        let old_interface =
            old_doc
                .interface(name)
                .ok_or_else(|| DiffError::UnresolvedInterface {
                    type_name: old.name.clone(),
                    interface: name.to_string(),
                })?;

        let new_interface = if new_names.contains(name) {
            new_doc.interface(name)
        } else {
            None
        };

        match new_interface {
            Some(new_interface) => compare_interface(ctx, old_interface, new_interface)?,
            None => ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                create_location(&old.name, Some(TypeKind::Object)),
                vec![name.to_string()],
                format!("The new API is missing the interface named '{name}'"),
            )),
        }
    }
    Ok(())
}

fn compare_fields(
    ctx: &mut DiffContext<'_, '_>,
    owner: Owner<'_>,
    old_fields: &[FieldDefinition],
    new_fields: &[FieldDefinition],
) -> Result<(), DiffError> {
    let old_fields = by_name(old_fields, |f| f.name.as_str());
    let new_fields = by_name(new_fields, |f| f.name.as_str());

    for (name, old_field) in old_fields {
        ctx.report(DiffEvent::info(
            owner.field_location(name),
            format!("field '{name}' ..."),
        ));

        match new_fields.get(name) {
            Some(new_field) => compare_field(ctx, owner, old_field, new_field)?,
            None => ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                owner.field_location(name),
                Vec::new(),
                format!("The new API is missing the field '{name}'"),
            )),
        }
    }
    Ok(())
}

fn compare_field(
    ctx: &mut DiffContext<'_, '_>,
    owner: Owner<'_>,
    old: &FieldDefinition,
    new: &FieldDefinition,
) -> Result<(), DiffError> {
    if let Some(category) = check_compatibility(&old.ty, &new.ty) {
        ctx.report(DiffEvent::breaking(
            category,
            owner.field_location(&old.name),
            vec![old.ty.to_string(), new.ty.to_string()],
            format!(
                "The new API has changed field '{}' from type '{}' to '{}'",
                old.name, old.ty, new.ty
            ),
        ));
    }

    compare_arguments(ctx, owner, old, new)?;
    compare_directives(
        ctx,
        &owner.field_location(&old.name),
        &old.directives,
        &new.directives,
    );

    check_type(ctx, &old.ty, &new.ty)
}

// ============================================================================
// ARGUMENTS
// ============================================================================

fn compare_arguments(
    ctx: &mut DiffContext<'_, '_>,
    owner: Owner<'_>,
    old_field: &FieldDefinition,
    new_field: &FieldDefinition,
) -> Result<(), DiffError> {
    let field_name = old_field.name.as_str();
    let old_args = by_name(&old_field.arguments, |a| a.name.as_str());
    let new_args = by_name(&new_field.arguments, |a| a.name.as_str());

    if old_args.len() > new_args.len() {
        ctx.report(DiffEvent::breaking(
            DiffCategory::Missing,
            owner.field_location(field_name),
            Vec::new(),
            format!(
                "The new API has less arguments on field '{field_name}' of type '{}' than the old API",
                owner.name
            ),
        ));
        return Ok(());
    }

    for (name, old_arg) in &old_args {
        ctx.report(DiffEvent::info(
            owner.field_location(field_name),
            format!("field argument '{name}' ..."),
        ));

        match new_args.get(name) {
            Some(new_arg) => compare_argument(ctx, owner, field_name, old_arg, new_arg)?,
            None => ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                owner.field_location(field_name),
                vec![name.to_string()],
                format!("The new API is missing the field argument '{name}'"),
            )),
        }
    }

    for (name, new_arg) in &new_args {
        if !old_args.contains_key(name) && is_required(new_arg) {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Stricter,
                owner.field_location(field_name),
                vec![name.to_string()],
                format!(
                    "The new API has made the new argument '{name}' on field '{field_name}' non null and hence more strict for old consumers"
                ),
            ));
        }
    }
    Ok(())
}

fn compare_argument(
    ctx: &mut DiffContext<'_, '_>,
    owner: Owner<'_>,
    field_name: &str,
    old: &InputValueDefinition,
    new: &InputValueDefinition,
) -> Result<(), DiffError> {
    let location = owner.field_location(field_name);

    // Retyped inputs are not followed, so the old input type stays unexamined.
    match check_compatibility(&old.ty, &new.ty) {
        Some(category) => ctx.report(DiffEvent::breaking(
            category,
            location.clone(),
            vec![old.ty.to_string(), new.ty.to_string()],
            format!(
                "The new API has changed field '{field_name}' argument '{}' from type '{}' to '{}'",
                old.name, old.ty, new.ty
            ),
        )),
        None => check_type(ctx, &old.ty, &new.ty)?,
    }

    compare_default_values(
        ctx,
        &location,
        &format!("argument '{}' on field '{field_name}'", old.name),
        old,
        new,
    );
    compare_directives(ctx, &location, &old.directives, &new.directives);
    Ok(())
}

/// A new input without a default that clients must now supply.
fn is_required(input: &InputValueDefinition) -> bool {
    input.ty.is_non_null() && input.default_value.is_none()
}

/// Default values may not change literal kind, and any other change is
/// reported as dangerous since client behavior silently shifts.
fn compare_default_values(
    ctx: &mut DiffContext<'_, '_>,
    location: &DiffLocation,
    subject: &str,
    old: &InputValueDefinition,
    new: &InputValueDefinition,
) {
    let (old_default, new_default) = (old.default_value.as_ref(), new.default_value.as_ref());

    if let (Some(old_value), Some(new_value)) = (old_default, new_default) {
        let (old_kind, new_kind) = (old_value.kind(), new_value.kind());
        if old_kind != new_kind {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Invalid,
                location.clone(),
                vec![old.name.clone()],
                format!(
                    "The new API has changed default value types on {subject} from '{old_kind}' to '{new_kind}'"
                ),
            ));
        }
    }

    if old_default != new_default {
        ctx.report(DiffEvent::dangerous(
            DiffCategory::Different,
            location.clone(),
            vec![old.name.clone()],
            format!(
                "The new API has changed default value on {subject} from '{}' to '{}'",
                render_default(old_default),
                render_default(new_default)
            ),
        ));
    }
}

fn render_default(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

// ============================================================================
// UNIONS, ENUMS, INPUT OBJECTS, SCALARS
// ============================================================================

pub(crate) fn compare_union(
    ctx: &mut DiffContext<'_, '_>,
    old: &UnionType,
    new: &UnionType,
) -> Result<(), DiffError> {
    let location = create_location(&old.name, Some(TypeKind::Union));
    let old_members: BTreeSet<&str> = old.members.iter().map(String::as_str).collect();
    let new_members: BTreeSet<&str> = new.members.iter().map(String::as_str).collect();

    for member in old_members.difference(&new_members) {
        ctx.report(DiffEvent::breaking(
            DiffCategory::Missing,
            location.clone(),
            vec![member.to_string()],
            format!("The new API does not contain union member type '{member}'"),
        ));
    }
    for member in new_members.difference(&old_members) {
        ctx.report(DiffEvent::dangerous(
            DiffCategory::Addition,
            location.clone(),
            vec![member.to_string()],
            format!("The new API has added a new union member type '{member}'"),
        ));
    }

    compare_directives(ctx, &location, &old.directives, &new.directives);

    // Shared members are only reachable through the union here.
    for member in old_members.intersection(&new_members) {
        let member_ref = TypeRef::named(*member);
        check_type(ctx, &member_ref, &member_ref)?;
    }
    Ok(())
}

pub(crate) fn compare_enum(ctx: &mut DiffContext<'_, '_>, old: &EnumType, new: &EnumType) {
    let location = create_location(&old.name, Some(TypeKind::Enum));
    let old_values = by_name(&old.values, |v| v.name.as_str());
    let new_values = by_name(&new.values, |v| v.name.as_str());

    for (name, old_value) in &old_values {
        match new_values.get(name) {
            Some(new_value) => {
                compare_directives(ctx, &location, &old_value.directives, &new_value.directives)
            }
            None => ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                location.clone(),
                vec![name.to_string()],
                format!("The new API is missing an enum value '{name}'"),
            )),
        }
    }

    for name in new_values.keys() {
        if !old_values.contains_key(name) {
            ctx.report(DiffEvent::dangerous(
                DiffCategory::Addition,
                location.clone(),
                vec![name.to_string()],
                format!("The new API has added a new enum value '{name}'"),
            ));
        }
    }

    compare_directives(ctx, &location, &old.directives, &new.directives);
}

pub(crate) fn compare_input_object(
    ctx: &mut DiffContext<'_, '_>,
    old: &InputObjectType,
    new: &InputObjectType,
) -> Result<(), DiffError> {
    let owner = Owner {
        name: &old.name,
        kind: TypeKind::InputObject,
    };
    let old_fields = by_name(&old.fields, |f| f.name.as_str());
    let new_fields = by_name(&new.fields, |f| f.name.as_str());

    for (name, old_field) in &old_fields {
        let location = owner.field_location(name);
        let Some(new_field) = new_fields.get(name) else {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                location,
                Vec::new(),
                format!("The new API is missing an input field '{name}'"),
            ));
            continue;
        };

        let retyped = check_compatibility(&old_field.ty, &new_field.ty);
        if let Some(category) = retyped {
            ctx.report(DiffEvent::breaking(
                category,
                location.clone(),
                vec![old_field.ty.to_string(), new_field.ty.to_string()],
                format!(
                    "The new API has changed input field '{name}' from type '{}' to '{}'",
                    old_field.ty, new_field.ty
                ),
            ));
        }

        compare_default_values(
            ctx,
            &location,
            &format!("input field '{name}'"),
            old_field,
            new_field,
        );
        compare_directives(ctx, &location, &old_field.directives, &new_field.directives);
        if retyped.is_none() {
            check_type(ctx, &old_field.ty, &new_field.ty)?;
        }
    }

    for (name, new_field) in &new_fields {
        if !old_fields.contains_key(name) && is_required(new_field) {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Stricter,
                owner.field_location(name),
                vec![name.to_string()],
                format!(
                    "The new API has made the new input field '{name}' non null and hence more strict for old consumers"
                ),
            ));
        }
    }

    compare_directives(ctx, &owner.location(), &old.directives, &new.directives);
    Ok(())
}

pub(crate) fn compare_scalar(ctx: &mut DiffContext<'_, '_>, old: &ScalarType, new: &ScalarType) {
    let location = create_location(&old.name, Some(TypeKind::Scalar));
    compare_directives(ctx, &location, &old.directives, &new.directives);
}

// ============================================================================
// DIRECTIVES
// ============================================================================

/// Only runs when directive enforcement is enabled. Directives the new side
/// added are never reported.
fn compare_directives(
    ctx: &mut DiffContext<'_, '_>,
    location: &DiffLocation,
    old_directives: &[Directive],
    new_directives: &[Directive],
) {
    if !ctx.options.enforce_directives {
        return;
    }

    let old_directives = by_name(old_directives, |d| d.name.as_str());
    let new_directives = by_name(new_directives, |d| d.name.as_str());

    for (name, old_directive) in old_directives {
        let Some(new_directive) = new_directives.get(name) else {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                location.clone(),
                vec![name.to_string()],
                format!("The new API does not have a directive named '{name}'"),
            ));
            continue;
        };

        if old_directive.arguments.len() > new_directive.arguments.len() {
            ctx.report(DiffEvent::breaking(
                DiffCategory::Missing,
                location.clone(),
                vec![name.to_string()],
                format!("The new API has less arguments on directive '{name}' than the old API"),
            ));
            continue;
        }

        for (arg_name, old_value) in &old_directive.arguments {
            match new_directive.arguments.get(arg_name) {
                None => ctx.report(DiffEvent::breaking(
                    DiffCategory::Missing,
                    location.clone(),
                    vec![name.to_string(), arg_name.clone()],
                    format!(
                        "The new API does not have an argument named '{arg_name}' on directive '{name}'"
                    ),
                )),
                Some(new_value) if new_value.kind() != old_value.kind() => {
                    ctx.report(DiffEvent::breaking(
                        DiffCategory::Invalid,
                        location.clone(),
                        vec![name.to_string(), arg_name.clone()],
                        format!(
                            "The new API has changed value types on argument named '{arg_name}' on directive '{name}'"
                        ),
                    ))
                }
                Some(_) => {}
            }
        }
    }
}
