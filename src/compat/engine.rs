//! Schema difference engine
//!
//! This module walks the old schema from its root operation types, following
//! every referenced type, and compares each one with its counterpart in the
//! new schema. Findings are reported to an [`EventSink`]; the number of
//! breaking findings is returned.

use crate::compat::categories::DiffCategory;
use crate::compat::handlers;
use crate::compat::reporting::{CapturingSink, CountingSink, EventSink};
use crate::compat::types::{DiffEvent, DiffLocation, TypeKind};
use crate::document::{OperationType, TypeDefinition, TypeSystemDocument};
use crate::error::DiffError;
use crate::type_ref::TypeRef;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Scalars that every GraphQL server provides; they are never compared.
const BUILT_IN_SCALARS: &[&str] = &[
    "ID",
    "Boolean",
    "String",
    "Byte",
    "Char",
    "Short",
    "Int",
    "Long",
    "Float",
    "Double",
    "BigInteger",
    "BigDecimal",
];

/// Options for controlling the diffing process
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Compare directive applications on types, fields, arguments and enum values
    #[serde(default)]
    pub enforce_directives: bool,
}

impl DiffOptions {
    /// Options with directive comparison turned on
    pub fn enforce_directives() -> Self {
        Self {
            enforce_directives: true,
        }
    }

    /// Load configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        #[derive(serde::Deserialize)]
        struct ConfigFile {
            diff: Option<DiffOptions>,
        }

        let config_file: ConfigFile = serde_yaml::from_str(yaml)?;
        Ok(config_file.diff.unwrap_or_default())
    }
}

/// Result of a captured schema diff
#[derive(Debug, Clone, Serialize)]
pub struct DiffResult {
    /// All events, including informational ones, in report order
    pub events: Vec<DiffEvent>,
    /// Whether any breaking changes were found
    pub has_breaking_changes: bool,
    /// Count returned by the engine
    pub breaking_count: usize,
    pub dangerous_count: usize,
    /// Non-informational events per category
    pub summary: BTreeMap<String, usize>,
}

impl DiffResult {
    fn from_events(breaking_count: usize, events: Vec<DiffEvent>) -> Self {
        let mut summary = BTreeMap::new();
        for category in events.iter().filter_map(|e| e.category()) {
            *summary.entry(category.id().to_string()).or_insert(0) += 1;
        }
        Self {
            has_breaking_changes: breaking_count > 0,
            dangerous_count: events.iter().filter(|e| e.is_dangerous()).count(),
            breaking_count,
            summary,
            events,
        }
    }

    pub fn breakages(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| e.is_breaking())
    }

    pub fn dangers(&self) -> impl Iterator<Item = &DiffEvent> {
        self.events.iter().filter(|e| e.is_dangerous())
    }
}

/// Main engine for schema difference detection
#[derive(Debug, Clone, Default)]
pub struct SchemaDiff {
    options: DiffOptions,
}

impl SchemaDiff {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diffs two documents, reporting to `sink`, and returns the breaking count.
    pub fn diff_schema(
        &self,
        old: &TypeSystemDocument,
        new: &TypeSystemDocument,
        sink: &mut dyn EventSink,
    ) -> Result<usize, DiffError> {
        diff_schema(old, new, sink, &self.options)
    }

    /// Diffs two documents and captures every event in a [`DiffResult`].
    pub fn check(
        &self,
        old: &TypeSystemDocument,
        new: &TypeSystemDocument,
    ) -> Result<DiffResult, DiffError> {
        let mut sink = CapturingSink::new();
        let breaking_count = self.diff_schema(old, new, &mut sink)?;
        Ok(DiffResult::from_events(breaking_count, sink.into_events()))
    }
}

/// Compares `old` against `new` and returns the number of breaking changes.
///
/// `sink.on_end()` is called once when the walk completes. If the old
/// document turns out to be internally inconsistent the walk stops with a
/// [`DiffError`] instead, and `on_end` is not called.
pub fn diff_schema(
    old: &TypeSystemDocument,
    new: &TypeSystemDocument,
    sink: &mut dyn EventSink,
    options: &DiffOptions,
) -> Result<usize, DiffError> {
    let span = tracing::debug_span!("diff_schema", enforce_directives = options.enforce_directives);
    let _guard = span.enter();

    let mut ctx = DiffContext {
        old,
        new,
        options,
        sink: CountingSink::new(sink),
        examined: HashSet::new(),
        active: Vec::new(),
    };

    for operation in OperationType::ALL {
        check_operation(&mut ctx, operation)?;
    }

    ctx.sink.on_end();
    let breaking_count = ctx.sink.breaking_count();
    tracing::debug!(
        breaking_count,
        examined_types = ctx.examined.len(),
        "schema diff complete"
    );
    Ok(breaking_count)
}

/// Traversal state for one diff run
pub(crate) struct DiffContext<'a, 's> {
    pub(crate) old: &'a TypeSystemDocument,
    pub(crate) new: &'a TypeSystemDocument,
    pub(crate) options: &'a DiffOptions,
    sink: CountingSink<'s>,
    /// Type names already visited; guards against cycles and duplicate reports
    examined: HashSet<String>,
    /// Types currently being compared, outermost first
    active: Vec<String>,
}

impl DiffContext<'_, '_> {
    pub(crate) fn report(&mut self, event: DiffEvent) {
        tracing::trace!(
            level = %event.level(),
            type_name = event.type_name(),
            path = ?self.active,
            "{}",
            event.reason_msg()
        );
        self.sink.report(event);
    }

    /// Marks a type as examined. Returns `false` if it already was.
    fn enter_type(&mut self, type_name: &str) -> bool {
        if !self.examined.insert(type_name.to_string()) {
            return false;
        }
        self.active.push(type_name.to_string());
        tracing::trace!(type_name, depth = self.active.len(), "entering type");
        true
    }

    fn exit_type(&mut self) {
        self.active.pop();
    }
}

fn check_operation(ctx: &mut DiffContext<'_, '_>, operation: OperationType) -> Result<(), DiffError> {
    let (old_doc, new_doc) = (ctx.old, ctx.new);

    // A missing old root means the operation is new, which is fine.
    let Some(old_root) = old_doc.root_type_name(operation) else {
        return Ok(());
    };

    let Some(new_root) = new_doc.root_type_name(operation) else {
        let keyword = operation.keyword();
        ctx.report(DiffEvent::breaking(
            DiffCategory::Missing,
            DiffLocation {
                type_name: operation.default_type_name().to_string(),
                field_name: Some(keyword.to_string()),
                type_kind: Some(TypeKind::Operation),
            },
            vec![keyword.to_string()],
            format!("The new API no longer has the operation '{keyword}'"),
        ));
        return Ok(());
    };

    if old_doc.type_definition(old_root).is_none() {
        tracing::debug!(
            operation = operation.keyword(),
            root = old_root,
            "old root type is declared but not defined, skipping"
        );
        return Ok(());
    }

    check_type(ctx, &TypeRef::named(old_root), &TypeRef::named(new_root))
}

/// Compares the definitions behind two type references, recursing through
/// their fields. Each old type name is compared at most once per run.
pub(crate) fn check_type(
    ctx: &mut DiffContext<'_, '_>,
    old_ref: &TypeRef,
    new_ref: &TypeRef,
) -> Result<(), DiffError> {
    let type_name = old_ref.name();
    if !ctx.enter_type(type_name) {
        return Ok(());
    }
    let result = compare_definitions(ctx, type_name, new_ref.name());
    ctx.exit_type();
    result
}

fn compare_definitions(
    ctx: &mut DiffContext<'_, '_>,
    type_name: &str,
    new_type_name: &str,
) -> Result<(), DiffError> {
    if is_built_in_scalar(type_name) || is_reserved_type(type_name) {
        return Ok(());
    }

    let (old_doc, new_doc) = (ctx.old, ctx.new);
    let Some(old_def) = old_doc.type_definition(type_name) else {
        ctx.report(DiffEvent::info(
            handlers::create_location(type_name, None),
            format!("Type '{type_name}' is missing"),
        ));
        return Ok(());
    };
    let old_kind = old_def.kind();

    ctx.report(DiffEvent::info(
        handlers::create_location(type_name, Some(old_kind)),
        format!("Examining type '{type_name}' ..."),
    ));

    let Some(new_def) = new_doc.type_definition(new_type_name) else {
        ctx.report(DiffEvent::breaking(
            DiffCategory::Missing,
            handlers::create_location(type_name, Some(old_kind)),
            Vec::new(),
            format!("The new API does not have a type called '{type_name}'"),
        ));
        return Ok(());
    };

    match (old_def, new_def) {
        (TypeDefinition::Object(old), TypeDefinition::Object(new)) => {
            handlers::compare_object(ctx, old, new)
        }
        (TypeDefinition::Interface(old), TypeDefinition::Interface(new)) => {
            handlers::compare_interface(ctx, old, new)
        }
        (TypeDefinition::Union(old), TypeDefinition::Union(new)) => {
            handlers::compare_union(ctx, old, new)
        }
        (TypeDefinition::Enum(old), TypeDefinition::Enum(new)) => {
            handlers::compare_enum(ctx, old, new);
            Ok(())
        }
        (TypeDefinition::InputObject(old), TypeDefinition::InputObject(new)) => {
            handlers::compare_input_object(ctx, old, new)
        }
        (TypeDefinition::Scalar(old), TypeDefinition::Scalar(new)) => {
            handlers::compare_scalar(ctx, old, new);
            Ok(())
        }
        (
            TypeDefinition::Object(_)
            | TypeDefinition::Interface(_)
            | TypeDefinition::Union(_)
            | TypeDefinition::Enum(_)
            | TypeDefinition::InputObject(_)
            | TypeDefinition::Scalar(_),
            _,
        ) => {
            let new_kind = new_def.kind();
            ctx.report(DiffEvent::breaking(
                DiffCategory::Invalid,
                handlers::create_location(type_name, Some(old_kind)),
                vec![old_kind.to_string(), new_kind.to_string()],
                format!(
                    "The new API has changed '{type_name}' from a '{old_kind}' to a '{new_kind}'"
                ),
            ));
            Ok(())
        }
    }
}

fn is_built_in_scalar(type_name: &str) -> bool {
    BUILT_IN_SCALARS.contains(&type_name)
}

fn is_reserved_type(type_name: &str) -> bool {
    type_name.starts_with("__")
}
