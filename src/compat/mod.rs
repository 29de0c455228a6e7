//! Difference detection between two GraphQL type system documents
//!
//! This module walks an old schema and its successor side by side and
//! classifies every change as informational, dangerous or breaking for
//! existing clients.

pub mod categories;
pub mod engine;
pub mod handlers;
pub mod reporting;
pub mod types;

pub use categories::DiffCategory;
pub use engine::{DiffOptions, DiffResult, SchemaDiff, diff_schema};
pub use reporting::{CapturingSink, ChainedSink, CountingSink, EventSink, PrintingSink};
pub use types::{DiffEvent, DiffLevel, DiffLocation};
