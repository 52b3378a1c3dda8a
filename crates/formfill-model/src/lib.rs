//! Data model for declarative form filling.
//!
//! This crate defines the types shared across the formfill workspace:
//!
//! - **value**: application-level field values and the flat answer record
//! - **mapping**: declarative mapping tables from answer keys to template fields
//! - **template**: introspected template fields and fillability classification
//! - **summary**: per-field fill outcomes and the aggregated fill summary

pub mod mapping;
pub mod summary;
pub mod template;
pub mod value;

pub use mapping::{
    ChoiceSpec, FieldSpec, FormMapping, GroupSpec, MappingEntry, TargetValues, TransformArgs,
};
pub use summary::{FillOutcome, FillStatus, FillSummary};
pub use template::{FieldType, Fillability, TemplateField, classify};
pub use value::{AppRecord, FieldValue};
