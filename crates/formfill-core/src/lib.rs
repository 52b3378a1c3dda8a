//! Fill pipeline core.
//!
//! Composes the mapping resolver, a template byte source, and a document
//! engine into the public fill entry point:
//!
//! - **document**: engine-agnostic traits the document adapter implements
//! - **source**: template byte-source trait and filesystem implementation
//! - **executor**: per-field writes with isolated failures
//! - **orchestrator**: resolve -> load -> classify -> fill -> save
//!
//! All collaborators are constructed and injected explicitly; the core holds
//! no global state and performs no external writes of its own, so distinct
//! fill calls are independent and cancellation is always safe.

pub mod document;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod source;

pub use document::{DocumentEngine, DocumentError, FormDocument};
pub use error::{FillError, Result};
pub use executor::fill_fields;
pub use orchestrator::{FillOptions, FillOutput, FormFiller};
pub use source::{FsTemplateSource, SourceError, TemplateSource};
