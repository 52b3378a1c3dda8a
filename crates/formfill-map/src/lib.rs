//! Field-mapping registry and resolver.
//!
//! This crate turns a flat answer record into the concrete
//! target-identifier record written to a template:
//!
//! - **registry**: per-form mapping tables, loaded from JSON files or the
//!   bundled samples
//! - **resolver**: applies one table to an answer record, producing ordered
//!   target values
//! - **validate**: static mapping-table checks that never execute a
//!   transformer

pub mod bundled;
pub mod error;
pub mod registry;
pub mod resolver;
pub mod validate;

pub use error::{MapError, Result};
pub use registry::MappingRegistry;
pub use resolver::resolve;
pub use validate::{MappingIssue, validate};
