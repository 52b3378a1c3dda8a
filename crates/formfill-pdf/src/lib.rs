//! PDF document engine adapter.
//!
//! Wraps `lopdf` behind the engine-agnostic [`formfill_core::FormDocument`]
//! contract: AcroForm introspection with fully-qualified field names, typed
//! value writes with regenerated appearances, saving, and flattening to
//! static page content. Nothing outside this crate touches `lopdf` types.

pub mod document;
pub mod error;
mod fields;
mod text;

pub use document::{DocumentMetadata, PdfEngine, PdfForm};
pub use error::{PdfError, Result};
