//! Fatal pipeline errors.
//!
//! Only the kinds here abort a fill call. Per-field problems are recorded in
//! the [`formfill_model::FillSummary`] and never interrupt the batch; a
//! template without interactive fields is a classification
//! ([`crate::FillOutput::NotFillable`]), not an error.

use thiserror::Error;

use crate::document::DocumentError;
use crate::source::SourceError;

/// Errors that abort a fill call.
#[derive(Debug, Error)]
pub enum FillError {
    /// No mapping table is registered for the form; surfaced before any
    /// template load is attempted.
    #[error("no field mapping registered for form '{form_id}'")]
    MappingNotFound { form_id: String },

    /// The byte source failed; not retried here.
    #[error("failed to load template '{locator}': {source}")]
    TemplateLoad {
        locator: String,
        #[source]
        source: SourceError,
    },

    /// The template bytes did not parse as a document.
    #[error("failed to open template '{locator}': {source}")]
    TemplateParse {
        locator: String,
        #[source]
        source: DocumentError,
    },

    /// The engine failed while saving or flattening a filled document.
    #[error("document operation failed: {source}")]
    Document {
        #[source]
        source: DocumentError,
    },
}

impl FillError {
    /// Create a MappingNotFound error.
    pub fn mapping_not_found(form_id: impl Into<String>) -> Self {
        Self::MappingNotFound {
            form_id: form_id.into(),
        }
    }
}

/// Result type alias for fill operations.
pub type Result<T> = std::result::Result<T, FillError>;
