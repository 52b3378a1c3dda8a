//! Error types for PDF form operations.

use thiserror::Error;

/// Errors from loading, filling, or serializing a PDF form.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The bytes did not parse as a PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(#[from] lopdf::Error),

    /// The document has no usable catalog dictionary.
    #[error("document has no catalog")]
    MissingCatalog,

    /// No field with the given fully-qualified name.
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// The option is not in the field's allowed set.
    #[error("unsupported option '{option}' for field '{name}'")]
    UnsupportedOption { name: String, option: String },

    /// The named export state is not one of the field's on-states.
    #[error("unrecognized export state '{state}' for field '{name}'")]
    UnknownOnState { name: String, state: String },

    /// Serialization failed.
    #[error("failed to serialize PDF: {source}")]
    Save {
        #[source]
        source: lopdf::Error,
    },
}

impl PdfError {
    /// Create a FieldNotFound error.
    pub fn field_not_found(name: impl Into<String>) -> Self {
        Self::FieldNotFound { name: name.into() }
    }

    /// Create an UnsupportedOption error.
    pub fn unsupported_option(name: impl Into<String>, option: impl Into<String>) -> Self {
        Self::UnsupportedOption {
            name: name.into(),
            option: option.into(),
        }
    }

    /// Create an UnknownOnState error.
    pub fn unknown_on_state(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self::UnknownOnState {
            name: name.into(),
            state: state.into(),
        }
    }
}

/// Result type alias for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
