//! Engine-agnostic document contract.
//!
//! The core never touches a concrete PDF library: it drives any engine that
//! can list its interactive fields and apply typed writes. The adapter crate
//! implements these traits; tests substitute fakes.

use thiserror::Error;

use formfill_model::{FieldType, TemplateField};

/// Errors surfaced by a document engine.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The target identifier does not exist in the document.
    #[error("field not found: {name}")]
    FieldNotFound { name: String },

    /// The requested option is not in the field's allowed set.
    #[error("unsupported option '{option}' for field '{name}'")]
    UnsupportedOption { name: String, option: String },

    /// The named checkbox export state is not recognized.
    #[error("unrecognized export state '{state}' for field '{name}'")]
    UnknownOnState { name: String, state: String },

    /// Any other engine failure (parse, serialization, invariant break).
    #[error("{message}")]
    Engine { message: String },
}

impl DocumentError {
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

    /// Create a generic engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }
}

/// A loaded document with an interactive field layer.
///
/// One instance belongs to one fill call; the trait assumes a single writer
/// and no method suspends.
pub trait FormDocument {
    /// Enumerate every interactive field.
    fn list_fields(&self) -> Vec<TemplateField>;

    /// True if the identifier names a field in this document.
    fn contains_field(&self, name: &str) -> bool;

    /// Normalized type of a field, if present.
    fn field_type(&self, name: &str) -> Option<FieldType>;

    /// Selectable values for option-bearing fields; empty otherwise.
    fn allowed_options(&self, name: &str) -> Vec<String>;

    /// Write a literal string into a text field.
    fn set_text(&mut self, name: &str, value: &str) -> Result<(), DocumentError>;

    /// Check or uncheck a checkbox.
    fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), DocumentError>;

    /// Select a specific checkbox export state.
    ///
    /// Fails with [`DocumentError::UnknownOnState`] when the state is not
    /// one of the field's on-states; callers fall back to boolean check
    /// semantics.
    fn check_export(&mut self, name: &str, state: &str) -> Result<(), DocumentError>;

    /// Select the active option of a radio group or dropdown.
    fn select_option(&mut self, name: &str, option: &str) -> Result<(), DocumentError>;

    /// Serialize the current document state.
    fn save(&mut self) -> Result<Vec<u8>, DocumentError>;

    /// Convert all interactive fields to static page content. Irreversible.
    fn flatten(&mut self) -> Result<(), DocumentError>;
}

/// Factory opening documents from raw template bytes.
pub trait DocumentEngine {
    type Document: FormDocument;

    /// Parse template bytes into a document.
    fn open(&self, bytes: &[u8]) -> Result<Self::Document, DocumentError>;
}
