//! Introspected template fields and fillability classification.

use serde::{Deserialize, Serialize};

/// Normalized kind of an interactive template field.
///
/// `Unknown` is the forward-compatible catch-all: introspection never fails
/// on an unrecognized concrete field kind, it reports `Unknown` and the
/// executor skips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    CheckBox,
    Radio,
    Dropdown,
    Button,
    Unknown,
}

impl FieldType {
    /// True for field kinds that carry user data.
    pub fn is_data_bearing(&self) -> bool {
        !matches!(self, Self::Button | Self::Unknown)
    }
}

/// One interactive field as reported by template introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateField {
    /// Fully-qualified field identifier.
    pub name: String,
    pub field_type: FieldType,
    /// Current value, where the template carries one.
    pub current_value: Option<String>,
    pub read_only: bool,
    pub required: bool,
    /// Maximum text length, for text fields that declare one.
    pub max_length: Option<u32>,
    /// Selectable values (radio on-states, dropdown options, checkbox
    /// export states). `None` for field kinds without an option set.
    pub options: Option<Vec<String>>,
}

/// Whether a template can be filled through its interactive field layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fillability {
    Fillable,
    /// No interactive fields; callers route to a manual/overlay path.
    NotFillable,
}

/// A template is fillable iff it exposes at least one interactive field.
pub fn classify(fields: &[TemplateField]) -> Fillability {
    if fields.is_empty() {
        Fillability::NotFillable
    } else {
        Fillability::Fillable
    }
}
