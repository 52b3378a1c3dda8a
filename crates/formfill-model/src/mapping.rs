//! Declarative mapping tables from answer keys to template field identifiers.
//!
//! A [`FormMapping`] is pure configuration data: it names a form, its template
//! file, and an ordered list of [`MappingEntry`] items. Entry order is the
//! resolution order, and later writes to the same target identifier overwrite
//! earlier ones. Transform behavior is referenced by name and parameterized
//! through [`TransformArgs`], so tables stay inspectable and serializable.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// One fixed-width digit group produced by a splitting transformer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Template field identifier receiving this group.
    pub target: String,
    /// Number of digits in this group.
    pub width: usize,
}

/// One selectable option of a one-hot choice group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSpec {
    /// Application-level option key (e.g. `married_filing_jointly`).
    pub key: String,
    /// Template field identifier of the matching checkbox.
    pub target: String,
}

/// Declarative parameters for named transformers.
///
/// All fields default to empty; each transformer documents which fields it
/// reads. Keeping the parameters in data (rather than per-form closures) is
/// what lets one generic splitter serve forms with different part naming.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformArgs {
    /// Fixed-width digit groups, in output order (`split_digit_groups`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupSpec>,
    /// Ordered option list (`one_hot`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceSpec>,
    /// Sibling answer key consulted by record-aware transformers
    /// (`append_companion`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<String>,
    /// Separator for joining transformers; defaults to a single space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Literal mark emitted for true values (`checkmark`); defaults to `"X"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,
    /// Upper bound on kept digits (`digits_only`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_digits: Option<usize>,
}

impl TransformArgs {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
            && self.choices.is_empty()
            && self.companion.is_none()
            && self.separator.is_none()
            && self.mark.is_none()
            && self.max_digits.is_none()
    }
}

/// How one answer key maps onto the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSpec {
    /// Copy the value verbatim to a single target field.
    Direct {
        /// Template field identifier.
        target: String,
    },
    /// Apply a named transformer; the scalar result goes to `target`.
    Transformed {
        /// Template field identifier.
        target: String,
        /// Registered transformer name.
        transformer: String,
        /// Declarative transformer parameters.
        #[serde(default, skip_serializing_if = "TransformArgs::is_empty")]
        args: TransformArgs,
    },
    /// Apply a named transformer that expands into several target fields.
    ///
    /// No single target is declared: the transformer returns the full set of
    /// `(identifier, value)` pairs.
    Expanding {
        /// Registered transformer name.
        transformer: String,
        /// Declarative transformer parameters.
        #[serde(default, skip_serializing_if = "TransformArgs::is_empty")]
        args: TransformArgs,
    },
}

impl FieldSpec {
    /// The transformer name referenced by this spec, if any.
    pub fn transformer(&self) -> Option<&str> {
        match self {
            Self::Direct { .. } => None,
            Self::Transformed { transformer, .. } | Self::Expanding { transformer, .. } => {
                Some(transformer.as_str())
            }
        }
    }

    /// The single declared target, if any (`Expanding` has none).
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Direct { target } | Self::Transformed { target, .. } => Some(target.as_str()),
            Self::Expanding { .. } => None,
        }
    }
}

/// One mapping-table row: an answer key and how it lands on the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Application answer key.
    pub app_key: String,
    /// Target specification.
    pub spec: FieldSpec,
    /// Optional raw-value substitution applied before any transformer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_map: Option<BTreeMap<String, String>>,
}

impl MappingEntry {
    pub fn new(app_key: impl Into<String>, spec: FieldSpec) -> Self {
        Self {
            app_key: app_key.into(),
            spec,
            value_map: None,
        }
    }
}

/// Complete mapping table for one form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormMapping {
    /// Stable form identifier (e.g. `wi_form_1`).
    pub form_id: String,
    /// Human-readable form name.
    pub form_name: String,
    /// Template locator passed to the byte source.
    pub template_file: String,
    /// Ordered mapping rows; declaration order is resolution order.
    pub entries: Vec<MappingEntry>,
}

impl FormMapping {
    /// Look up the entry for an answer key.
    pub fn entry(&self, app_key: &str) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.app_key == app_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved record of template-field identifier to value.
///
/// Insertion-ordered: fields are written to the document in the order they
/// were first produced. Re-inserting an identifier overwrites its value in
/// place, so on collision the position of the first write and the value of
/// the last write win.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetValues {
    entries: Vec<(String, FieldValue)>,
}

impl TargetValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a target value.
    pub fn insert(&mut self, target: impl Into<String>, value: FieldValue) {
        let target = target.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == target) {
            slot.1 = value;
        } else {
            self.entries.push((target, value));
        }
    }

    pub fn get(&self, target: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == target)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, target: &str) -> bool {
        self.get(target).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for TargetValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
