//! Static mapping-table validation.
//!
//! Validation inspects the table as data; no transformer is ever executed.
//! It catches the configuration mistakes observed across mapping revisions:
//! misspelled transformer names, duplicate rows, and argument blocks whose
//! shape does not fit the referenced transformer.

use std::collections::BTreeSet;
use std::fmt;

use formfill_model::{FieldSpec, FormMapping};
use formfill_transform::TransformerRegistry;

/// One problem found in a mapping table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingIssue {
    /// Answer key of the offending entry.
    pub app_key: String,
    pub message: String,
}

impl MappingIssue {
    fn new(app_key: &str, message: impl Into<String>) -> Self {
        Self {
            app_key: app_key.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.app_key, self.message)
    }
}

/// Check a mapping table against a transformer registry.
///
/// Returns an empty list for a well-formed table.
pub fn validate(mapping: &FormMapping, transformers: &TransformerRegistry) -> Vec<MappingIssue> {
    let mut issues = Vec::new();
    let mut seen_keys = BTreeSet::new();

    for entry in &mapping.entries {
        if !seen_keys.insert(entry.app_key.as_str()) {
            issues.push(MappingIssue::new(&entry.app_key, "duplicate answer key"));
        }

        if let Some(target) = entry.spec.target()
            && target.trim().is_empty()
        {
            issues.push(MappingIssue::new(&entry.app_key, "empty target identifier"));
        }

        let Some(name) = entry.spec.transformer() else {
            continue;
        };
        if !transformers.contains(name) {
            issues.push(MappingIssue::new(
                &entry.app_key,
                format!("unknown transformer '{name}'"),
            ));
            continue;
        }

        match &entry.spec {
            FieldSpec::Expanding { args, .. } => {
                if name == "split_digit_groups" {
                    if args.groups.is_empty() {
                        issues.push(MappingIssue::new(
                            &entry.app_key,
                            "split_digit_groups requires at least one group",
                        ));
                    }
                    for group in &args.groups {
                        if group.width == 0 {
                            issues.push(MappingIssue::new(
                                &entry.app_key,
                                format!("zero-width group for target '{}'", group.target),
                            ));
                        }
                        if group.target.trim().is_empty() {
                            issues.push(MappingIssue::new(&entry.app_key, "empty group target"));
                        }
                    }
                }
                if name == "one_hot" {
                    if args.choices.is_empty() {
                        issues.push(MappingIssue::new(
                            &entry.app_key,
                            "one_hot requires at least one choice",
                        ));
                    }
                    let mut choice_keys = BTreeSet::new();
                    for choice in &args.choices {
                        if !choice_keys.insert(choice.key.as_str()) {
                            issues.push(MappingIssue::new(
                                &entry.app_key,
                                format!("duplicate one_hot key '{}'", choice.key),
                            ));
                        }
                        if choice.target.trim().is_empty() {
                            issues.push(MappingIssue::new(&entry.app_key, "empty choice target"));
                        }
                    }
                }
            }
            FieldSpec::Transformed { args, .. } => {
                // These two only make sense as expansions.
                if name == "split_digit_groups" || name == "one_hot" {
                    issues.push(MappingIssue::new(
                        &entry.app_key,
                        format!("transformer '{name}' expands and needs an expanding entry"),
                    ));
                }
                if name == "append_companion" && args.companion.is_none() {
                    issues.push(MappingIssue::new(
                        &entry.app_key,
                        "append_companion requires args.companion",
                    ));
                }
            }
            FieldSpec::Direct { .. } => {}
        }
    }

    issues
}
