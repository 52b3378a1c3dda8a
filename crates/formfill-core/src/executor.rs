//! Per-field fill execution.

use tracing::debug;

use formfill_model::{FieldType, FieldValue, FillOutcome, FillStatus, FillSummary, TargetValues};

use crate::document::{DocumentError, FormDocument};

/// Write every target value into the document, in record order.
///
/// Failures are isolated per field: a missing identifier or rejected option
/// is recorded in the summary and the batch continues. Buttons and unknown
/// field kinds are skipped, not errors.
pub fn fill_fields<D: FormDocument>(doc: &mut D, values: &TargetValues) -> FillSummary {
    let mut summary = FillSummary::new();
    for (name, value) in values.iter() {
        let outcome = fill_one(doc, name, value);
        if let FillStatus::Error(reason) = &outcome.status {
            debug!(field = %name, reason = %reason, "field write failed");
        }
        summary.record(outcome);
    }
    debug!(
        attempted = summary.attempted,
        filled = summary.filled,
        skipped = summary.skipped,
        errors = summary.errors,
        "fill pass complete"
    );
    summary
}

fn fill_one<D: FormDocument>(doc: &mut D, name: &str, value: &FieldValue) -> FillOutcome {
    if !doc.contains_field(name) {
        return FillOutcome::error(name, "field not found in template");
    }
    let field_type = doc.field_type(name).unwrap_or(FieldType::Unknown);
    let result = match field_type {
        FieldType::Text => doc.set_text(name, &value.display_string()),
        FieldType::CheckBox => fill_checkbox(doc, name, value),
        FieldType::Radio | FieldType::Dropdown => {
            doc.select_option(name, &value.display_string())
        }
        FieldType::Button | FieldType::Unknown => return FillOutcome::skipped(name),
    };
    match result {
        Ok(()) => FillOutcome::filled(name),
        Err(error) => FillOutcome::error(name, error.to_string()),
    }
}

/// Checkbox writes accept booleans directly. A string is taken as a named
/// export state first; an unrecognized state falls back to boolean check
/// semantics on the value's truthiness.
fn fill_checkbox<D: FormDocument>(
    doc: &mut D,
    name: &str,
    value: &FieldValue,
) -> Result<(), DocumentError> {
    match value {
        FieldValue::Bool(checked) => doc.set_checked(name, *checked),
        FieldValue::Text(state) => match doc.check_export(name, state) {
            Ok(()) => Ok(()),
            Err(DocumentError::UnknownOnState { .. }) => {
                doc.set_checked(name, value.is_truthy())
            }
            Err(other) => Err(other),
        },
        FieldValue::Number(_) => doc.set_checked(name, value.is_truthy()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use formfill_model::TemplateField;

    /// Minimal in-memory document for dispatch tests.
    #[derive(Default)]
    struct MemoryDocument {
        fields: BTreeMap<String, (FieldType, Vec<String>)>,
        writes: Vec<(String, String)>,
    }

    impl MemoryDocument {
        fn with_field(mut self, name: &str, field_type: FieldType, options: &[&str]) -> Self {
            self.fields.insert(
                name.to_string(),
                (
                    field_type,
                    options.iter().map(|o| (*o).to_string()).collect(),
                ),
            );
            self
        }
    }

    impl FormDocument for MemoryDocument {
        fn list_fields(&self) -> Vec<TemplateField> {
            self.fields
                .iter()
                .map(|(name, (field_type, options))| TemplateField {
                    name: name.clone(),
                    field_type: *field_type,
                    current_value: None,
                    read_only: false,
                    required: false,
                    max_length: None,
                    options: if options.is_empty() {
                        None
                    } else {
                        Some(options.clone())
                    },
                })
                .collect()
        }

        fn contains_field(&self, name: &str) -> bool {
            self.fields.contains_key(name)
        }

        fn field_type(&self, name: &str) -> Option<FieldType> {
            self.fields.get(name).map(|(field_type, _)| *field_type)
        }

        fn allowed_options(&self, name: &str) -> Vec<String> {
            self.fields
                .get(name)
                .map(|(_, options)| options.clone())
                .unwrap_or_default()
        }

        fn set_text(&mut self, name: &str, value: &str) -> Result<(), DocumentError> {
            self.writes.push((name.to_string(), value.to_string()));
            Ok(())
        }

        fn set_checked(&mut self, name: &str, checked: bool) -> Result<(), DocumentError> {
            self.writes.push((name.to_string(), checked.to_string()));
            Ok(())
        }

        fn check_export(&mut self, name: &str, state: &str) -> Result<(), DocumentError> {
            let (_, options) = self
                .fields
                .get(name)
                .ok_or_else(|| DocumentError::field_not_found(name))?;
            if options.iter().any(|o| o == state) {
                self.writes.push((name.to_string(), state.to_string()));
                Ok(())
            } else {
                Err(DocumentError::unknown_on_state(name, state))
            }
        }

        fn select_option(&mut self, name: &str, option: &str) -> Result<(), DocumentError> {
            let (_, options) = self
                .fields
                .get(name)
                .ok_or_else(|| DocumentError::field_not_found(name))?;
            if options.iter().any(|o| o == option) {
                self.writes.push((name.to_string(), option.to_string()));
                Ok(())
            } else {
                Err(DocumentError::unsupported_option(name, option))
            }
        }

        fn save(&mut self) -> Result<Vec<u8>, DocumentError> {
            Ok(Vec::new())
        }

        fn flatten(&mut self) -> Result<(), DocumentError> {
            Ok(())
        }
    }

    fn targets(pairs: &[(&str, FieldValue)]) -> TargetValues {
        let mut values = TargetValues::new();
        for (name, value) in pairs {
            values.insert(*name, value.clone());
        }
        values
    }

    #[test]
    fn missing_field_does_not_abort_the_batch() {
        let mut doc = MemoryDocument::default()
            .with_field("lname", FieldType::Text, &[])
            .with_field("city", FieldType::Text, &[]);
        let values = targets(&[
            ("lname", FieldValue::from("Lovelace")),
            ("no_such_field", FieldValue::from("x")),
            ("city", FieldValue::from("Madison")),
        ]);

        let summary = fill_fields(&mut doc, &values);

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.filled, 2);
        assert_eq!(summary.errors, 1);
        assert_eq!(doc.writes.len(), 2);
        let error = summary
            .details
            .iter()
            .find(|o| o.field == "no_such_field")
            .expect("outcome recorded");
        assert_eq!(
            error.status,
            FillStatus::Error("field not found in template".to_string())
        );
    }

    #[test]
    fn buttons_and_unknown_fields_are_skipped() {
        let mut doc = MemoryDocument::default()
            .with_field("print", FieldType::Button, &[])
            .with_field("sig", FieldType::Unknown, &[]);
        let values = targets(&[
            ("print", FieldValue::from("x")),
            ("sig", FieldValue::from("x")),
        ]);

        let summary = fill_fields(&mut doc, &values);

        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.errors, 0);
        assert!(doc.writes.is_empty());
    }

    #[test]
    fn checkbox_accepts_bool_and_named_state() {
        let mut doc = MemoryDocument::default()
            .with_field("c1", FieldType::CheckBox, &["1"])
            .with_field("c2", FieldType::CheckBox, &["Yes"]);
        let values = targets(&[
            ("c1", FieldValue::Bool(true)),
            ("c2", FieldValue::from("Yes")),
        ]);

        let summary = fill_fields(&mut doc, &values);

        assert_eq!(summary.filled, 2);
        assert_eq!(doc.writes, vec![
            ("c1".to_string(), "true".to_string()),
            ("c2".to_string(), "Yes".to_string()),
        ]);
    }

    #[test]
    fn unrecognized_export_state_falls_back_to_boolean_check() {
        let mut doc = MemoryDocument::default().with_field("c1", FieldType::CheckBox, &["1"]);
        let values = targets(&[("c1", FieldValue::from("On"))]);

        let summary = fill_fields(&mut doc, &values);

        assert_eq!(summary.filled, 1);
        // "On" is truthy, so the fallback checks the box.
        assert_eq!(doc.writes, vec![("c1".to_string(), "true".to_string())]);
    }

    #[test]
    fn rejected_option_is_a_per_field_error() {
        let mut doc = MemoryDocument::default().with_field(
            "status",
            FieldType::Radio,
            &["single", "married"],
        );
        let values = targets(&[("status", FieldValue::from("widowed"))]);

        let summary = fill_fields(&mut doc, &values);

        assert_eq!(summary.errors, 1);
        let FillStatus::Error(reason) = &summary.details[0].status else {
            panic!("expected error outcome");
        };
        assert!(reason.starts_with("unsupported option"));
    }
}
