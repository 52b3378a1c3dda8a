//! Resolution of answer records against a mapping table.

use tracing::{debug, warn};

use formfill_model::{AppRecord, FieldSpec, FieldValue, FormMapping, TargetValues, TransformArgs};
use formfill_transform::{TransformInput, TransformOutput, TransformerRegistry};

/// Apply a mapping table to an answer record, producing the flat
/// target-identifier record.
///
/// Entries are processed in declaration order. An entry is skipped entirely
/// when its answer is absent or blank, so no target identifier is ever
/// written with an empty placeholder. Answer keys without a mapping entry
/// are ignored, keeping richer input records forward-compatible.
///
/// A `Transformed` entry whose transformer returns several pairs is treated
/// as an expansion (the pairs merge and the declared target is unused); the
/// reverse, an `Expanding` entry producing a scalar, has no target to write
/// and is dropped with a warning.
pub fn resolve(
    mapping: &FormMapping,
    record: &AppRecord,
    transformers: &TransformerRegistry,
) -> TargetValues {
    let mut out = TargetValues::new();

    for entry in &mapping.entries {
        let Some(raw) = record.get(&entry.app_key) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let value = substitute(entry.value_map.as_ref(), raw);

        match &entry.spec {
            FieldSpec::Direct { target } => {
                out.insert(target.clone(), value);
            }
            FieldSpec::Transformed {
                target,
                transformer,
                args,
            } => match run_transformer(transformers, transformer, &entry.app_key, &value, record, args)
            {
                Some(TransformOutput::Scalar(result)) => {
                    out.insert(target.clone(), result);
                }
                Some(TransformOutput::Expanded(pairs)) => {
                    debug!(
                        app_key = %entry.app_key,
                        transformer = %transformer,
                        "transformed entry expanded into multiple targets"
                    );
                    for (name, result) in pairs {
                        out.insert(name, result);
                    }
                }
                None => {}
            },
            FieldSpec::Expanding { transformer, args } => {
                match run_transformer(transformers, transformer, &entry.app_key, &value, record, args)
                {
                    Some(TransformOutput::Expanded(pairs)) => {
                        for (name, result) in pairs {
                            out.insert(name, result);
                        }
                    }
                    Some(TransformOutput::Scalar(_)) => {
                        warn!(
                            app_key = %entry.app_key,
                            transformer = %transformer,
                            "expanding entry produced a scalar with no declared target; dropped"
                        );
                    }
                    None => {}
                }
            }
        }
    }

    out
}

fn run_transformer(
    transformers: &TransformerRegistry,
    name: &str,
    app_key: &str,
    value: &FieldValue,
    record: &AppRecord,
    args: &TransformArgs,
) -> Option<TransformOutput> {
    let Some(transformer) = transformers.get(name) else {
        warn!(app_key = %app_key, transformer = %name, "unknown transformer; entry skipped");
        return None;
    };
    Some(transformer(&TransformInput {
        value,
        record,
        args,
    }))
}

/// Apply the entry's raw-value substitution table, if any.
fn substitute(value_map: Option<&std::collections::BTreeMap<String, String>>, raw: &FieldValue) -> FieldValue {
    if let Some(map) = value_map {
        let key = raw.display_string();
        if let Some(mapped) = map.get(&key) {
            return FieldValue::Text(mapped.clone());
        }
    }
    raw.clone()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use formfill_model::{ChoiceSpec, GroupSpec, MappingEntry};

    fn registry() -> TransformerRegistry {
        TransformerRegistry::builtin()
    }

    fn ssn_entry() -> MappingEntry {
        MappingEntry::new(
            "ssn",
            FieldSpec::Expanding {
                transformer: "split_digit_groups".to_string(),
                args: TransformArgs {
                    groups: vec![
                        GroupSpec {
                            target: "ss3".to_string(),
                            width: 3,
                        },
                        GroupSpec {
                            target: "ss2".to_string(),
                            width: 2,
                        },
                        GroupSpec {
                            target: "ss4".to_string(),
                            width: 4,
                        },
                    ],
                    ..TransformArgs::default()
                },
            },
        )
    }

    fn sample_mapping() -> FormMapping {
        FormMapping {
            form_id: "sample".to_string(),
            form_name: "Sample".to_string(),
            template_file: "sample.pdf".to_string(),
            entries: vec![
                MappingEntry::new(
                    "lastName",
                    FieldSpec::Direct {
                        target: "lname".to_string(),
                    },
                ),
                MappingEntry::new(
                    "city",
                    FieldSpec::Transformed {
                        target: "city".to_string(),
                        transformer: "capitalize_first".to_string(),
                        args: TransformArgs::default(),
                    },
                ),
                ssn_entry(),
            ],
        }
    }

    #[test]
    fn resolves_direct_transformed_and_expanding() {
        let record = AppRecord::new()
            .with("lastName", "Lovelace")
            .with("city", "mADISON")
            .with("ssn", "123-45-6789");
        let values = resolve(&sample_mapping(), &record, &registry());

        assert_eq!(values.get("lname"), Some(&FieldValue::from("Lovelace")));
        assert_eq!(values.get("city"), Some(&FieldValue::from("Madison")));
        assert_eq!(values.get("ss3"), Some(&FieldValue::from("123")));
        assert_eq!(values.get("ss2"), Some(&FieldValue::from("45")));
        assert_eq!(values.get("ss4"), Some(&FieldValue::from("6789")));
        assert!(!values.contains("ssn"));
    }

    #[test]
    fn blank_and_absent_answers_produce_no_targets() {
        let record = AppRecord::new().with("lastName", "").with("city", "   ");
        let values = resolve(&sample_mapping(), &record, &registry());
        assert!(values.is_empty());
    }

    #[test]
    fn unmapped_answer_keys_are_ignored() {
        let record = AppRecord::new()
            .with("lastName", "Lovelace")
            .with("favoriteColor", "teal");
        let values = resolve(&sample_mapping(), &record, &registry());
        assert_eq!(values.len(), 1);
        assert!(values.contains("lname"));
    }

    #[test]
    fn unknown_transformer_skips_entry_only() {
        let mut mapping = sample_mapping();
        mapping.entries.push(MappingEntry::new(
            "wages",
            FieldSpec::Transformed {
                target: "3wages".to_string(),
                transformer: "no_such_transformer".to_string(),
                args: TransformArgs::default(),
            },
        ));
        let record = AppRecord::new()
            .with("lastName", "Lovelace")
            .with("wages", 1234.99);
        let values = resolve(&mapping, &record, &registry());
        assert!(values.contains("lname"));
        assert!(!values.contains("3wages"));
    }

    #[test]
    fn value_map_substitutes_before_transform() {
        let mut entry = MappingEntry::new(
            "residency",
            FieldSpec::Direct {
                target: "res".to_string(),
            },
        );
        entry.value_map = Some(BTreeMap::from([(
            "full_year".to_string(),
            "Full-year resident".to_string(),
        )]));
        let mapping = FormMapping {
            form_id: "sample".to_string(),
            form_name: "Sample".to_string(),
            template_file: "sample.pdf".to_string(),
            entries: vec![entry],
        };
        let record = AppRecord::new().with("residency", "full_year");
        let values = resolve(&mapping, &record, &registry());
        assert_eq!(
            values.get("res"),
            Some(&FieldValue::from("Full-year resident"))
        );
    }

    #[test]
    fn one_hot_resolution_clears_unselected_choices() {
        let mapping = FormMapping {
            form_id: "sample".to_string(),
            form_name: "Sample".to_string(),
            template_file: "sample.pdf".to_string(),
            entries: vec![MappingEntry::new(
                "filingStatus",
                FieldSpec::Expanding {
                    transformer: "one_hot".to_string(),
                    args: TransformArgs {
                        choices: vec![
                            ChoiceSpec {
                                key: "single".to_string(),
                                target: "c1".to_string(),
                            },
                            ChoiceSpec {
                                key: "married_filing_jointly".to_string(),
                                target: "c2".to_string(),
                            },
                        ],
                        ..TransformArgs::default()
                    },
                },
            )],
        };
        let record = AppRecord::new().with("filingStatus", "single");
        let values = resolve(&mapping, &record, &registry());
        assert_eq!(values.get("c1"), Some(&FieldValue::Bool(true)));
        assert_eq!(values.get("c2"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn later_entries_overwrite_colliding_targets() {
        let mapping = FormMapping {
            form_id: "sample".to_string(),
            form_name: "Sample".to_string(),
            template_file: "sample.pdf".to_string(),
            entries: vec![
                MappingEntry::new(
                    "nickname",
                    FieldSpec::Direct {
                        target: "name".to_string(),
                    },
                ),
                MappingEntry::new(
                    "legalName",
                    FieldSpec::Direct {
                        target: "name".to_string(),
                    },
                ),
            ],
        };
        let record = AppRecord::new()
            .with("nickname", "Ada")
            .with("legalName", "Augusta Ada King");
        let values = resolve(&mapping, &record, &registry());
        assert_eq!(
            values.get("name"),
            Some(&FieldValue::from("Augusta Ada King"))
        );
        assert_eq!(values.len(), 1);
    }
}
