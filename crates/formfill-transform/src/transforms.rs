//! Built-in transformer functions.
//!
//! Every function here is pure and total. Scalar transformers return
//! [`TransformOutput::Scalar`]; splitters and one-hot selectors return
//! [`TransformOutput::Expanded`] with one `(identifier, value)` pair per
//! produced field.

use chrono::NaiveDate;

use formfill_model::{AppRecord, FieldValue, TransformArgs};

/// Default mark written for a checked box when the table does not override it.
pub const DEFAULT_MARK: &str = "X";

/// Input handed to every transformer invocation.
pub struct TransformInput<'a> {
    /// The answer value being transformed.
    pub value: &'a FieldValue,
    /// The full answer record, for transformers that consult siblings.
    pub record: &'a AppRecord,
    /// Declarative parameters from the mapping table.
    pub args: &'a TransformArgs,
}

/// Result of a transformer invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutput {
    /// A single value for the entry's declared target.
    Scalar(FieldValue),
    /// A set of `(target identifier, value)` pairs, in output order.
    Expanded(Vec<(String, FieldValue)>),
}

impl TransformOutput {
    fn text(value: impl Into<String>) -> Self {
        Self::Scalar(FieldValue::Text(value.into()))
    }
}

fn input_text(input: &TransformInput<'_>) -> String {
    input.value.display_string()
}

fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Reformat an ISO date (`YYYY-MM-DD`) as `MM/DD/YYYY`.
///
/// Values already in `MM/DD/YYYY` pass through unchanged; anything
/// unparseable becomes the empty string.
pub fn date_mmddyyyy(input: &TransformInput<'_>) -> TransformOutput {
    let raw = input_text(input);
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return TransformOutput::text(date.format("%m/%d/%Y").to_string());
    }
    if NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_ok() {
        return TransformOutput::text(trimmed);
    }
    TransformOutput::text("")
}

/// First character uppercase, the rest lowercase (city names).
pub fn capitalize_first(input: &TransformInput<'_>) -> TransformOutput {
    let raw = input_text(input);
    let mut chars = raw.chars();
    let out = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    };
    TransformOutput::text(out)
}

/// All characters uppercase (state codes).
pub fn uppercase(input: &TransformInput<'_>) -> TransformOutput {
    TransformOutput::text(input_text(input).to_uppercase())
}

/// Strip every non-digit character, optionally truncated to
/// `args.max_digits` (single-field SSN entry).
pub fn digits_only(input: &TransformInput<'_>) -> TransformOutput {
    let mut digits = strip_non_digits(&input_text(input));
    if let Some(max) = input.args.max_digits {
        digits.truncate(max);
    }
    TransformOutput::text(digits)
}

/// Strip non-digits and re-punch the `XXX-XX-XXXX` SSN form.
pub fn ssn_dashed(input: &TransformInput<'_>) -> TransformOutput {
    let digits = strip_non_digits(&input_text(input));
    if digits.is_empty() {
        return TransformOutput::text("");
    }
    let first = digits.get(..3.min(digits.len())).unwrap_or("");
    let middle = digits.get(3..5.min(digits.len())).unwrap_or("");
    let last = digits.get(5..9.min(digits.len())).unwrap_or("");
    TransformOutput::text(format!("{first}-{middle}-{last}"))
}

/// Truncate (never round) to whole currency units.
///
/// The result is a plain decimal string with no grouping separators.
/// Empty or non-numeric input yields `"0"`; negative amounts truncate
/// toward zero.
pub fn currency_whole(input: &TransformInput<'_>) -> TransformOutput {
    let amount = match input.value {
        FieldValue::Number(n) => Some(*n),
        FieldValue::Text(s) => s.trim().parse::<f64>().ok(),
        FieldValue::Bool(_) => None,
    };
    let Some(amount) = amount else {
        return TransformOutput::text("0");
    };
    if !amount.is_finite() {
        return TransformOutput::text("0");
    }
    TransformOutput::text(format!("{}", amount.trunc() as i64))
}

/// Truthy values become the configured mark (default `"X"`), everything
/// else the empty string.
pub fn checkmark(input: &TransformInput<'_>) -> TransformOutput {
    if input.value.is_truthy() {
        let mark = input.args.mark.as_deref().unwrap_or(DEFAULT_MARK);
        TransformOutput::text(mark)
    } else {
        TransformOutput::text("")
    }
}

/// Truthy values become `"Yes"`, everything else `"No"`.
pub fn yes_no(input: &TransformInput<'_>) -> TransformOutput {
    if input.value.is_truthy() {
        TransformOutput::text("Yes")
    } else {
        TransformOutput::text("No")
    }
}

/// Strip non-digits and format as `(AAA) BBB-CCCC`.
pub fn phone_paren(input: &TransformInput<'_>) -> TransformOutput {
    let digits = strip_non_digits(&input_text(input));
    if digits.is_empty() {
        return TransformOutput::text("");
    }
    let area = digits.get(..3.min(digits.len())).unwrap_or("");
    let prefix = digits.get(3..6.min(digits.len())).unwrap_or("");
    let line = digits.get(6..10.min(digits.len())).unwrap_or("");
    TransformOutput::text(format!("({area}) {prefix}-{line}"))
}

/// Strip non-digits and slice into the fixed-width groups declared in
/// `args.groups`, regardless of the original punctuation.
///
/// `"123-45-6789"`, `"123 45 6789"` and `"1234-56789"` all split into the
/// same 3/2/4 parts. Input shorter than the declared widths yields short or
/// empty tail groups; surplus digits are dropped.
pub fn split_digit_groups(input: &TransformInput<'_>) -> TransformOutput {
    let digits = strip_non_digits(&input_text(input));
    let mut pairs = Vec::with_capacity(input.args.groups.len());
    let mut offset = 0usize;
    for group in &input.args.groups {
        let end = (offset + group.width).min(digits.len());
        let part = if offset < digits.len() {
            &digits[offset..end]
        } else {
            ""
        };
        pairs.push((group.target.clone(), FieldValue::Text(part.to_string())));
        offset = end;
    }
    TransformOutput::Expanded(pairs)
}

/// Map a selected option onto its checkbox group, one boolean per choice.
///
/// Every declared target receives a value: `true` for the single choice
/// whose key equals the selection, `false` for all others. A selection
/// matching no choice yields all `false`, so stale marks are always
/// explicitly cleared rather than left as-is.
pub fn one_hot(input: &TransformInput<'_>) -> TransformOutput {
    let selected = input_text(input);
    let pairs = input
        .args
        .choices
        .iter()
        .map(|choice| {
            (
                choice.target.clone(),
                FieldValue::Bool(choice.key == selected),
            )
        })
        .collect();
    TransformOutput::Expanded(pairs)
}

/// Append a sibling answer (`args.companion`) to the value, joined with
/// `args.separator` (default single space).
///
/// Used where two logical answers share one template field, such as first
/// name plus middle initial. A missing or blank companion leaves the value
/// unchanged.
pub fn append_companion(input: &TransformInput<'_>) -> TransformOutput {
    let base = input_text(input);
    let companion = input
        .args
        .companion
        .as_deref()
        .and_then(|key| input.record.get(key))
        .filter(|value| !value.is_empty())
        .map(FieldValue::display_string);
    match companion {
        Some(extra) => {
            let separator = input.args.separator.as_deref().unwrap_or(" ");
            TransformOutput::text(format!("{base}{separator}{extra}"))
        }
        None => TransformOutput::text(base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formfill_model::{ChoiceSpec, GroupSpec};

    fn run(
        f: fn(&TransformInput<'_>) -> TransformOutput,
        value: FieldValue,
        args: TransformArgs,
    ) -> TransformOutput {
        let record = AppRecord::new();
        f(&TransformInput {
            value: &value,
            record: &record,
            args: &args,
        })
    }

    fn scalar_text(output: TransformOutput) -> String {
        match output {
            TransformOutput::Scalar(FieldValue::Text(s)) => s,
            other => panic!("expected scalar text, got {other:?}"),
        }
    }

    #[test]
    fn date_reformats_iso_input() {
        let out = run(date_mmddyyyy, FieldValue::from("2024-04-15"), TransformArgs::default());
        assert_eq!(scalar_text(out), "04/15/2024");
    }

    #[test]
    fn date_passes_through_us_format_and_defaults_empty() {
        let out = run(date_mmddyyyy, FieldValue::from("04/15/2024"), TransformArgs::default());
        assert_eq!(scalar_text(out), "04/15/2024");
        let out = run(date_mmddyyyy, FieldValue::from("not a date"), TransformArgs::default());
        assert_eq!(scalar_text(out), "");
    }

    #[test]
    fn capitalize_first_lowercases_rest() {
        let out = run(capitalize_first, FieldValue::from("mADISON"), TransformArgs::default());
        assert_eq!(scalar_text(out), "Madison");
    }

    #[test]
    fn currency_truncates_not_rounds() {
        let out = run(currency_whole, FieldValue::Number(1234.99), TransformArgs::default());
        assert_eq!(scalar_text(out), "1234");
        let out = run(currency_whole, FieldValue::from("1234.99"), TransformArgs::default());
        assert_eq!(scalar_text(out), "1234");
        let out = run(currency_whole, FieldValue::Number(-12.7), TransformArgs::default());
        assert_eq!(scalar_text(out), "-12");
    }

    #[test]
    fn currency_defaults_to_zero() {
        let out = run(currency_whole, FieldValue::from(""), TransformArgs::default());
        assert_eq!(scalar_text(out), "0");
        let out = run(currency_whole, FieldValue::from("n/a"), TransformArgs::default());
        assert_eq!(scalar_text(out), "0");
    }

    fn ssn_groups() -> TransformArgs {
        TransformArgs {
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
        }
    }

    #[test]
    fn split_ignores_original_punctuation() {
        for raw in ["123-45-6789", "123 45 6789", "1234-56789"] {
            let out = run(split_digit_groups, FieldValue::from(raw), ssn_groups());
            let TransformOutput::Expanded(pairs) = out else {
                panic!("expected expansion");
            };
            assert_eq!(
                pairs,
                vec![
                    ("ss3".to_string(), FieldValue::from("123")),
                    ("ss2".to_string(), FieldValue::from("45")),
                    ("ss4".to_string(), FieldValue::from("6789")),
                ],
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn split_short_input_yields_empty_tail() {
        let out = run(split_digit_groups, FieldValue::from("123-4"), ssn_groups());
        let TransformOutput::Expanded(pairs) = out else {
            panic!("expected expansion");
        };
        assert_eq!(pairs[0].1, FieldValue::from("123"));
        assert_eq!(pairs[1].1, FieldValue::from("4"));
        assert_eq!(pairs[2].1, FieldValue::from(""));
    }

    fn status_choices() -> TransformArgs {
        TransformArgs {
            choices: vec![
                ChoiceSpec {
                    key: "single".to_string(),
                    target: "c1".to_string(),
                },
                ChoiceSpec {
                    key: "married_filing_jointly".to_string(),
                    target: "c2".to_string(),
                },
                ChoiceSpec {
                    key: "head_of_household".to_string(),
                    target: "c3".to_string(),
                },
            ],
            ..TransformArgs::default()
        }
    }

    #[test]
    fn one_hot_sets_exactly_one_true() {
        let out = run(one_hot, FieldValue::from("married_filing_jointly"), status_choices());
        let TransformOutput::Expanded(pairs) = out else {
            panic!("expected expansion");
        };
        let trues: Vec<&str> = pairs
            .iter()
            .filter(|(_, v)| *v == FieldValue::Bool(true))
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(trues, vec!["c2"]);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn one_hot_clears_all_on_unknown_selection() {
        let out = run(one_hot, FieldValue::from("widowed"), status_choices());
        let TransformOutput::Expanded(pairs) = out else {
            panic!("expected expansion");
        };
        assert!(pairs.iter().all(|(_, v)| *v == FieldValue::Bool(false)));
    }

    #[test]
    fn phone_formats_parenthesized() {
        let out = run(phone_paren, FieldValue::from("608.555.0123"), TransformArgs::default());
        assert_eq!(scalar_text(out), "(608) 555-0123");
    }

    #[test]
    fn checkmark_emits_configured_mark() {
        let out = run(checkmark, FieldValue::Bool(true), TransformArgs::default());
        assert_eq!(scalar_text(out), "X");
        let args = TransformArgs {
            mark: Some("✔".to_string()),
            ..TransformArgs::default()
        };
        let out = run(checkmark, FieldValue::Bool(true), args);
        assert_eq!(scalar_text(out), "✔");
        let out = run(checkmark, FieldValue::Bool(false), TransformArgs::default());
        assert_eq!(scalar_text(out), "");
    }

    #[test]
    fn append_companion_joins_sibling_value() {
        let record = AppRecord::new().with("middleInitial", "Q");
        let args = TransformArgs {
            companion: Some("middleInitial".to_string()),
            ..TransformArgs::default()
        };
        let value = FieldValue::from("Ada");
        let out = append_companion(&TransformInput {
            value: &value,
            record: &record,
            args: &args,
        });
        assert_eq!(scalar_text(out), "Ada Q");
    }

    #[test]
    fn append_companion_without_sibling_is_identity() {
        let record = AppRecord::new();
        let args = TransformArgs {
            companion: Some("middleInitial".to_string()),
            ..TransformArgs::default()
        };
        let value = FieldValue::from("Ada");
        let out = append_companion(&TransformInput {
            value: &value,
            record: &record,
            args: &args,
        });
        assert_eq!(scalar_text(out), "Ada");
    }

    #[test]
    fn digits_only_respects_max() {
        let args = TransformArgs {
            max_digits: Some(9),
            ..TransformArgs::default()
        };
        let out = run(digits_only, FieldValue::from("123-45-6789-000"), args);
        assert_eq!(scalar_text(out), "123456789");
    }

    #[test]
    fn ssn_dashed_repunches() {
        let out = run(ssn_dashed, FieldValue::from("123456789"), TransformArgs::default());
        assert_eq!(scalar_text(out), "123-45-6789");
    }
}
