//! Property tests for transformer totality.

use proptest::prelude::*;

use formfill_model::{AppRecord, FieldValue, GroupSpec, TransformArgs};
use formfill_transform::transforms::{
    TransformInput, TransformOutput, currency_whole, split_digit_groups,
};

fn run_scalar(
    f: fn(&TransformInput<'_>) -> TransformOutput,
    value: FieldValue,
    args: &TransformArgs,
) -> String {
    let record = AppRecord::new();
    match f(&TransformInput {
        value: &value,
        record: &record,
        args,
    }) {
        TransformOutput::Scalar(v) => v.display_string(),
        TransformOutput::Expanded(_) => panic!("expected scalar output"),
    }
}

proptest! {
    // currency_whole always yields a parseable integer no larger in
    // magnitude than its input.
    #[test]
    fn currency_output_is_truncated_integer(amount in -1.0e12f64..1.0e12f64) {
        let args = TransformArgs::default();
        let out = run_scalar(currency_whole, FieldValue::Number(amount), &args);
        let parsed: i64 = out.parse().expect("integer output");
        prop_assert!(parsed.unsigned_abs() as f64 <= amount.abs());
        prop_assert!((amount.abs() - parsed.unsigned_abs() as f64) < 1.0);
    }

    // currency_whole never fails on arbitrary text.
    #[test]
    fn currency_is_total_over_text(raw in ".*") {
        let args = TransformArgs::default();
        let out = run_scalar(currency_whole, FieldValue::Text(raw), &args);
        prop_assert!(out.parse::<i64>().is_ok() || out == "0");
    }

    // Group outputs always re-concatenate to a prefix of the stripped digits.
    #[test]
    fn split_groups_cover_digit_prefix(raw in "[0-9 ()-]{0,20}", widths in proptest::collection::vec(1usize..5, 1..4)) {
        let groups: Vec<GroupSpec> = widths
            .iter()
            .enumerate()
            .map(|(i, width)| GroupSpec {
                target: format!("g{i}"),
                width: *width,
            })
            .collect();
        let args = TransformArgs {
            groups,
            ..TransformArgs::default()
        };
        let record = AppRecord::new();
        let value = FieldValue::Text(raw.clone());
        let out = split_digit_groups(&TransformInput {
            value: &value,
            record: &record,
            args: &args,
        });
        let TransformOutput::Expanded(pairs) = out else {
            panic!("expected expansion");
        };
        prop_assert_eq!(pairs.len(), widths.len());
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let joined: String = pairs
            .iter()
            .map(|(_, v)| v.display_string())
            .collect::<Vec<_>>()
            .join("");
        prop_assert!(digits.starts_with(&joined));
    }
}
