//! Per-field fill outcomes and the aggregated summary.

use serde::{Deserialize, Serialize};

/// Outcome of writing a single target field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum FillStatus {
    /// Value written.
    Filled,
    /// Field is not data-bearing (button/unknown); nothing written.
    Skipped,
    /// Write failed; the reason is recorded and the batch continues.
    Error(String),
}

/// One target identifier paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub field: String,
    #[serde(flatten)]
    pub status: FillStatus,
}

impl FillOutcome {
    pub fn filled(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            status: FillStatus::Filled,
        }
    }

    pub fn skipped(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            status: FillStatus::Skipped,
        }
    }

    pub fn error(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            status: FillStatus::Error(reason.into()),
        }
    }
}

/// Aggregated result of one fill pass over a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSummary {
    /// Number of target identifiers processed.
    pub attempted: usize,
    pub filled: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Per-field outcomes, in processing order.
    pub details: Vec<FillOutcome>,
}

impl FillSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome and update the counters.
    pub fn record(&mut self, outcome: FillOutcome) {
        self.attempted += 1;
        match outcome.status {
            FillStatus::Filled => self.filled += 1,
            FillStatus::Skipped => self.skipped += 1,
            FillStatus::Error(_) => self.errors += 1,
        }
        self.details.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = FillSummary::new();
        summary.record(FillOutcome::filled("lname"));
        summary.record(FillOutcome::skipped("print_button"));
        summary.record(FillOutcome::error("zip", "field not found in template"));

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.filled, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert!(summary.has_errors());
    }

    #[test]
    fn summary_serializes_flat_status() {
        let mut summary = FillSummary::new();
        summary.record(FillOutcome::error("zip", "field not found in template"));
        let json = serde_json::to_string(&summary).expect("serialize summary");
        assert!(json.contains(r#""status":"error""#));
        assert!(json.contains(r#""reason":"field not found in template""#));
        let round: FillSummary = serde_json::from_str(&json).expect("deserialize summary");
        assert_eq!(round, summary);
    }
}
