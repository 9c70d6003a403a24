//! Reconciliation results and their aggregate summary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of reconciling one field group for one org unit and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    /// Every repository reported the same value and no rule failed.
    Valid,
    /// Every repository reported, but the values differ.
    Mismatch,
    /// At least one repository has no value.
    Missing,
    /// Every repository reported and at least one value breaks a business rule.
    OutOfRange,
}

impl ComparisonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Mismatch => "mismatch",
            Self::Missing => "missing",
            Self::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for ComparisonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value one repository slot contributed to a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotValue {
    pub repository_id: String,
    pub repository_name: String,
    /// Field mapped into the slot, if any.
    pub field_id: Option<String>,
    /// Raw reported value, if any.
    pub value: Option<String>,
}

impl SlotValue {
    /// The value unless absent or blank.
    pub fn present(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.trim().is_empty())
    }
}

/// One row per field group × org unit × period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub group: String,
    pub org_unit: String,
    pub period: String,
    pub values: Vec<SlotValue>,
    pub suggested_value: Option<String>,
    pub status: ComparisonStatus,
    pub messages: Vec<String>,
}

/// Status counts over a batch of comparison results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub total: usize,
    pub valid: usize,
    pub mismatch: usize,
    pub missing: usize,
    pub out_of_range: usize,
}

impl ComparisonSummary {
    pub fn from_results(results: &[ComparisonResult]) -> Self {
        results.iter().fold(Self::default(), |mut summary, result| {
            summary.record(result.status);
            summary
        })
    }

    pub fn record(&mut self, status: ComparisonStatus) {
        self.total += 1;
        match status {
            ComparisonStatus::Valid => self.valid += 1,
            ComparisonStatus::Mismatch => self.mismatch += 1,
            ComparisonStatus::Missing => self.missing += 1,
            ComparisonStatus::OutOfRange => self.out_of_range += 1,
        }
    }

    pub fn count(&self, status: ComparisonStatus) -> usize {
        match status {
            ComparisonStatus::Valid => self.valid,
            ComparisonStatus::Mismatch => self.mismatch,
            ComparisonStatus::Missing => self.missing,
            ComparisonStatus::OutOfRange => self.out_of_range,
        }
    }

    /// Rows needing attention (everything but `valid`).
    pub fn problem_count(&self) -> usize {
        self.total - self.valid
    }

    /// Share of valid rows, 0.0 for an empty batch.
    pub fn agreement_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}
