//! Rule violation types.
//!
//! Each variant carries only the data its message needs.

use serde::{Deserialize, Serialize};

use crate::rules::{MAX_REASONABLE_VALUE, MAX_TEXT_LEN, POPULATION_MAX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleViolation {
    /// Free text longer than the allowed length.
    TextTooLong { length: usize },
    /// Numeric value below zero.
    Negative { value: f64 },
    /// Population count above the plausible maximum.
    PopulationTooLarge { value: f64 },
    /// Percentage or rate above 100.
    PercentageAbove100 { value: f64 },
    /// Any numeric value above the global ceiling.
    UnreasonablyLarge { value: f64 },
}

impl RuleViolation {
    pub fn rule_id(&self) -> &'static str {
        match self {
            Self::TextTooLong { .. } => "BR001",
            Self::Negative { .. } => "BR002",
            Self::PopulationTooLarge { .. } => "BR003",
            Self::PercentageAbove100 { .. } => "BR004",
            Self::UnreasonablyLarge { .. } => "BR005",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::TextTooLong { .. } => {
                format!("Text value too long (max {MAX_TEXT_LEN} characters)")
            }
            Self::Negative { .. } => "Value cannot be negative".to_string(),
            Self::PopulationTooLarge { .. } => {
                format!("Population value exceeds {}", group_thousands(POPULATION_MAX))
            }
            Self::PercentageAbove100 { .. } => "Percentage/rate cannot exceed 100%".to_string(),
            Self::UnreasonablyLarge { .. } => format!(
                "Value is unreasonably large (over {})",
                group_thousands(MAX_REASONABLE_VALUE)
            ),
        }
    }
}

impl std::fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Result of checking one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    /// Message of the violated rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violation: Option<RuleViolation>,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            violation: None,
        }
    }

    pub fn fail(violation: RuleViolation) -> Self {
        Self {
            valid: false,
            error: Some(violation.message()),
            violation: Some(violation),
        }
    }

    /// Human-readable reason when invalid.
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
