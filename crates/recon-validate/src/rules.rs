//! Plausibility rules for a single reported value.
//!
//! Rules run in a fixed order and the first failure wins. Blank values are
//! always valid here: absence is the reconciler's concern.

use crate::violation::{RuleViolation, ValidationOutcome};

/// Longest accepted free-text value, in characters.
pub const MAX_TEXT_LEN: usize = 500;
/// Largest plausible value for fields labelled as a population.
pub const POPULATION_MAX: u64 = 10_000_000;
/// Largest plausible value for percentages and rates.
pub const PERCENTAGE_MAX: f64 = 100.0;
/// Largest plausible value for any numeric field.
pub const MAX_REASONABLE_VALUE: u64 = 999_999_999;

/// Check `value` against the business rules for a field labelled `field_label`.
pub fn validate_value(value: &str, field_label: &str) -> ValidationOutcome {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::ok();
    }

    let Some(number) = parse_number(trimmed) else {
        let length = value.chars().count();
        if length > MAX_TEXT_LEN {
            return ValidationOutcome::fail(RuleViolation::TextTooLong { length });
        }
        return ValidationOutcome::ok();
    };

    match check_number(number, &field_label.to_lowercase()) {
        Some(violation) => ValidationOutcome::fail(violation),
        None => ValidationOutcome::ok(),
    }
}

fn check_number(value: f64, label: &str) -> Option<RuleViolation> {
    if value < 0.0 {
        return Some(RuleViolation::Negative { value });
    }
    if label.contains("population") && value > POPULATION_MAX as f64 {
        return Some(RuleViolation::PopulationTooLarge { value });
    }
    if (label.contains("percent") || label.contains("rate")) && value > PERCENTAGE_MAX {
        return Some(RuleViolation::PercentageAbove100 { value });
    }
    if value > MAX_REASONABLE_VALUE as f64 {
        return Some(RuleViolation::UnreasonablyLarge { value });
    }
    None
}

/// A finite number, or `None` for text.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_rejects_text_and_infinities() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("12 cases"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(validate_value("100", "Completion rate").valid);
        assert!(validate_value("10000000", "Population").valid);
        assert!(validate_value("999999999", "Doses").valid);
        assert!(validate_value(&"x".repeat(MAX_TEXT_LEN), "Comment").valid);
    }
}
