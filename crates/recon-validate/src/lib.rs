//! Business rule validation for values reported by a repository.

pub mod rules;
pub mod violation;

pub use rules::{
    MAX_REASONABLE_VALUE, MAX_TEXT_LEN, PERCENTAGE_MAX, POPULATION_MAX, parse_number,
    validate_value,
};
pub use violation::{RuleViolation, ValidationOutcome};
