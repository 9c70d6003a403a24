pub mod comparison;
pub mod error;
pub mod field;
pub mod group;
pub mod mapping;
pub mod value;

pub use comparison::{ComparisonResult, ComparisonStatus, ComparisonSummary, SlotValue};
pub use error::{ModelError, Result};
pub use field::{Field, MAX_REPOSITORIES, MIN_REPOSITORIES, Repository, RepositorySet};
pub use group::{FieldSlot, LogicalFieldGroup};
pub use mapping::{ConfidenceLevel, MappingSuggestion, SimilarityScore};
pub use value::{ObservedValue, ValuesByRepository};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_statuses() {
        let mut summary = ComparisonSummary::default();
        summary.record(ComparisonStatus::Valid);
        summary.record(ComparisonStatus::Missing);
        summary.record(ComparisonStatus::Valid);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(ComparisonStatus::Valid), 2);
        assert_eq!(summary.problem_count(), 1);
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ComparisonStatus::OutOfRange).expect("serialize");
        assert_eq!(json, "\"out_of_range\"");
    }
}
