use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Label similarity broken down into its components.
///
/// Every component lies in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityScore {
    /// `1 - levenshtein / max(len)`.
    pub levenshtein: f64,
    /// Jaro-Winkler, rewarding a shared prefix.
    pub jaro_winkler: f64,
    /// Jaccard overlap of significant words.
    pub term_overlap: f64,
    /// Substring containment between the labels or their words.
    pub containment: f64,
    /// Weighted combination of the above.
    pub overall: f64,
}

impl SimilarityScore {
    /// Score of two labels that normalize to the same text.
    pub const fn perfect() -> Self {
        Self {
            levenshtein: 1.0,
            jaro_winkler: 1.0,
            term_overlap: 1.0,
            containment: 1.0,
            overall: 1.0,
        }
    }
}

/// Coarse bucket summarizing a similarity score for human review.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    /// Weak match, needs verification.
    Low,
    /// Reasonable match, should be reviewed.
    Medium,
    /// Near-certain match.
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed source-to-target field pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSuggestion {
    pub source: Field,
    pub target: Field,
    pub score: SimilarityScore,
    pub confidence: ConfidenceLevel,
    /// Explanations for reviewers; not used by any decision.
    pub reasons: Vec<String>,
}
