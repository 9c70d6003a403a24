//! Automatic field mapping between two repositories.
//!
//! Assignment is greedy in source order: each source field claims its best
//! still-unused target. This is not a globally optimal matching, and
//! reordering the source fields can change the result.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use recon_model::{ConfidenceLevel, Field, MappingSuggestion, SimilarityScore};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::shared_key_terms;
use crate::similarity::score_similarity;

/// Default minimum `overall` score for a suggestion.
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.30;

/// Scores at or above this are described as nearly identical.
const NEARLY_IDENTICAL: f64 = 0.9;
const SIMILAR_SPELLING: f64 = 0.8;
const MAX_REASON_TERMS: usize = 3;

/// Boundaries between confidence levels.
///
/// - Below `low`: rejected (no suggestion)
/// - `low` to `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - At or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.75,
            medium: 0.50,
            low: 0.30,
        }
    }
}

impl ConfidenceThresholds {
    /// Returns `None` if the score is below the low threshold.
    #[must_use]
    pub fn categorize(&self, overall: f64) -> Option<ConfidenceLevel> {
        if overall >= self.high {
            Some(ConfidenceLevel::High)
        } else if overall >= self.medium {
            Some(ConfidenceLevel::Medium)
        } else if overall >= self.low {
            Some(ConfidenceLevel::Low)
        } else {
            None
        }
    }
}

/// Suggestions plus the fields left without a partner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResult {
    /// Suggestions, best first.
    pub suggestions: Vec<MappingSuggestion>,
    /// Source fields in input order that received no suggestion.
    pub unmapped_sources: Vec<Field>,
    /// Target fields in input order that no source claimed.
    pub unmapped_targets: Vec<Field>,
}

impl MappingResult {
    #[must_use]
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for suggestion in &self.suggestions {
            *counts.entry(suggestion.confidence).or_insert(0) += 1;
        }
        counts
    }

    /// Suggestions at or above `min_level`.
    #[must_use]
    pub fn filter_by_level(&self, min_level: ConfidenceLevel) -> Vec<&MappingSuggestion> {
        self.suggestions
            .iter()
            .filter(|s| s.confidence >= min_level)
            .collect()
    }
}

/// Greedy source-order field mapper.
#[derive(Debug, Clone, Copy)]
pub struct AutoMapper {
    min_similarity: f64,
    thresholds: ConfidenceThresholds,
}

impl Default for AutoMapper {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SIMILARITY)
    }
}

impl AutoMapper {
    pub fn new(min_similarity: f64) -> Self {
        Self {
            min_similarity,
            thresholds: ConfidenceThresholds::default(),
        }
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Suggest one target per source field, best suggestions first.
    pub fn suggest(&self, sources: &[Field], targets: &[Field]) -> Vec<MappingSuggestion> {
        self.run(sources, targets).suggestions
    }

    pub fn run(&self, sources: &[Field], targets: &[Field]) -> MappingResult {
        // Targets claimed so far in this call, by index into `targets`.
        let mut used = BTreeSet::new();
        let mut suggestions = Vec::new();
        let mut unmapped_sources = Vec::new();

        for source in sources {
            let mut best: Option<(usize, PairScore)> = None;
            for (index, target) in targets.iter().enumerate() {
                if used.contains(&index) {
                    continue;
                }
                let pair = score_fields(source, target);
                let better = best
                    .as_ref()
                    .is_none_or(|(_, current)| pair.score.overall > current.score.overall);
                if better {
                    best = Some((index, pair));
                }
            }

            let accepted = best.and_then(|(index, pair)| {
                if pair.score.overall < self.min_similarity {
                    return None;
                }
                let confidence = self.thresholds.categorize(pair.score.overall)?;
                Some((index, pair, confidence))
            });

            match accepted {
                Some((index, pair, confidence)) => {
                    used.insert(index);
                    let target = &targets[index];
                    debug!(
                        source = %source.id,
                        target = %target.id,
                        overall = pair.score.overall,
                        confidence = %confidence,
                        "suggested mapping"
                    );
                    suggestions.push(MappingSuggestion {
                        source: source.clone(),
                        target: target.clone(),
                        reasons: pair.reasons(),
                        score: pair.score,
                        confidence,
                    });
                }
                None => {
                    debug!(source = %source.id, "no target above threshold");
                    unmapped_sources.push(source.clone());
                }
            }
        }

        // Stable: equal scores keep source order.
        suggestions.sort_by(|a, b| {
            b.score
                .overall
                .partial_cmp(&a.score.overall)
                .unwrap_or(Ordering::Equal)
        });

        let unmapped_targets = targets
            .iter()
            .enumerate()
            .filter(|(index, _)| !used.contains(index))
            .map(|(_, field)| field.clone())
            .collect();

        MappingResult {
            suggestions,
            unmapped_sources,
            unmapped_targets,
        }
    }
}

/// Suggest mappings from `sources` to `targets` with the default tiers.
pub fn generate_auto_mappings(
    sources: &[Field],
    targets: &[Field],
    min_similarity: f64,
) -> Vec<MappingSuggestion> {
    AutoMapper::new(min_similarity).suggest(sources, targets)
}

/// The winning comparison for one source/target pair.
struct PairScore {
    score: SimilarityScore,
    shared_terms: Vec<String>,
    via_form_name: bool,
}

impl PairScore {
    fn reasons(&self) -> Vec<String> {
        let mut reasons = Vec::new();
        let nearly_identical = self.score.overall >= NEARLY_IDENTICAL;
        if nearly_identical {
            reasons.push("nearly identical names".to_string());
        }
        if !self.shared_terms.is_empty() {
            let terms: Vec<&str> = self
                .shared_terms
                .iter()
                .take(MAX_REASON_TERMS)
                .map(String::as_str)
                .collect();
            reasons.push(format!("common terms: {}", terms.join(", ")));
        }
        if !nearly_identical && self.score.containment >= 1.0 {
            reasons.push("one name contains the other".to_string());
        }
        if !nearly_identical && self.score.levenshtein >= SIMILAR_SPELLING {
            reasons.push("similar spelling".to_string());
        }
        if self.via_form_name {
            reasons.push("matched on form names".to_string());
        }
        reasons
    }
}

/// Compare display names, and form names when both fields have one; keep the better.
fn score_fields(source: &Field, target: &Field) -> PairScore {
    let by_name = score_similarity(&source.display_name, &target.display_name);
    if let (Some(source_form), Some(target_form)) = (source.form_label(), target.form_label()) {
        let by_form = score_similarity(source_form, target_form);
        if by_form.overall > by_name.overall {
            return PairScore {
                score: by_form,
                shared_terms: shared_key_terms(source_form, target_form),
                via_form_name: true,
            };
        }
    }
    PairScore {
        score: by_name,
        shared_terms: shared_key_terms(&source.display_name, &target.display_name),
        via_form_name: false,
    }
}
