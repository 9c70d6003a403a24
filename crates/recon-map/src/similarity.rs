//! Fuzzy similarity between two field labels.
//!
//! Four measures are combined into one weighted score:
//! - edit distance (Levenshtein, normalized by the longer label)
//! - Jaro-Winkler, which rewards a shared prefix
//! - Jaccard overlap of key terms
//! - substring containment of the labels or their words
//!
//! Term overlap and containment carry most of the weight: labels from
//! different systems tend to reorder and reword the same domain terms.

use rapidfuzz::distance::{jaro_winkler, levenshtein};
use recon_model::SimilarityScore;

use crate::normalize::{key_terms, normalize_label};

const TERM_OVERLAP_WEIGHT: f64 = 0.35;
const CONTAINMENT_WEIGHT: f64 = 0.30;
const JARO_WINKLER_WEIGHT: f64 = 0.20;
const LEVENSHTEIN_WEIGHT: f64 = 0.15;

/// Words this short are ignored by the word-level containment check.
const CONTAINMENT_MIN_WORD_LEN: usize = 4;

/// Score how alike two labels are.
///
/// Labels that normalize to the same text score a perfect 1.0 on every
/// component.
pub fn score_similarity(label_a: &str, label_b: &str) -> SimilarityScore {
    let a = normalize_label(label_a);
    let b = normalize_label(label_b);
    if a == b {
        return SimilarityScore::perfect();
    }

    let levenshtein = levenshtein_similarity(&a, &b);
    let jaro_winkler = jaro_winkler::similarity(a.chars(), b.chars());
    let term_overlap = term_overlap(label_a, label_b);
    let containment = containment(&a, &b);
    let overall = TERM_OVERLAP_WEIGHT * term_overlap
        + CONTAINMENT_WEIGHT * containment
        + JARO_WINKLER_WEIGHT * jaro_winkler
        + LEVENSHTEIN_WEIGHT * levenshtein;

    SimilarityScore {
        levenshtein,
        jaro_winkler,
        term_overlap,
        containment,
        overall,
    }
}

/// `1 - distance / max(len)`, counted in characters. Two empty strings are identical.
fn levenshtein_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein::distance(a.chars(), b.chars());
    1.0 - distance as f64 / longest as f64
}

/// Jaccard similarity of the key-term sets.
fn term_overlap(label_a: &str, label_b: &str) -> f64 {
    let left = key_terms(label_a);
    let right = key_terms(label_b);
    match (left.is_empty(), right.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let shared = left.intersection(&right).count();
            let union = left.union(&right).count();
            shared as f64 / union as f64
        }
    }
}

/// Containment of normalized labels `a` and `b`.
///
/// 1.0 when one label is a substring of the other. Otherwise the share of
/// longer words that contain, or are contained in, a word of the other
/// label. Both directions are counted and the larger count is divided by
/// the larger word count, so the result does not depend on argument order.
fn containment(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(b) || b.contains(a) {
        return 1.0;
    }

    let left = long_words(a);
    let right = long_words(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let matched = overlapping_words(&left, &right).max(overlapping_words(&right, &left));
    matched as f64 / left.len().max(right.len()) as f64
}

/// Words of `from` that contain or are contained in some word of `to`.
fn overlapping_words(from: &[&str], to: &[&str]) -> usize {
    from.iter()
        .filter(|word| {
            to.iter()
                .any(|other| word.contains(*other) || other.contains(**word))
        })
        .count()
}

fn long_words(normalized: &str) -> Vec<&str> {
    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() >= CONTAINMENT_MIN_WORD_LEN)
        .collect()
}
