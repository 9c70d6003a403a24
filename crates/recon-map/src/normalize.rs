//! Label normalization and key-term extraction.

use std::collections::BTreeSet;

/// Words that carry no meaning when comparing field labels.
///
/// Tokens of two characters or fewer are dropped separately.
#[rustfmt::skip]
pub const STOP_WORDS: &[&str] = &[
    // articles
    "the", "an", "a",
    // prepositions and conjunctions
    "of", "in", "on", "at", "to", "for", "with", "by", "from", "into", "per", "and", "or",
    "under", "over", "among", "between", "within", "without", "during", "after", "before",
    // auxiliary verbs
    "is", "are", "was", "were", "be", "been", "being", "has", "have", "had", "do", "does",
    "did", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
    // generic counters
    "total", "number",
];

/// Lowercases, turns punctuation into spaces and collapses whitespace.
pub fn normalize_label(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Significant words of a label, as a sorted set.
pub fn key_terms(label: &str) -> BTreeSet<String> {
    normalize_label(label)
        .split_whitespace()
        .filter(|word| word.chars().count() > 2 && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// Key terms present in both labels, sorted.
pub fn shared_key_terms(a: &str, b: &str) -> Vec<String> {
    let right = key_terms(b);
    key_terms(a)
        .into_iter()
        .filter(|term| right.contains(term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_punctuation() {
        assert_eq!(
            normalize_label("  Malaria cases, number (<5 yrs) "),
            "malaria cases number 5 yrs"
        );
        assert_eq!(normalize_label("ANC-1st_visit"), "anc 1st visit");
        assert_eq!(normalize_label("..."), "");
    }

    #[test]
    fn key_terms_drop_short_and_stop_words() {
        let terms = key_terms("Total number of the malaria cases in OPD");
        let expected: BTreeSet<String> = ["cases", "malaria", "opd"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(terms, expected);
    }

    #[test]
    fn shared_terms_are_sorted() {
        assert_eq!(
            shared_key_terms("Malaria cases confirmed", "Confirmed malaria cases"),
            vec!["cases", "confirmed", "malaria"]
        );
    }
}
