//! Merge per-batch term lists into the final ranked glossary

use devglossary_domain::ExtractedTerm;
use std::collections::HashSet;

/// Combine batch results into one ranked list
///
/// Terms below `min_confidence` are dropped, then the first occurrence of each
/// case-insensitive term wins; a later duplicate is discarded even when it
/// carries a higher confidence. The survivors are stable-sorted by descending
/// confidence and cut to `max_terms`.
pub fn merge_and_rank<I>(terms: I, min_confidence: f64, max_terms: usize) -> Vec<ExtractedTerm>
where
    I: IntoIterator<Item = ExtractedTerm>,
{
    let mut seen = HashSet::new();
    let mut merged: Vec<ExtractedTerm> = terms
        .into_iter()
        .filter(|t| t.confidence >= min_confidence)
        .filter(|t| seen.insert(t.dedup_key()))
        .collect();

    merged.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    merged.truncate(max_terms);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(name: &str, confidence: f64) -> ExtractedTerm {
        ExtractedTerm::new(name, format!("Definition of {}", name), confidence)
    }

    #[test]
    fn test_first_occurrence_wins() {
        let merged = merge_and_rank(vec![term("Foo", 0.9), term("foo", 0.95)], 0.3, 100);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].term, "Foo");
        assert_eq!(merged[0].confidence, 0.9);
    }

    #[test]
    fn test_low_confidence_filtered_before_dedup() {
        // the low-confidence spelling must not shadow the later one
        let merged = merge_and_rank(vec![term("Foo", 0.1), term("FOO", 0.7)], 0.3, 100);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].term, "FOO");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let merged = merge_and_rank(vec![term("Edge", 0.3), term("Below", 0.29)], 0.3, 100);
        let names: Vec<_> = merged.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["Edge"]);
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let merged = merge_and_rank(
            vec![term("A", 0.5), term("B", 0.9), term("C", 0.5), term("D", 0.7)],
            0.3,
            100,
        );
        let names: Vec<_> = merged.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn test_truncated_to_max_terms() {
        let terms: Vec<_> = (0..150).map(|i| term(&format!("T{}", i), 0.5)).collect();
        let merged = merge_and_rank(terms, 0.3, 100);

        assert_eq!(merged.len(), 100);
        assert_eq!(merged[0].term, "T0");
        assert_eq!(merged[99].term, "T99");
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_and_rank(Vec::new(), 0.3, 100).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn term_strategy() -> impl Strategy<Value = ExtractedTerm> {
        ("[a-cA-C]{1,3}", 0.0f64..=1.0).prop_map(|(name, c)| ExtractedTerm::new(name, "d", c))
    }

    proptest! {
        /// Property: result is unique, above threshold, sorted and bounded
        #[test]
        fn test_merge_invariants(
            terms in prop::collection::vec(term_strategy(), 0..60),
            max_terms in 1usize..40,
        ) {
            let merged = merge_and_rank(terms, 0.3, max_terms);

            prop_assert!(merged.len() <= max_terms);
            let mut keys = HashSet::new();
            for t in &merged {
                prop_assert!(t.confidence >= 0.3);
                prop_assert!(keys.insert(t.dedup_key()));
            }
            for pair in merged.windows(2) {
                prop_assert!(pair[0].confidence >= pair[1].confidence);
            }
        }
    }
}
