//! Two-phase candidate deduplication.
//!
//! Phase A drops exact duplicates by hashing a normalized prefix of each
//! candidate's text. Phase B drops fuzzy duplicates by comparing a shorter
//! normalized prefix against every already-accepted candidate with a
//! sequence-similarity ratio. The whole step is a fixed point: running it
//! on its own output changes nothing.

use std::collections::HashSet;

use tracing::debug;
use verity_core::constants::{DEDUP_FUZZY_PREFIX_CHARS, DEDUP_HASH_PREFIX_CHARS};
use verity_core::models::Candidate;
use verity_core::query::{char_prefix, collapse_whitespace};

/// Deduplicate merged candidates, preserving order of first occurrence.
///
/// `fuzzy_threshold` is the ratio above which (strictly) two candidates
/// count as duplicates.
pub fn deduplicate(candidates: Vec<Candidate>, fuzzy_threshold: f64) -> Vec<Candidate> {
    let total = candidates.len();

    // Phase A: exact, by hash of the normalized long prefix.
    let mut seen_hashes: HashSet<[u8; 32]> = HashSet::new();
    let mut hash_unique = Vec::new();
    for candidate in candidates {
        let signature = collapse_whitespace(&candidate.text);
        if signature.is_empty() {
            continue;
        }
        let prefix = char_prefix(&signature, DEDUP_HASH_PREFIX_CHARS);
        let hash = *blake3::hash(prefix.as_bytes()).as_bytes();
        if seen_hashes.insert(hash) {
            hash_unique.push((signature, candidate));
        }
    }

    // Phase B: fuzzy, against everything already accepted.
    let mut accepted: Vec<(String, Candidate)> = Vec::new();
    for (signature, mut candidate) in hash_unique {
        let probe = char_prefix(&signature, DEDUP_FUZZY_PREFIX_CHARS);
        let duplicate = accepted.iter().any(|(kept_sig, _)| {
            let kept = char_prefix(kept_sig, DEDUP_FUZZY_PREFIX_CHARS);
            strsim::normalized_levenshtein(probe, kept) > fuzzy_threshold
        });
        if duplicate {
            continue;
        }
        candidate.survived_dedup = true;
        accepted.push((signature, candidate));
    }

    let survivors: Vec<Candidate> = accepted.into_iter().map(|(_, c)| c).collect();
    if survivors.len() < total {
        debug!(before = total, after = survivors.len(), "candidates deduplicated");
    }
    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const THRESHOLD: f64 = 0.85;

    fn candidate(text: &str) -> Candidate {
        Candidate::local(text, "src.txt", 0.8)
    }

    #[test]
    fn exact_duplicates_dropped() {
        let survivors = deduplicate(
            vec![candidate("the moon landing happened in 1969"),
                 candidate("the   moon\nlanding happened in 1969")],
            THRESHOLD,
        );
        assert_eq!(survivors.len(), 1);
        assert!(survivors[0].survived_dedup);
    }

    #[test]
    fn ninety_percent_overlap_keeps_one() {
        // ~90% textual overlap: ratio 0.9 > 0.85.
        let base = "vaccines do not cause autism according to every large study";
        let near = "vaccines do not cause autism according to every major study";
        let survivors = deduplicate(vec![candidate(base), candidate(near)], THRESHOLD);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].text, base);
    }

    #[test]
    fn distinct_texts_both_survive() {
        let survivors = deduplicate(
            vec![
                candidate("the eiffel tower is in paris"),
                candidate("mount everest is the tallest mountain on earth"),
            ],
            THRESHOLD,
        );
        assert_eq!(survivors.len(), 2);
    }

    #[test]
    fn whitespace_only_candidates_removed() {
        let survivors = deduplicate(vec![candidate("  \n\t ")], THRESHOLD);
        assert!(survivors.is_empty());
    }

    #[test]
    fn first_occurrence_wins() {
        let survivors = deduplicate(
            vec![
                Candidate::local("claim text here about a thing", "local.txt", 0.9),
                Candidate::external("claim text here about a thing", "http://x", 0.5),
            ],
            THRESHOLD,
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].source, "local.txt");
    }

    proptest! {
        /// Dedup is a fixed point on its own output.
        #[test]
        fn idempotent(texts in proptest::collection::vec("[a-z ]{0,60}", 0..12)) {
            let candidates: Vec<Candidate> = texts.iter().map(|t| candidate(t)).collect();
            let once = deduplicate(candidates, THRESHOLD);
            let twice = deduplicate(once.clone(), THRESHOLD);
            prop_assert_eq!(once.len(), twice.len());
            for (a, b) in once.iter().zip(&twice) {
                prop_assert_eq!(&a.text, &b.text);
            }
        }
    }
}
