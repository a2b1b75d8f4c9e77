//! Candidate ranking: raw similarity, a fixed bonus for local provenance,
//! a fixed penalty for auto-generated knowledge.

use verity_core::constants::{AUTO_GENERATED_PENALTY, LOCAL_PROVENANCE_BONUS};
use verity_core::models::{Candidate, Provenance};

/// Ranking score for one candidate.
///
/// Local evidence outranks external evidence of equal similarity; among
/// local evidence, human-curated outranks auto-generated.
pub fn score(candidate: &Candidate) -> f64 {
    let mut score = candidate.similarity;
    if candidate.provenance == Provenance::Local {
        score += LOCAL_PROVENANCE_BONUS;
    }
    if candidate.is_auto_generated {
        score -= AUTO_GENERATED_PENALTY;
    }
    score
}

/// Sort descending by score and keep the best `max_results`.
pub fn rank(mut candidates: Vec<Candidate>, max_results: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(max_results);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_outranks_external_at_equal_similarity() {
        let ranked = rank(
            vec![
                Candidate::external("web", "http://x", 0.7),
                Candidate::local("kb", "kb.txt", 0.7),
            ],
            10,
        );
        assert_eq!(ranked[0].text, "kb");
    }

    #[test]
    fn auto_generated_ranks_below_curated() {
        let mut auto = Candidate::local("auto", "auto.txt", 0.8);
        auto.is_auto_generated = true;
        let curated = Candidate::local("curated", "kb.txt", 0.75);

        let ranked = rank(vec![auto, curated], 10);
        assert_eq!(ranked[0].text, "curated");
    }

    #[test]
    fn truncates_to_max_results() {
        let candidates = (0..10)
            .map(|n| Candidate::local(format!("c{n}"), "kb.txt", n as f64 / 10.0))
            .collect();
        let ranked = rank(candidates, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].text, "c9");
    }
}
