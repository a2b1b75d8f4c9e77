//! Semantic tier: nearest-neighbor lookup over previously cached queries.
//!
//! Holds the embedding of every cached query plus the exact-tier key it
//! points at. Process-local; entries die with the process, which is
//! strictly safe under the version-validity rule.

use std::sync::{PoisonError, RwLock};

use verity_core::constants::SEMANTIC_INSERT_SUPPRESSION;
use verity_core::query::cosine_similarity;

/// One cached query in embedding space.
#[derive(Debug, Clone)]
pub struct SemanticEntry {
    /// Exact-tier key of the entry this query points at.
    pub cache_key: String,
    pub query_text: String,
    pub embedding: Vec<f32>,
    pub bound_version: Option<String>,
}

/// The nearest cached query to a probe vector.
#[derive(Debug, Clone)]
pub struct Neighbor {
    pub entry: SemanticEntry,
    pub similarity: f64,
}

/// Brute-force cosine index over cached query embeddings.
#[derive(Default)]
pub struct SemanticTier {
    entries: RwLock<Vec<SemanticEntry>>,
}

impl SemanticTier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most similar cached query, if any.
    pub fn nearest(&self, vector: &[f32]) -> Option<Neighbor> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|entry| Neighbor {
                similarity: cosine_similarity(&entry.embedding, vector),
                entry: entry.clone(),
            })
            .max_by(|a, b| {
                a.similarity
                    .partial_cmp(&b.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Insert a cached query, unless a near-identical one (similarity above
    /// the suppression threshold) is already present — re-vectorizing the
    /// same question over and over would only bloat the index.
    ///
    /// Returns whether the entry was inserted.
    pub fn insert(&self, entry: SemanticEntry) -> bool {
        let suppressed = self
            .nearest(&entry.embedding)
            .is_some_and(|n| n.similarity > SEMANTIC_INSERT_SUPPRESSION);
        if suppressed {
            return false;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        true
    }

    /// Drop entries that fail a predicate (stale sweep).
    pub fn retain(&self, f: impl Fn(&SemanticEntry) -> bool) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|e| f(e));
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, embedding: Vec<f32>) -> SemanticEntry {
        SemanticEntry {
            cache_key: key.to_string(),
            query_text: key.to_string(),
            embedding,
            bound_version: Some("v1".to_string()),
        }
    }

    #[test]
    fn nearest_picks_the_best_match() {
        let tier = SemanticTier::new();
        tier.insert(entry("a", vec![1.0, 0.0]));
        tier.insert(entry("b", vec![0.0, 1.0]));

        let n = tier.nearest(&[0.9, 0.1]).unwrap();
        assert_eq!(n.entry.cache_key, "a");
        assert!(n.similarity > 0.9);
    }

    #[test]
    fn near_identical_insert_is_suppressed() {
        let tier = SemanticTier::new();
        assert!(tier.insert(entry("a", vec![1.0, 0.0])));
        assert!(!tier.insert(entry("a2", vec![1.0, 0.0001])));
        assert_eq!(tier.len(), 1);
    }

    #[test]
    fn distinct_queries_both_inserted() {
        let tier = SemanticTier::new();
        assert!(tier.insert(entry("a", vec![1.0, 0.0])));
        assert!(tier.insert(entry("b", vec![0.0, 1.0])));
        assert_eq!(tier.len(), 2);
    }

    #[test]
    fn retain_drops_failures() {
        let tier = SemanticTier::new();
        tier.insert(entry("a", vec![1.0, 0.0]));
        tier.insert(entry("b", vec![0.0, 1.0]));
        let dropped = tier.retain(|e| e.cache_key == "a");
        assert_eq!(dropped, 1);
        assert_eq!(tier.len(), 1);
    }
}
