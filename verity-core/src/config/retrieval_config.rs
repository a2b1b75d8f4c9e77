use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid-retrieval configuration.
///
/// Thresholds are configuration rather than constants so operators can tune
/// the recall/cost trade-off without a rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Max weighted local similarity below which external fallback fires.
    pub local_similarity_threshold: f64,
    /// Discount applied to auto-generated documents before taking the max,
    /// so self-generated knowledge cannot permanently suppress external
    /// verification.
    pub auto_generated_weight: f64,
    /// Ratio above which two candidates are fuzzy duplicates.
    pub fuzzy_dedup_threshold: f64,
    /// Maximum candidates returned.
    pub max_results: usize,
    /// Top-k documents pulled from the knowledge store.
    pub local_top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            local_similarity_threshold: defaults::DEFAULT_LOCAL_SIMILARITY_THRESHOLD,
            auto_generated_weight: defaults::DEFAULT_AUTO_GENERATED_WEIGHT,
            fuzzy_dedup_threshold: defaults::DEFAULT_FUZZY_DEDUP_THRESHOLD,
            max_results: defaults::DEFAULT_MAX_RESULTS,
            local_top_k: defaults::DEFAULT_LOCAL_TOP_K,
        }
    }
}
