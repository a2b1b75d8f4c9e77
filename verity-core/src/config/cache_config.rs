use serde::{Deserialize, Serialize};

use super::defaults;

/// Versioned-cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cosine similarity above which a cached query is a semantic hit.
    pub semantic_threshold: f64,
    /// Entry time-to-live in seconds (exact tier).
    pub ttl_secs: u64,
    /// Maximum entries held by the exact tier.
    pub exact_capacity: u64,
    /// Queries seen at least this often count as hot in statistics.
    pub hot_query_threshold: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            semantic_threshold: defaults::DEFAULT_SEMANTIC_CACHE_THRESHOLD,
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
            exact_capacity: defaults::DEFAULT_EXACT_TIER_CAPACITY,
            hot_query_threshold: defaults::DEFAULT_HOT_QUERY_THRESHOLD,
        }
    }
}
