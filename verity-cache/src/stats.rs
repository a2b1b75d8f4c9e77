//! Cache hit/miss counters and query-frequency tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

/// Point-in-time view of cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatsSnapshot {
    pub exact_hits: u64,
    pub semantic_hits: u64,
    pub misses: u64,
    pub stale_evictions: u64,
    pub unique_queries: u64,
    /// Queries seen at least `hot_query_threshold` times.
    pub hot_queries: u64,
}

impl CacheStatsSnapshot {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.exact_hits + self.semantic_hits;
        let total = hits + self.misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// Internal counters. Updated lock-free on the read path.
#[derive(Default)]
pub(crate) struct CacheStats {
    pub exact_hits: AtomicU64,
    pub semantic_hits: AtomicU64,
    pub misses: AtomicU64,
    pub stale_evictions: AtomicU64,
    frequency: DashMap<String, u64>,
}

impl CacheStats {
    pub fn record_query(&self, query_hash: &str) {
        *self.frequency.entry(query_hash.to_string()).or_insert(0) += 1;
    }

    pub fn snapshot(&self, hot_threshold: u64) -> CacheStatsSnapshot {
        let hot_queries = self
            .frequency
            .iter()
            .filter(|kv| *kv.value() >= hot_threshold)
            .count() as u64;
        CacheStatsSnapshot {
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            semantic_hits: self.semantic_hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale_evictions: self.stale_evictions.load(Ordering::Relaxed),
            unique_queries: self.frequency.len() as u64,
            hot_queries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_queries_counted_at_threshold() {
        let stats = CacheStats::default();
        for _ in 0..3 {
            stats.record_query("hot");
        }
        stats.record_query("cold");

        let snap = stats.snapshot(3);
        assert_eq!(snap.unique_queries, 2);
        assert_eq!(snap.hot_queries, 1);
    }

    #[test]
    fn hit_rate_handles_zero_total() {
        let snap = CacheStats::default().snapshot(3);
        assert_eq!(snap.hit_rate(), 0.0);
    }
}
