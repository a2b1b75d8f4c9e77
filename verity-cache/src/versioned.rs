//! VersionedCache — the two tiers behind one interface, with lazy
//! version-based invalidation.
//!
//! Every entry is stamped with the knowledge version active when it was
//! written. No sweep runs on version change; staleness is detected on the
//! next read and the entry evicted then. `sweep_stale` exists purely to
//! bound memory growth.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use verity_core::config::CacheConfig;
use verity_core::models::CacheEntry;
use verity_core::query;
use verity_core::traits::{IEmbeddingProvider, IVersionProbe};

use crate::exact::ExactTier;
use crate::semantic::{SemanticEntry, SemanticTier};
use crate::stats::{CacheStats, CacheStatsSnapshot};

/// How a lookup was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Miss,
    Exact,
    Semantic,
}

/// Two-tier cache of query → opaque payload, validated against the
/// current knowledge version on every read.
pub struct VersionedCache {
    exact: ExactTier,
    semantic: SemanticTier,
    embedder: Arc<dyn IEmbeddingProvider>,
    versions: Arc<dyn IVersionProbe>,
    config: CacheConfig,
    stats: CacheStats,
}

impl VersionedCache {
    pub fn new(
        config: CacheConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        versions: Arc<dyn IVersionProbe>,
    ) -> Self {
        let exact = ExactTier::new(config.exact_capacity, Duration::from_secs(config.ttl_secs));
        Self {
            exact,
            semantic: SemanticTier::new(),
            embedder,
            versions,
            config,
            stats: CacheStats::default(),
        }
    }

    /// The version-validity rule. An entry is readable iff its bound
    /// version equals the current one:
    ///
    /// - absent / absent: valid (bootstrap — no store has ever been built)
    /// - absent / present: stale (entry predates the first build)
    /// - present, equal: valid
    /// - present, different (or version gone): stale
    fn version_valid(bound: Option<&str>, current: Option<&str>) -> bool {
        bound == current
    }

    /// Look up a cached payload.
    ///
    /// Exact tier first; on miss, the query is embedded and the semantic
    /// tier searched. A semantic hit above the threshold is promoted into
    /// the exact tier under this query's hash so the next identical query
    /// is an exact hit. If the embedding collaborator fails, the lookup
    /// degrades to exact-only.
    pub fn get(&self, query: &str) -> (Option<serde_json::Value>, HitKind) {
        let hash = query::query_hash(query);
        self.stats.record_query(&hash);
        let current = self.versions.current_version_id();

        // 1. Exact tier.
        if let Some(entry) = self.exact.get(&hash) {
            if Self::version_valid(entry.bound_version.as_deref(), current.as_deref()) {
                debug!(query_hash = %hash, "exact cache hit");
                self.stats
                    .exact_hits
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                return (Some(entry.payload), HitKind::Exact);
            }
            debug!(
                query_hash = %hash,
                bound = ?entry.bound_version,
                current = ?current,
                "stale exact entry evicted"
            );
            self.exact.evict(&hash);
            self.stats
                .stale_evictions
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }

        // 2. Semantic tier. Embedding failure degrades to exact-only.
        let vector = match self.embedder.embed(query) {
            Ok(vector) => vector,
            Err(e) => {
                warn!(error = %e, "embedding failed, semantic lookup skipped");
                self.stats
                    .misses
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                return (None, HitKind::Miss);
            }
        };

        if let Some(neighbor) = self.semantic.nearest(&vector) {
            if neighbor.similarity >= self.config.semantic_threshold {
                if let Some(entry) = self.exact.get(&neighbor.entry.cache_key) {
                    if Self::version_valid(entry.bound_version.as_deref(), current.as_deref()) {
                        debug!(
                            query_hash = %hash,
                            matched = %neighbor.entry.query_text,
                            similarity = neighbor.similarity,
                            "semantic cache hit, promoting to exact tier"
                        );
                        // Promotion: future identical queries hit tier 1.
                        let promoted = CacheEntry::new(
                            hash,
                            query.to_string(),
                            entry.payload.clone(),
                            entry.bound_version.clone(),
                        );
                        self.exact.insert(promoted);
                        self.stats
                            .semantic_hits
                            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                        return (Some(entry.payload), HitKind::Semantic);
                    }
                    self.exact.evict(&neighbor.entry.cache_key);
                    self.stats
                        .stale_evictions
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
            }
        }

        self.stats
            .misses
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        (None, HitKind::Miss)
    }

    /// Typed lookup. An undecodable payload is treated as a miss and the
    /// entry evicted.
    pub fn get_as<T: DeserializeOwned>(&self, query: &str) -> (Option<T>, HitKind) {
        let (payload, kind) = self.get(query);
        let Some(payload) = payload else {
            return (None, HitKind::Miss);
        };
        match serde_json::from_value(payload) {
            Ok(value) => (Some(value), kind),
            Err(e) => {
                let hash = query::query_hash(query);
                warn!(query_hash = %hash, error = %e, "unreadable cache entry evicted");
                self.exact.evict(&hash);
                (None, HitKind::Miss)
            }
        }
    }

    /// Write a payload for a query, stamped with the current knowledge
    /// version. The exact tier is written first; a semantic-tier failure
    /// (embedding error) never undoes it.
    pub fn put(&self, query: &str, payload: serde_json::Value) {
        let hash = query::query_hash(query);
        let bound_version = self.versions.current_version_id();

        let entry = CacheEntry::new(
            hash.clone(),
            query.to_string(),
            payload,
            bound_version.clone(),
        );
        self.exact.insert(entry);

        match self.embedder.embed(query) {
            Ok(embedding) => {
                self.semantic.insert(SemanticEntry {
                    cache_key: hash,
                    query_text: query.to_string(),
                    embedding,
                    bound_version,
                });
            }
            Err(e) => {
                // Exact-tier durability does not depend on the semantic
                // tier; the entry above stays.
                warn!(error = %e, "semantic insert skipped, exact entry kept");
            }
        }
    }

    /// Evict every entry bound to a version other than the current one.
    ///
    /// Optimization only — correctness never requires it; lazy checks on
    /// read already keep stale entries from being served.
    pub fn sweep_stale(&self) -> usize {
        let current = self.versions.current_version_id();

        let mut stale_keys = Vec::new();
        self.exact.for_each(|entry| {
            if !Self::version_valid(entry.bound_version.as_deref(), current.as_deref()) {
                stale_keys.push(entry.query_hash.clone());
            }
        });
        for key in &stale_keys {
            self.exact.evict(key);
        }

        let semantic_dropped = self
            .semantic
            .retain(|e| Self::version_valid(e.bound_version.as_deref(), current.as_deref()));

        let swept = stale_keys.len() + semantic_dropped;
        if swept > 0 {
            info!(swept, "stale cache entries swept");
            self.stats
                .stale_evictions
                .fetch_add(stale_keys.len() as u64, std::sync::atomic::Ordering::Relaxed);
        }
        swept
    }

    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot(self.config.hot_query_threshold)
    }
}
