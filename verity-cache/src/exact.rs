//! Exact tier: moka cache keyed by the query hash, TTL-bound.

use std::time::Duration;

use moka::sync::Cache;
use verity_core::models::CacheEntry;

/// TTL-bound exact-match tier.
pub struct ExactTier {
    cache: Cache<String, CacheEntry>,
}

impl ExactTier {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn get(&self, query_hash: &str) -> Option<CacheEntry> {
        self.cache.get(query_hash)
    }

    pub fn insert(&self, entry: CacheEntry) {
        self.cache.insert(entry.query_hash.clone(), entry);
    }

    pub fn evict(&self, query_hash: &str) {
        self.cache.invalidate(query_hash);
    }

    /// Visit every resident entry (used by the optional stale sweep).
    pub fn for_each(&self, mut f: impl FnMut(&CacheEntry)) {
        // Flush moka's write buffers so the iterator sees recent inserts.
        self.cache.run_pending_tasks();
        for (_, entry) in self.cache.iter() {
            f(&entry);
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
