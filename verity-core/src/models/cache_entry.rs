use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached query outcome.
///
/// An entry is valid for reads only if `bound_version` equals the current
/// knowledge version id, or both are absent (bootstrap, before any build).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Deterministic hash of the normalized query text (exact-match key).
    pub query_hash: String,
    pub query_text: String,
    /// Opaque result blob (verdict, evidence references, ...).
    pub payload: serde_json::Value,
    /// Knowledge version active when this entry was written; `None` if
    /// written before any version existed.
    pub bound_version: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(
        query_hash: String,
        query_text: String,
        payload: serde_json::Value,
        bound_version: Option<String>,
    ) -> Self {
        Self {
            query_hash,
            query_text,
            payload,
            bound_version,
            created_at: Utc::now(),
        }
    }
}
