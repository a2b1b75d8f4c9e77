use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered the build that produced a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    ManualBuild,
    AutoIntegration,
}

/// Identifies one immutable snapshot of the knowledge store.
///
/// Created exactly once per successful rebuild and never mutated.
/// Superseded versions are retained briefly in the ledger and pruned
/// beyond a retention count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeVersion {
    /// Opaque, monotonically sortable id (time-based), unique per build.
    pub id: String,
    /// Number of indexed documents at build time.
    pub doc_count: usize,
    pub source: VersionSource,
    pub created_at: DateTime<Utc>,
}

impl KnowledgeVersion {
    /// Mint a new version record for a just-completed build.
    pub fn mint(doc_count: usize, source: VersionSource) -> Self {
        let now = Utc::now();
        // Micros keep ids unique and lexicographically sortable even for
        // builds within the same second.
        let id = format!("v_{}", now.format("%Y%m%d_%H%M%S_%6f"));
        Self {
            id,
            doc_count,
            source,
            created_at: now,
        }
    }
}
