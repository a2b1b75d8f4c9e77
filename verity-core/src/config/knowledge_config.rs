use serde::{Deserialize, Serialize};

use super::defaults;

/// Knowledge-store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// Old versions retained before pruning.
    pub version_retention: usize,
    /// Documents embedded per batch during rebuild.
    pub embedding_batch_size: usize,
    /// Deadline for a single collaborator call, in seconds.
    pub collaborator_timeout_secs: u64,
    /// Deadline for acquiring a named lock, in seconds.
    pub lock_timeout_secs: u64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            version_retention: defaults::DEFAULT_VERSION_RETENTION,
            embedding_batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            collaborator_timeout_secs: defaults::DEFAULT_COLLABORATOR_TIMEOUT_SECS,
            lock_timeout_secs: defaults::DEFAULT_LOCK_TIMEOUT_SECS,
        }
    }
}
