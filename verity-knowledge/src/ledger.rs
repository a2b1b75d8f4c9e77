//! Version ledger: the record of knowledge-store builds.
//!
//! Superseded versions are retained for rollback/debugging and pruned
//! beyond a retention count. The ledger is persisted as JSON via
//! temp-file-plus-rename; an unreadable file degrades to an empty ledger
//! rather than erroring. The *current* version of a live store always
//! comes from its active snapshot — the persisted ledger is history.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};
use verity_core::models::KnowledgeVersion;

/// Ordered history of knowledge versions, newest last.
#[derive(Debug)]
pub struct VersionLedger {
    path: Option<PathBuf>,
    versions: Vec<KnowledgeVersion>,
    retention: usize,
}

impl VersionLedger {
    /// An in-memory ledger (no persistence).
    pub fn in_memory(retention: usize) -> Self {
        Self {
            path: None,
            versions: Vec::new(),
            retention: retention.max(1),
        }
    }

    /// Load a persisted ledger. A missing or unreadable file yields an
    /// empty ledger.
    pub fn load(path: PathBuf, retention: usize) -> Self {
        let versions = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(versions) => versions,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "version ledger unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "version ledger unreadable, starting empty");
                Vec::new()
            }
        };
        Self {
            path: Some(path),
            versions,
            retention: retention.max(1),
        }
    }

    /// Record a new version, prune beyond retention, persist.
    ///
    /// Persistence failures are logged, not fatal: the in-memory record is
    /// the source of truth for a live process.
    pub fn record(&mut self, version: KnowledgeVersion) {
        self.versions.push(version);
        if self.versions.len() > self.retention {
            let pruned = self.versions.len() - self.retention;
            self.versions.drain(..pruned);
            info!(pruned, retained = self.versions.len(), "pruned old knowledge versions");
        }
        if let Err(e) = self.persist() {
            warn!(error = %e, "failed to persist version ledger");
        }
    }

    fn persist(&self) -> std::io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.versions)?;
        // Write-then-rename keeps the ledger readable at every instant.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// The most recently recorded version.
    pub fn latest(&self) -> Option<&KnowledgeVersion> {
        self.versions.last()
    }

    /// Full retained history, oldest first.
    pub fn history(&self) -> &[KnowledgeVersion] {
        &self.versions
    }
}
