//! IntegrationScheduler — feeds high-confidence verdicts back into the
//! knowledge store.
//!
//! Admission-gated and fire-and-forget: the caller is never blocked. The
//! rebuild itself runs on a detached background thread under single-flight
//! semantics — concurrent triggers collapse into one rebuild, and losers
//! rely on a later trigger to pick up their document (it is already
//! durable in the source by then). In-flight rebuilds are best-effort on
//! shutdown: the thread is detached and may be abandoned; promotion is the
//! final step of a rebuild, so an abandoned one leaves the previous
//! version fully intact.

use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};
use verity_concurrency::LockRegistry;
use verity_core::config::IntegrationConfig;
use verity_core::constants::KB_REBUILD_LOCK;
use verity_core::errors::VerityResult;
use verity_core::models::{Document, VerdictClass, VersionSource};
use verity_core::traits::IDocumentSource;

use crate::store::KnowledgeStore;

/// Why a document was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Verdict class is disputed or insufficient.
    NotConclusive,
    LowConfidence { got: u8, min: u8 },
    InsufficientEvidence { got: usize, min: usize },
}

/// What `maybe_integrate` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationOutcome {
    Rejected(RejectReason),
    /// Document written to the source and a background rebuild scheduled
    /// (or coalesced into one already in flight).
    Scheduled,
}

/// Triggers background knowledge rebuilds from conclusive verdicts.
pub struct IntegrationScheduler {
    store: Arc<KnowledgeStore>,
    source: Arc<dyn IDocumentSource>,
    registry: Arc<LockRegistry>,
    config: IntegrationConfig,
}

impl IntegrationScheduler {
    pub fn new(
        store: Arc<KnowledgeStore>,
        source: Arc<dyn IDocumentSource>,
        registry: Arc<LockRegistry>,
        config: IntegrationConfig,
    ) -> Self {
        Self {
            store,
            source,
            registry,
            config,
        }
    }

    fn admit(&self, confidence: u8, class: VerdictClass, evidence_count: usize) -> Option<RejectReason> {
        if !class.is_conclusive() {
            return Some(RejectReason::NotConclusive);
        }
        if confidence < self.config.min_confidence {
            return Some(RejectReason::LowConfidence {
                got: confidence,
                min: self.config.min_confidence,
            });
        }
        if evidence_count < self.config.min_evidence {
            return Some(RejectReason::InsufficientEvidence {
                got: evidence_count,
                min: self.config.min_evidence,
            });
        }
        None
    }

    /// Admit-or-reject a new knowledge document produced from a verdict.
    ///
    /// On admission the document is appended to the durable source (marked
    /// auto-generated), and a detached rebuild is started unless one is
    /// already in flight. Never blocks on the rebuild.
    pub fn maybe_integrate(
        &self,
        confidence: u8,
        class: VerdictClass,
        evidence_count: usize,
        document: Document,
    ) -> VerityResult<IntegrationOutcome> {
        if let Some(reason) = self.admit(confidence, class, evidence_count) {
            debug!(?reason, confidence, evidence_count, "integration rejected");
            return Ok(IntegrationOutcome::Rejected(reason));
        }

        let document = Document {
            is_auto_generated: true,
            ..document
        };
        self.source.append(&document)?;
        info!(source_path = %document.source_path, "auto-generated knowledge appended");

        self.spawn_rebuild();
        Ok(IntegrationOutcome::Scheduled)
    }

    /// Start the single-flight background rebuild.
    ///
    /// The `kb_rebuild` try-acquire happens on the background thread so the
    /// guard lives and dies there; a losing thread exits immediately — the
    /// winner's rebuild reads the source after this document was appended,
    /// or a later trigger picks it up.
    fn spawn_rebuild(&self) {
        let store = Arc::clone(&self.store);
        let source = Arc::clone(&self.source);
        let registry = Arc::clone(&self.registry);

        thread::spawn(move || {
            let Some(_guard) = registry.try_acquire(KB_REBUILD_LOCK) else {
                debug!("rebuild already in flight, trigger coalesced");
                return;
            };

            let documents = match source.list() {
                Ok(documents) => documents,
                Err(e) => {
                    warn!(error = %e, "background rebuild aborted: source unreadable");
                    return;
                }
            };

            match store.rebuild(documents, VersionSource::AutoIntegration) {
                Ok(version) => {
                    info!(version = %version.id, doc_count = version.doc_count, "auto-integration rebuild complete")
                }
                Err(e) => warn!(error = %e, "auto-integration rebuild failed"),
            }
        });
    }
}
