//! KnowledgeStore — double-buffered snapshots with atomic promotion.
//!
//! Reads run against whichever snapshot reference was active at the start
//! of the call and never block on rebuilds. A rebuild constructs the new
//! snapshot off to the side, then promotes it with a single reference
//! swap; any failure before the swap leaves the active snapshot untouched.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use rayon::prelude::*;
use tracing::info;
use verity_concurrency::{LockRegistry, TaskClass, WorkerSizer};
use verity_core::config::KnowledgeConfig;
use verity_core::constants::KB_REBUILD_LOCK;
use verity_core::errors::{KnowledgeError, VerityResult};
use verity_core::models::{Document, KnowledgeVersion, VersionSource};
use verity_core::traits::{IEmbeddingProvider, IVersionProbe};

use crate::ledger::VersionLedger;
use crate::snapshot::{ScoredDocument, Snapshot};

/// Rebuild lifecycle, cyclic: Idle → Building → Promoting → Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildState {
    Idle = 0,
    Building = 1,
    Promoting = 2,
}

/// Holds the active snapshot and coordinates rebuilds.
pub struct KnowledgeStore {
    /// The only resource needing careful ordering on swap: promotion is a
    /// single reference assignment under the write lock; readers clone the
    /// Arc and drop the read lock before searching.
    active: RwLock<Arc<Snapshot>>,
    ledger: Mutex<VersionLedger>,
    registry: Arc<LockRegistry>,
    sizer: WorkerSizer,
    embedder: Arc<dyn IEmbeddingProvider>,
    config: KnowledgeConfig,
    state: AtomicU8,
}

impl KnowledgeStore {
    pub fn new(
        config: KnowledgeConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        registry: Arc<LockRegistry>,
        sizer: WorkerSizer,
        ledger: VersionLedger,
    ) -> Self {
        Self {
            active: RwLock::new(Arc::new(Snapshot::empty())),
            ledger: Mutex::new(ledger),
            registry,
            sizer,
            embedder,
            config,
            state: AtomicU8::new(RebuildState::Idle as u8),
        }
    }

    /// The snapshot reference active right now.
    fn active_snapshot(&self) -> Arc<Snapshot> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Top-k documents by similarity. Non-blocking with respect to
    /// rebuilds: executes against the snapshot active at call start.
    pub fn search(&self, vector: &[f32], k: usize) -> Vec<ScoredDocument> {
        self.active_snapshot().search(vector, k)
    }

    /// The version of the active snapshot, or `None` before the first
    /// successful build.
    pub fn current_version(&self) -> Option<KnowledgeVersion> {
        self.active_snapshot().version().cloned()
    }

    pub fn doc_count(&self) -> usize {
        self.active_snapshot().doc_count()
    }

    /// Current rebuild lifecycle state (observability only).
    pub fn rebuild_state(&self) -> RebuildState {
        match self.state.load(Ordering::Acquire) {
            1 => RebuildState::Building,
            2 => RebuildState::Promoting,
            _ => RebuildState::Idle,
        }
    }

    /// Build a new snapshot from `documents` and atomically promote it.
    ///
    /// Serialized through the `kb_rebuild` named lock; a second caller
    /// blocks up to the configured lock timeout and then gets an error.
    /// Embedding failures abort the rebuild with the active snapshot
    /// untouched.
    pub fn rebuild(
        &self,
        documents: Vec<Document>,
        source: VersionSource,
    ) -> VerityResult<KnowledgeVersion> {
        let lock_timeout = Duration::from_secs(self.config.lock_timeout_secs);
        let _guard = self.registry.acquire(KB_REBUILD_LOCK, lock_timeout)?;

        self.state.store(RebuildState::Building as u8, Ordering::Release);
        let result = self.build_and_promote(documents, source);
        self.state.store(RebuildState::Idle as u8, Ordering::Release);
        result
    }

    fn build_and_promote(
        &self,
        documents: Vec<Document>,
        source: VersionSource,
    ) -> VerityResult<KnowledgeVersion> {
        let doc_count = documents.len();
        info!(doc_count, ?source, "knowledge rebuild started");

        // Stage 1: embed everything into a staging set. The active
        // snapshot is never touched here.
        let embedded = self.embed_all(documents)?;

        // Stage 2: version record + snapshot.
        let version = KnowledgeVersion::mint(doc_count, source);
        let staged = Arc::new(Snapshot::new(version.clone(), embedded));

        // Stage 3: promotion — a single reference swap.
        self.state.store(RebuildState::Promoting as u8, Ordering::Release);
        {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            *active = staged;
        }

        // Stage 4: record + prune history. Failures in here are logged by
        // the ledger, never fatal: promotion has already happened.
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(version.clone());

        info!(version = %version.id, doc_count, "knowledge rebuild promoted");
        Ok(version)
    }

    /// Embed documents in batches on a pool sized for the embedding class.
    fn embed_all(&self, documents: Vec<Document>) -> VerityResult<Vec<Document>> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.config.embedding_batch_size.max(1);
        let batches: Vec<&[Document]> = documents.chunks(batch_size).collect();
        let workers = self.sizer.workers_for(batches.len(), TaskClass::Embedding);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| KnowledgeError::EmbeddingBatchFailed {
                reason: format!("embedding pool: {e}"),
            })?;

        let expected_dims = self.embedder.dimensions();
        let embedder = &self.embedder;

        let embedded: Vec<Vec<Document>> = pool.install(|| {
            batches
                .par_iter()
                .map(|batch| {
                    let texts: Vec<String> = batch.iter().map(|d| d.text.clone()).collect();
                    let vectors = embedder.embed_batch(&texts).map_err(|e| {
                        KnowledgeError::EmbeddingBatchFailed {
                            reason: e.to_string(),
                        }
                    })?;
                    if vectors.len() != batch.len() {
                        return Err(KnowledgeError::EmbeddingBatchFailed {
                            reason: format!(
                                "batch returned {} vectors for {} texts",
                                vectors.len(),
                                batch.len()
                            ),
                        });
                    }
                    batch
                        .iter()
                        .zip(vectors)
                        .map(|(doc, vector)| {
                            if vector.len() != expected_dims {
                                return Err(KnowledgeError::DimensionMismatch {
                                    expected: expected_dims,
                                    got: vector.len(),
                                });
                            }
                            Ok(doc.clone().with_embedding(vector))
                        })
                        .collect::<Result<Vec<Document>, KnowledgeError>>()
                })
                .collect::<Result<Vec<Vec<Document>>, KnowledgeError>>()
        })?;

        Ok(embedded.into_iter().flatten().collect())
    }

    /// Retained version history, oldest first.
    pub fn version_history(&self) -> Vec<KnowledgeVersion> {
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .history()
            .to_vec()
    }
}

impl IVersionProbe for KnowledgeStore {
    fn current_version_id(&self) -> Option<String> {
        self.active_snapshot().version().map(|v| v.id.clone())
    }
}

impl std::fmt::Debug for KnowledgeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeStore")
            .field("doc_count", &self.doc_count())
            .field("state", &self.rebuild_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_core::VerityError;

    /// Deterministic embedder: maps text length to a 2-d unit-ish vector.
    struct StubEmbedder;

    impl IEmbeddingProvider for StubEmbedder {
        fn embed(&self, text: &str) -> VerityResult<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }
        fn embed_batch(&self, texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
            texts.iter().map(|t| self.embed(t)).collect()
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "stub"
        }
    }

    struct FailingEmbedder;

    impl IEmbeddingProvider for FailingEmbedder {
        fn embed(&self, _text: &str) -> VerityResult<Vec<f32>> {
            Err(VerityError::collaborator("embedding", "model offline"))
        }
        fn embed_batch(&self, _texts: &[String]) -> VerityResult<Vec<Vec<f32>>> {
            Err(VerityError::collaborator("embedding", "model offline"))
        }
        fn dimensions(&self) -> usize {
            2
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    fn store_with(embedder: Arc<dyn IEmbeddingProvider>) -> KnowledgeStore {
        KnowledgeStore::new(
            KnowledgeConfig::default(),
            embedder,
            Arc::new(LockRegistry::new()),
            WorkerSizer::default(),
            VersionLedger::in_memory(3),
        )
    }

    #[test]
    fn starts_empty_without_version() {
        let store = store_with(Arc::new(StubEmbedder));
        assert_eq!(store.doc_count(), 0);
        assert!(store.current_version().is_none());
        assert_eq!(store.rebuild_state(), RebuildState::Idle);
    }

    #[test]
    fn rebuild_promotes_new_version() {
        let store = store_with(Arc::new(StubEmbedder));
        let docs = vec![
            Document::new("short", "a.txt"),
            Document::new("a longer document", "b.txt"),
        ];

        let version = store.rebuild(docs, VersionSource::ManualBuild).unwrap();
        assert_eq!(version.doc_count, 2);
        assert_eq!(store.doc_count(), 2);
        assert_eq!(store.current_version().unwrap().id, version.id);

        let results = store.search(&[5.0, 1.0], 1);
        assert_eq!(results[0].document.text, "short");
    }

    #[test]
    fn failed_rebuild_leaves_active_untouched() {
        let store = store_with(Arc::new(StubEmbedder));
        let v1 = store
            .rebuild(vec![Document::new("doc", "a.txt")], VersionSource::ManualBuild)
            .unwrap();

        let failing = store_with(Arc::new(FailingEmbedder));
        failing
            .rebuild(vec![Document::new("x", "x.txt")], VersionSource::ManualBuild)
            .unwrap_err();
        assert!(failing.current_version().is_none());
        assert_eq!(failing.doc_count(), 0);

        // The healthy store is unaffected.
        assert_eq!(store.current_version().unwrap().id, v1.id);
    }

    #[test]
    fn empty_rebuild_is_a_valid_version() {
        let store = store_with(Arc::new(StubEmbedder));
        let version = store.rebuild(Vec::new(), VersionSource::ManualBuild).unwrap();
        assert_eq!(version.doc_count, 0);
        assert_eq!(store.doc_count(), 0);
        assert!(store.current_version().is_some());
    }

    #[test]
    fn versions_are_distinct_across_rebuilds() {
        let store = store_with(Arc::new(StubEmbedder));
        let v1 = store.rebuild(Vec::new(), VersionSource::ManualBuild).unwrap();
        let v2 = store
            .rebuild(Vec::new(), VersionSource::AutoIntegration)
            .unwrap();
        assert_ne!(v1.id, v2.id);
        assert_eq!(store.version_history().len(), 2);
    }

    #[test]
    fn concurrent_search_sees_whole_snapshots() {
        use std::thread;

        let store = Arc::new(store_with(Arc::new(StubEmbedder)));
        // v1: two docs of generation "old".
        store
            .rebuild(
                vec![Document::new("old-a", "old.txt"), Document::new("old-b", "old.txt")],
                VersionSource::ManualBuild,
            )
            .unwrap();

        let reader = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..200 {
                    let results = store.search(&[5.0, 1.0], 10);
                    let sources: std::collections::HashSet<&str> = results
                        .iter()
                        .map(|r| r.document.source_path.as_str())
                        .collect();
                    // Either entirely old or entirely new, never a mix.
                    assert!(sources.len() <= 1, "mixed snapshot observed: {sources:?}");
                }
            })
        };

        let new_docs = vec![
            Document::new("new-a", "new.txt"),
            Document::new("new-b", "new.txt"),
            Document::new("new-c", "new.txt"),
        ];
        store.rebuild(new_docs, VersionSource::ManualBuild).unwrap();
        reader.join().unwrap();
        assert_eq!(store.doc_count(), 3);
    }
}
