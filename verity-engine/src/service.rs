//! The wired-together retrieval core.
//!
//! Construction order matters and is fixed here: the knowledge store first
//! (it owns the version sequence), then the cache (its validity checks
//! probe the store's current version), then the retriever (reads the
//! store), then the integration scheduler (writes back through the store).
//! There is no global instance; callers construct a `Service` at startup
//! and pass it down explicitly.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use verity_cache::{CacheStatsSnapshot, HitKind, VersionedCache};
use verity_concurrency::{LockRegistry, WorkerSizer};
use verity_core::config::VerityConfig;
use verity_core::errors::VerityResult;
use verity_core::models::{Document, KnowledgeVersion, RetrievalResult, Verdict, VersionSource};
use verity_core::traits::{IDocumentSource, IEmbeddingProvider, IExternalSearch, IVersionProbe};
use verity_knowledge::{
    IntegrationOutcome, IntegrationScheduler, JsonlDocumentSource, KnowledgeStore, VersionLedger,
};
use verity_retrieval::HybridRetriever;

/// On-disk locations for the durable pieces of the core.
#[derive(Debug, Clone)]
pub struct ServicePaths {
    /// JSONL file the document source reads and appends to.
    pub document_source: PathBuf,
    /// JSON file recording the version history.
    pub version_ledger: PathBuf,
}

pub struct Service {
    config: VerityConfig,
    store: Arc<KnowledgeStore>,
    source: Arc<JsonlDocumentSource>,
    cache: VersionedCache,
    retriever: HybridRetriever,
    scheduler: IntegrationScheduler,
}

impl Service {
    pub fn new(
        config: VerityConfig,
        paths: ServicePaths,
        embedder: Arc<dyn IEmbeddingProvider>,
        external: Arc<dyn IExternalSearch>,
    ) -> Self {
        let registry = Arc::new(LockRegistry::new());
        let sizer = WorkerSizer::new(config.parallelism.clone());
        let ledger = VersionLedger::load(
            paths.version_ledger.clone(),
            config.knowledge.version_retention,
        );

        let store = Arc::new(KnowledgeStore::new(
            config.knowledge.clone(),
            Arc::clone(&embedder),
            Arc::clone(&registry),
            sizer,
            ledger,
        ));
        let cache = VersionedCache::new(
            config.cache.clone(),
            Arc::clone(&embedder),
            Arc::clone(&store) as Arc<dyn IVersionProbe>,
        );
        let retriever = HybridRetriever::new(
            Arc::clone(&store),
            Arc::clone(&embedder),
            external,
            config.retrieval.clone(),
        );
        let source = Arc::new(JsonlDocumentSource::new(paths.document_source.clone()));
        let scheduler = IntegrationScheduler::new(
            Arc::clone(&store),
            Arc::clone(&source) as Arc<dyn IDocumentSource>,
            registry,
            config.integration.clone(),
        );

        info!(
            source = %paths.document_source.display(),
            ledger = %paths.version_ledger.display(),
            "service constructed"
        );

        Self {
            config,
            store,
            source,
            cache,
            retriever,
            scheduler,
        }
    }

    /// Build the first snapshot from the document source.
    ///
    /// Until this runs, the store serves the empty bootstrap snapshot and
    /// every lookup misses the cache's validity check.
    pub fn bootstrap(&self) -> VerityResult<KnowledgeVersion> {
        let documents = self.source.list()?;
        info!(documents = documents.len(), "bootstrapping knowledge store");
        self.store.rebuild(documents, VersionSource::ManualBuild)
    }

    /// Cached verdict for `query`, if a version-valid one exists.
    pub fn lookup(&self, query: &str) -> (Option<Verdict>, HitKind) {
        self.cache.get_as(query)
    }

    /// Run the hybrid retrieval pipeline for a cache miss.
    pub fn retrieve_evidence(&self, query: &str) -> RetrievalResult {
        self.retriever.retrieve(query, None)
    }

    /// Store a freshly computed verdict and hand it to the integration
    /// gate, which may schedule a background rebuild.
    pub fn record_verdict(
        &self,
        query: &str,
        verdict: &Verdict,
    ) -> VerityResult<IntegrationOutcome> {
        self.cache.put(query, serde_json::to_value(verdict)?);

        let document = Document::auto_generated(
            format!("{query}: {}", verdict.summary),
            "auto_integration",
        );
        self.scheduler.maybe_integrate(
            verdict.confidence,
            verdict.class,
            verdict.evidence.len(),
            document,
        )
    }

    /// Drop every cache entry bound to a superseded knowledge version.
    pub fn sweep_cache(&self) -> usize {
        self.cache.sweep_stale()
    }

    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.cache.stats()
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    pub fn config(&self) -> &VerityConfig {
        &self.config
    }
}
