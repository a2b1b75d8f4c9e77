//! The local-first retrieval decision.
//!
//! Local evidence is consulted first; the external search collaborator is
//! only called when local evidence is missing or too weak. Auto-generated
//! documents are discounted before that decision so the store cannot talk
//! itself out of ever re-verifying its own output.

use std::sync::Arc;

use tracing::{debug, warn};

use verity_core::config::RetrievalConfig;
use verity_core::constants::EXTERNAL_DEFAULT_SIMILARITY;
use verity_core::models::{Candidate, RetrievalResult};
use verity_core::traits::{IEmbeddingProvider, IExternalSearch};
use verity_knowledge::KnowledgeStore;

use crate::dedup::deduplicate;
use crate::ranking::rank;

pub struct HybridRetriever {
    store: Arc<KnowledgeStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    external: Arc<dyn IExternalSearch>,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(
        store: Arc<KnowledgeStore>,
        embedder: Arc<dyn IEmbeddingProvider>,
        external: Arc<dyn IExternalSearch>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            store,
            embedder,
            external,
            config,
        }
    }

    /// Retrieve evidence for `query`.
    ///
    /// Infallible by contract: collaborator failures degrade the result
    /// instead of aborting it. An embedding failure yields no local
    /// candidates (forcing the fallback); an external-search failure
    /// leaves only the local candidates. `used_external` records that the
    /// fallback was attempted, not that it produced evidence; callers that
    /// need the distinction inspect candidate provenance.
    ///
    /// `local_candidates` lets callers that already ran a store query
    /// reuse it; `None` queries the store here.
    pub fn retrieve(&self, query: &str, local_candidates: Option<Vec<Candidate>>) -> RetrievalResult {
        let local = match local_candidates {
            Some(candidates) => candidates,
            None => self.local_candidates(query),
        };

        let max_weighted = self.max_weighted_similarity(&local);
        // Strict comparison: a max exactly at the threshold counts as
        // sufficient local evidence.
        let need_external =
            local.is_empty() || max_weighted < self.config.local_similarity_threshold;

        debug!(
            candidates = local.len(),
            max_weighted,
            need_external,
            "local evidence assessed"
        );

        let mut merged = local;
        if need_external {
            match self.external.search(query) {
                Ok(hits) => {
                    merged.extend(hits.into_iter().map(|hit| {
                        Candidate::external(hit.text, hit.source_url, EXTERNAL_DEFAULT_SIMILARITY)
                    }));
                }
                Err(err) => {
                    warn!(error = %err, "external search failed, continuing with local evidence");
                }
            }
        }

        let deduplicated = deduplicate(merged, self.config.fuzzy_dedup_threshold);
        let candidates = rank(deduplicated, self.config.max_results);

        RetrievalResult {
            candidates,
            used_external: need_external,
        }
    }

    /// Top-k local documents as candidates. An embedding failure is
    /// recoverable and yields an empty set.
    fn local_candidates(&self, query: &str) -> Vec<Candidate> {
        let vector = match self.embedder.embed(query) {
            Ok(vector) => vector,
            Err(err) => {
                warn!(error = %err, "query embedding failed, skipping local retrieval");
                return Vec::new();
            }
        };

        self.store
            .search(&vector, self.config.local_top_k)
            .into_iter()
            .map(|scored| {
                let mut candidate = Candidate::local(
                    scored.document.text,
                    scored.document.source_path,
                    scored.similarity,
                );
                candidate.is_auto_generated = scored.document.is_auto_generated;
                candidate
            })
            .collect()
    }

    /// Max similarity over local candidates, discounting auto-generated
    /// ones by `auto_generated_weight` first.
    fn max_weighted_similarity(&self, candidates: &[Candidate]) -> f64 {
        candidates
            .iter()
            .map(|c| {
                if c.is_auto_generated {
                    c.similarity * self.config.auto_generated_weight
                } else {
                    c.similarity
                }
            })
            .fold(0.0, f64::max)
    }
}
