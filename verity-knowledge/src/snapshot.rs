//! One immutable, fully-built copy of the indexed documents.
//!
//! A snapshot is never mutated after construction; rebuilds produce a new
//! snapshot and swap a reference. Readers therefore see either the whole
//! old set or the whole new set, never a mix.

use verity_core::models::{Document, KnowledgeVersion};
use verity_core::query::cosine_similarity;

/// A document with its similarity to some query vector.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub similarity: f64,
}

/// Immutable mapping from documents to embedding space, queryable by
/// cosine nearest-neighbor.
#[derive(Debug)]
pub struct Snapshot {
    version: Option<KnowledgeVersion>,
    documents: Vec<Document>,
}

impl Snapshot {
    /// The bootstrap snapshot: no documents, no version.
    pub fn empty() -> Self {
        Self {
            version: None,
            documents: Vec::new(),
        }
    }

    /// A fully-built snapshot. All documents must already carry embeddings.
    pub fn new(version: KnowledgeVersion, documents: Vec<Document>) -> Self {
        debug_assert!(documents.iter().all(|d| !d.embedding.is_empty()));
        Self {
            version: Some(version),
            documents,
        }
    }

    pub fn version(&self) -> Option<&KnowledgeVersion> {
        self.version.as_ref()
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Top-k documents by cosine similarity to `vector`, best first.
    pub fn search(&self, vector: &[f32], k: usize) -> Vec<ScoredDocument> {
        let mut scored: Vec<ScoredDocument> = self
            .documents
            .iter()
            .map(|doc| ScoredDocument {
                similarity: cosine_similarity(&doc.embedding, vector),
                document: doc.clone(),
            })
            .collect();
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);
        scored
    }
}
