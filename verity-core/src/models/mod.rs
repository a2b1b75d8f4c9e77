//! Data model for the retrieval core. One small model per file.

mod cache_entry;
mod candidate;
mod document;
mod verdict;
mod version;

pub use cache_entry::CacheEntry;
pub use candidate::{Candidate, Provenance, RetrievalResult};
pub use document::Document;
pub use verdict::{Verdict, VerdictClass};
pub use version::{KnowledgeVersion, VersionSource};
