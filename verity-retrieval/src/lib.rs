//! # verity-retrieval
//!
//! The hybrid retriever: decides whether local evidence suffices or an
//! external fallback is required, merges and deduplicates candidates, and
//! ranks them. Pipeline: local search → sufficiency decision → optional
//! external call → dedup (exact, then fuzzy) → rank → truncate.

pub mod dedup;
pub mod ranking;
pub mod retriever;

pub use retriever::HybridRetriever;
