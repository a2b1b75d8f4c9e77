//! # verity-cache
//!
//! The versioned query cache. Two tiers: exact (keyed by a hash of the
//! normalized query) and semantic (nearest-neighbor over previously cached
//! query embeddings). Every entry is stamped with the knowledge version
//! active when it was written; staleness is detected lazily on read.

pub mod exact;
pub mod semantic;
pub mod stats;
pub mod versioned;

pub use stats::CacheStatsSnapshot;
pub use versioned::{HitKind, VersionedCache};
