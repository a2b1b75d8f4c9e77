//! Default values for every configuration knob, in one place.

/// Similarity below which local evidence is considered insufficient and
/// external fallback is triggered (strict `<`).
pub const DEFAULT_LOCAL_SIMILARITY_THRESHOLD: f64 = 0.6;

/// Cosine similarity above which a cached query counts as a semantic hit.
pub const DEFAULT_SEMANTIC_CACHE_THRESHOLD: f64 = 0.96;

/// Discount applied to auto-generated documents when computing the max
/// weighted similarity.
pub const DEFAULT_AUTO_GENERATED_WEIGHT: f64 = 0.9;

/// Ratio above which two candidates are considered fuzzy duplicates.
pub const DEFAULT_FUZZY_DEDUP_THRESHOLD: f64 = 0.85;

/// Maximum evidence candidates returned by retrieval.
pub const DEFAULT_MAX_RESULTS: usize = 3;

/// Top-k documents pulled from the knowledge store per query.
pub const DEFAULT_LOCAL_TOP_K: usize = 3;

/// Cache entry time-to-live (seconds).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Maximum entries in the exact cache tier.
pub const DEFAULT_EXACT_TIER_CAPACITY: u64 = 10_000;

/// Queries seen at least this often count as hot in cache statistics.
pub const DEFAULT_HOT_QUERY_THRESHOLD: u64 = 3;

/// Minimum verdict confidence for auto-integration.
pub const DEFAULT_MIN_INTEGRATION_CONFIDENCE: u8 = 90;

/// Minimum evidence count for auto-integration.
pub const DEFAULT_MIN_INTEGRATION_EVIDENCE: usize = 3;

/// Knowledge versions retained before pruning.
pub const DEFAULT_VERSION_RETENTION: usize = 3;

/// Documents embedded per batch during rebuild.
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;

/// Deadline for a single collaborator call (seconds).
pub const DEFAULT_COLLABORATOR_TIMEOUT_SECS: u64 = 30;

/// Deadline for acquiring a named lock (seconds).
pub const DEFAULT_LOCK_TIMEOUT_SECS: u64 = 10;
