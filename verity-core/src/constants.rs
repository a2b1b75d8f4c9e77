/// Verity system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix length (chars) hashed for exact-phase deduplication.
pub const DEDUP_HASH_PREFIX_CHARS: usize = 500;

/// Prefix length (chars) compared for fuzzy-phase deduplication.
pub const DEDUP_FUZZY_PREFIX_CHARS: usize = 300;

/// Similarity above which a query is not re-inserted into the semantic tier.
pub const SEMANTIC_INSERT_SUPPRESSION: f64 = 0.99;

/// Neutral similarity assigned to external search hits, which arrive unscored.
pub const EXTERNAL_DEFAULT_SIMILARITY: f64 = 0.5;

/// Ranking bonus applied to local-provenance candidates.
pub const LOCAL_PROVENANCE_BONUS: f64 = 0.5;

/// Ranking penalty applied to auto-generated candidates.
pub const AUTO_GENERATED_PENALTY: f64 = 0.1;

/// Named lock serializing knowledge-store rebuilds.
pub const KB_REBUILD_LOCK: &str = "kb_rebuild";
