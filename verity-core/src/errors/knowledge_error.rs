/// Knowledge-store errors.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    /// An embedding batch failed during rebuild. The rebuild aborts; the
    /// active snapshot is untouched.
    #[error("embedding batch failed during rebuild: {reason}")]
    EmbeddingBatchFailed { reason: String },

    #[error("document source failed: {reason}")]
    SourceFailed { reason: String },

    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
