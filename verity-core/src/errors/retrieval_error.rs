/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("external search failed: {reason}")]
    ExternalSearchFailed { reason: String },
}
