//! Error types for every Verity subsystem.
//!
//! Each subsystem gets its own enum; `VerityError` is the umbrella the
//! crate boundaries speak.

mod knowledge_error;
mod lock_error;
mod retrieval_error;

pub use knowledge_error::KnowledgeError;
pub use lock_error::LockError;
pub use retrieval_error::RetrievalError;

/// Result alias used across the workspace.
pub type VerityResult<T> = Result<T, VerityError>;

/// Top-level error for the Verity retrieval core.
#[derive(Debug, thiserror::Error)]
pub enum VerityError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// A collaborator (embedding, external search, LLM analysis) failed or
    /// timed out. Always recoverable; callers degrade rather than crash.
    #[error("collaborator '{name}' failed: {reason}")]
    Collaborator { name: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl VerityError {
    /// Shorthand for a collaborator failure.
    pub fn collaborator(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
