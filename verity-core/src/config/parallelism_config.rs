use serde::{Deserialize, Serialize};

/// Worker-sizing overrides per task class. `None` means "derive from the
/// machine" (see `verity-concurrency::WorkerSizer`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelismConfig {
    /// Global cap applied to every task class when set.
    pub max_workers: Option<usize>,
    /// Override for embedding batches (CPU-bound).
    pub embedding_workers: Option<usize>,
    /// Override for retrieval fan-out (IO-bound).
    pub retrieval_workers: Option<usize>,
}
