//! WorkerSizer: adaptive parallelism for batches of homogeneous tasks.
//!
//! IO-bound classes size above the core count, CPU-bound classes at or
//! below it. Explicit config overrides win over derived values.

use tracing::debug;
use verity_core::config::ParallelismConfig;

/// Resource class of a homogeneous task batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskClass {
    /// CPU-bound embedding computation.
    Embedding,
    /// IO-bound retrieval fan-out, for callers dispatching several queries
    /// at once. The single-query retrieval path never consults it.
    Retrieval,
    /// Anything else.
    Default,
}

/// Computes parallelism for a batch given its resource class.
#[derive(Debug, Clone)]
pub struct WorkerSizer {
    cpu_count: usize,
    default_workers: usize,
    config: ParallelismConfig,
}

impl WorkerSizer {
    pub fn new(config: ParallelismConfig) -> Self {
        let cpu_count = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        Self::with_cpu_count(config, cpu_count)
    }

    /// Construction with an explicit core count, for deterministic tests.
    pub fn with_cpu_count(config: ParallelismConfig, cpu_count: usize) -> Self {
        // 1.5x the core count, clamped to [2, 10].
        let default_workers = (cpu_count + cpu_count / 2).clamp(2, 10);
        debug!(cpu_count, default_workers, "worker sizer initialized");
        Self {
            cpu_count,
            default_workers,
            config,
        }
    }

    /// Upper bound on workers for a task class.
    pub fn max_workers(&self, class: TaskClass) -> usize {
        if let Some(cap) = self.config.max_workers {
            return cap.max(1);
        }
        match class {
            TaskClass::Embedding => self
                .config
                .embedding_workers
                .map(|n| n.max(1))
                .unwrap_or_else(|| self.default_workers.min(8)),
            TaskClass::Retrieval => self
                .config
                .retrieval_workers
                .map(|n| n.max(1))
                .unwrap_or_else(|| (self.default_workers + self.default_workers / 2).min(12)),
            TaskClass::Default => self.default_workers,
        }
    }

    /// Parallelism for a batch of `task_count` tasks: the class cap, or the
    /// task count when that is smaller. Always at least 1.
    pub fn workers_for(&self, task_count: usize, class: TaskClass) -> usize {
        task_count.clamp(1, self.max_workers(class))
    }

    pub fn cpu_count(&self) -> usize {
        self.cpu_count
    }
}

impl Default for WorkerSizer {
    fn default() -> Self {
        Self::new(ParallelismConfig::default())
    }
}
