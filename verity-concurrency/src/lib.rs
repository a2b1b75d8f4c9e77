//! # verity-concurrency
//!
//! Coordination primitives: `LockRegistry` (named, reentrant, timeout-bound
//! mutual exclusion) and `WorkerSizer` (adaptive parallelism for batches of
//! homogeneous tasks).

pub mod registry;
pub mod sizer;

pub use registry::{LockGuard, LockRegistry, LockStatsSnapshot};
pub use sizer::{TaskClass, WorkerSizer};
