//! LockRegistry — named, reentrant, timeout-bound mutual exclusion.
//!
//! Locks are created lazily, one per distinct name, and live for the
//! registry's lifetime. Reentrancy is per OS thread: a thread that already
//! holds a lock may acquire it again without deadlocking itself.
//!
//! Lock ordering across the system is flat: no component acquires two
//! distinct named locks at the same time.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::{debug, warn};
use verity_core::errors::{LockError, VerityResult};

/// Wait longer than this and the acquisition is logged as slow.
const SLOW_WAIT: Duration = Duration::from_millis(10);

#[derive(Default)]
struct LockState {
    owner: Option<ThreadId>,
    depth: usize,
}

struct NamedLock {
    name: String,
    state: Mutex<LockState>,
    available: Condvar,
    acquisitions: AtomicU64,
    contentions: AtomicU64,
}

impl NamedLock {
    fn new(name: String) -> Self {
        Self {
            name,
            state: Mutex::new(LockState::default()),
            available: Condvar::new(),
            acquisitions: AtomicU64::new(0),
            contentions: AtomicU64::new(0),
        }
    }
}

/// Counters for one named lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockStatsSnapshot {
    pub acquisitions: u64,
    pub contentions: u64,
}

/// Holds one acquisition of a named lock; released on drop.
///
/// Not `Send`: a reentrant lock must be released on the thread that
/// acquired it.
pub struct LockGuard {
    lock: Arc<NamedLock>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        let mut state = self
            .lock
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 {
            state.owner = None;
            self.lock.available.notify_one();
        }
    }
}

/// Named, reentrant, timeout-bound locks. Foundation for all coordination.
#[derive(Default)]
pub struct LockRegistry {
    locks: DashMap<String, Arc<NamedLock>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, name: &str) -> Arc<NamedLock> {
        self.locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(NamedLock::new(name.to_string())))
            .clone()
    }

    /// Acquire the named lock, waiting at most `timeout`.
    ///
    /// Returns `LockError::Timeout` if the deadline elapses; callers treat
    /// that as "operation skipped, not fatal".
    pub fn acquire(&self, name: &str, timeout: Duration) -> VerityResult<LockGuard> {
        let lock = self.lock_for(name);
        let me = thread::current().id();
        let start = Instant::now();
        let deadline = start + timeout;

        let mut state = lock.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.owner == Some(me) {
            state.depth += 1;
            lock.acquisitions.fetch_add(1, Ordering::Relaxed);
            return Ok(self.guard(lock.clone()));
        }

        while state.owner.is_some() {
            let now = Instant::now();
            if now >= deadline {
                lock.contentions.fetch_add(1, Ordering::Relaxed);
                warn!(lock = %lock.name, ?timeout, "lock acquisition timed out");
                return Err(LockError::Timeout {
                    name: lock.name.clone(),
                    timeout,
                }
                .into());
            }
            let (next, _) = lock
                .available
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            state = next;
        }

        state.owner = Some(me);
        state.depth = 1;
        lock.acquisitions.fetch_add(1, Ordering::Relaxed);

        let waited = start.elapsed();
        if waited > SLOW_WAIT {
            debug!(lock = %lock.name, ?waited, "slow lock acquisition");
        }

        drop(state);
        Ok(self.guard(lock))
    }

    /// Acquire the named lock without blocking. Used for single-flight
    /// patterns: a `None` means someone else is already doing the work.
    pub fn try_acquire(&self, name: &str) -> Option<LockGuard> {
        let lock = self.lock_for(name);
        let me = thread::current().id();

        let mut state = lock.state.lock().unwrap_or_else(PoisonError::into_inner);
        match state.owner {
            Some(owner) if owner == me => {
                state.depth += 1;
            }
            Some(_) => {
                lock.contentions.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            None => {
                state.owner = Some(me);
                state.depth = 1;
            }
        }
        lock.acquisitions.fetch_add(1, Ordering::Relaxed);
        drop(state);
        Some(self.guard(lock))
    }

    /// Counters for one named lock, if it has ever been used.
    pub fn stats(&self, name: &str) -> Option<LockStatsSnapshot> {
        self.locks.get(name).map(|lock| LockStatsSnapshot {
            acquisitions: lock.acquisitions.load(Ordering::Relaxed),
            contentions: lock.contentions.load(Ordering::Relaxed),
        })
    }

    fn guard(&self, lock: Arc<NamedLock>) -> LockGuard {
        LockGuard {
            lock,
            _not_send: PhantomData,
        }
    }
}
