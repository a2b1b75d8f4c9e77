use std::time::Duration;

/// Lock registry errors.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// The timeout elapsed before the lock could be acquired. Callers treat
    /// this as "operation skipped", not as a fatal condition.
    #[error("lock '{name}' not acquired within {timeout:?}")]
    Timeout { name: String, timeout: Duration },
}
