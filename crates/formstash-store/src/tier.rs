//! The storage tier capability.
//!
//! Both persistence tiers — the small cookie jar and the larger key-value
//! store — are reached through this one trait, injected into the store
//! rather than looked up ambiently, so backends can be swapped and tests
//! run against a deterministic in-memory fake.

use thiserror::Error;

/// Errors produced by a storage tier backend.
#[derive(Error, Debug)]
pub enum TierError {
    /// The write would push the tier past its byte budget.  This is the
    /// quota indicator callers inspect to give actionable guidance.
    #[error("Capacity exceeded: {attempted} bytes against a {limit}-byte tier")]
    CapacityExceeded { attempted: usize, limit: usize },

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// A synchronous string key-value tier.
///
/// The browser media this models (cookies, local storage) are synchronous;
/// the async surface lives one layer up on [`FormStore`](crate::FormStore).
pub trait StorageTier: Send + Sync {
    /// Read the value under `key`, `None` when absent or expired.
    fn read(&self, key: &str) -> Result<Option<String>, TierError>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), TierError>;

    /// Remove `key`.  Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), TierError>;
}

/// A shared handle to a tier is itself a tier, so one backend can be held
/// by the store and by other observers at the same time.
impl<T: StorageTier + ?Sized> StorageTier for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TierError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), TierError> {
        (**self).remove(key)
    }
}
