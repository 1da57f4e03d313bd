//! In-memory tier: the deterministic fake for tests and the default larger
//! tier for ephemeral sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::tier::{StorageTier, TierError};

/// A `Mutex<HashMap>` tier with an optional total-byte budget covering keys
/// and values, the way a browser quota covers the whole store.
pub struct MemoryTier {
    entries: Mutex<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryTier {
    /// Unbounded tier.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: None,
        }
    }

    /// Tier that rejects writes once total usage would pass `limit` bytes.
    pub fn with_capacity(limit: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(limit),
        }
    }

    fn usage_without(entries: &HashMap<String, String>, key: &str) -> usize {
        entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Default for MemoryTier {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageTier for MemoryTier {
    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TierError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;

        if let Some(limit) = self.capacity {
            let attempted = Self::usage_without(&entries, key) + key.len() + value.len();
            if attempted > limit {
                return Err(TierError::CapacityExceeded { attempted, limit });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TierError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| TierError::Backend(format!("Lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}
