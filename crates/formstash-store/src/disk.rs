//! Disk-backed tier: one file per key under a base directory.
//!
//! This is the durable larger tier for native runs.  Keys are restricted to
//! plain names so a hostile key cannot escape the base directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::tier::{StorageTier, TierError};

pub struct DiskTier {
    base_dir: PathBuf,
    capacity: Option<usize>,
}

impl DiskTier {
    /// Open (or create) a tier rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, TierError> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir).map_err(|e| {
            TierError::Backend(format!(
                "Failed to create tier directory '{}': {e}",
                base_dir.display()
            ))
        })?;
        debug!(path = %base_dir.display(), "disk tier initialized");
        Ok(Self {
            base_dir,
            capacity: None,
        })
    }

    /// Open (or create) the default platform tier directory:
    /// - Linux:   `~/.local/share/formstash/store`
    /// - macOS:   `~/Library/Application Support/com.formstash.formstash/store`
    /// - Windows: `{FOLDERID_RoamingAppData}\formstash\formstash\data\store`
    pub fn open_default() -> Result<Self, TierError> {
        let project_dirs = ProjectDirs::from("com", "formstash", "formstash").ok_or_else(|| {
            TierError::Backend("Could not determine application data directory".to_string())
        })?;
        let base_dir = project_dirs.data_dir().join("store");
        info!(path = %base_dir.display(), "opening default disk tier");
        Self::new(base_dir)
    }

    /// Reject writes once total usage would pass `limit` bytes.
    pub fn with_capacity(mut self, limit: usize) -> Self {
        self.capacity = Some(limit);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Key as a file path, refusing separators and traversal.
    fn key_path(&self, key: &str) -> Result<PathBuf, TierError> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(TierError::Backend(format!("Invalid tier key: {key:?}")));
        }
        Ok(self.base_dir.join(key))
    }

    /// Bytes stored under every key except `key`.
    fn usage_without(&self, key: &str) -> Result<usize, TierError> {
        let entries = std::fs::read_dir(&self.base_dir)
            .map_err(|e| TierError::Backend(format!("Failed to list tier directory: {e}")))?;

        let mut total = 0usize;
        for entry in entries {
            let entry =
                entry.map_err(|e| TierError::Backend(format!("Failed to read entry: {e}")))?;
            if entry.file_name().to_str() == Some(key) {
                continue;
            }
            if let Ok(meta) = entry.metadata() {
                total += meta.len() as usize;
            }
        }
        Ok(total)
    }
}

impl StorageTier for DiskTier {
    fn read(&self, key: &str) -> Result<Option<String>, TierError> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TierError::Backend(format!(
                "Failed to read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), TierError> {
        let path = self.key_path(key)?;

        if let Some(limit) = self.capacity {
            let attempted = self.usage_without(key)? + value.len();
            if attempted > limit {
                return Err(TierError::CapacityExceeded { attempted, limit });
            }
        }

        std::fs::write(&path, value).map_err(|e| {
            TierError::Backend(format!("Failed to write '{}': {e}", path.display()))
        })?;
        debug!(key, size = value.len(), "wrote tier entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TierError> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TierError::Backend(format!(
                "Failed to remove '{}': {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_tier() -> (DiskTier, TempDir) {
        let dir = TempDir::new().unwrap();
        let tier = DiskTier::new(dir.path()).unwrap();
        (tier, dir)
    }

    #[test]
    fn test_round_trip_survives_reopen() {
        let (tier, dir) = test_tier();
        tier.write("storage_form_key", "[1,2,3]").unwrap();

        // a second handle over the same directory sees the value
        let reopened = DiskTier::new(dir.path()).unwrap();
        assert_eq!(
            reopened.read("storage_form_key").unwrap().as_deref(),
            Some("[1,2,3]")
        );
    }

    #[test]
    fn test_missing_key_is_none() {
        let (tier, _dir) = test_tier();
        assert!(tier.read("absent").unwrap().is_none());
        tier.remove("absent").unwrap();
    }

    #[test]
    fn test_capacity() {
        let (tier, _dir) = test_tier();
        let tier = tier.with_capacity(8);
        tier.write("a", "1234").unwrap();

        let err = tier.write("b", "123456789").unwrap_err();
        assert!(matches!(err, TierError::CapacityExceeded { .. }));
        assert!(tier.read("b").unwrap().is_none());
    }

    #[test]
    fn test_traversal_key_rejected() {
        let (tier, _dir) = test_tier();
        assert!(tier.write("../escape", "x").is_err());
        assert!(tier.read("a/b").is_err());
    }
}
