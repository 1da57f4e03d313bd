//! Application configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the app starts with zero
//! configuration.

use std::path::PathBuf;

use directories::ProjectDirs;

use formstash_shared::constants::DRAFT_TTL_DAYS;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding both persistence tiers.
    /// Env: `FORMSTASH_DATA_DIR`
    /// Default: the platform data directory (e.g.
    /// `~/.local/share/formstash` on Linux).
    pub data_dir: PathBuf,

    /// Draft projection lifetime in days.
    /// Env: `FORMSTASH_DRAFT_TTL_DAYS`
    /// Default: `3`
    pub draft_ttl_days: i64,

    /// Optional byte budget for the larger tier, to exercise quota
    /// behavior locally.
    /// Env: `FORMSTASH_STORE_CAPACITY` (bytes; unset = unlimited)
    /// Default: unlimited.
    pub store_capacity: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            draft_ttl_days: DRAFT_TTL_DAYS,
            store_capacity: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("FORMSTASH_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(val) = std::env::var("FORMSTASH_DRAFT_TTL_DAYS") {
            match val.parse::<i64>() {
                Ok(days) if days > 0 => config.draft_ttl_days = days,
                _ => {
                    tracing::warn!(value = %val, "Invalid FORMSTASH_DRAFT_TTL_DAYS, using default");
                }
            }
        }

        if let Ok(val) = std::env::var("FORMSTASH_STORE_CAPACITY") {
            match val.parse::<usize>() {
                Ok(bytes) => config.store_capacity = Some(bytes),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid FORMSTASH_STORE_CAPACITY, using default");
                }
            }
        }

        config
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "formstash", "formstash")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./formstash-data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.draft_ttl_days, 3);
        assert!(config.store_capacity.is_none());
        assert!(!config.data_dir.as_os_str().is_empty());
    }
}
