use thiserror::Error;

/// Errors produced by the persistence layer.
///
/// Deserialization failures never appear here: corrupt stored state always
/// degrades locally to absent/empty.  Missing record ids are reported as
/// `false` returns, not errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The larger tier rejected the write for size.  The remedy is specific
    /// — shrink the media or delete old submissions — so this must stay
    /// distinguishable from generic failures.
    #[error(
        "Storage quota exceeded ({attempted} bytes against a {limit}-byte tier): \
         compress the media or delete old submissions"
    )]
    QuotaExceeded { attempted: usize, limit: usize },

    /// Any other backend failure.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Serializing a snapshot for persistence failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
