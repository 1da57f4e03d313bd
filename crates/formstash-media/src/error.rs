use thiserror::Error;

/// Errors produced by the media encoding layer.
#[derive(Error, Debug)]
pub enum MediaError {
    /// The payload exceeds the accepted ceiling.
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },

    /// Reading the source failed.
    #[error("Failed to read file: {0}")]
    ReadFailure(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MediaError>;
