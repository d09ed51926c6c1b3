//! Storage-specific error type for the snapshot file.

use nightwatch_domain::error::{NightwatchError, ValidationError};

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the snapshot file failed.
    #[error("filesystem error")]
    Io(#[from] std::io::Error),

    /// The snapshot file does not hold valid JSON.
    #[error("JSON deserialization error")]
    Json(#[from] serde_json::Error),

    /// The stored timeout is not a decimal number of seconds.
    #[error("malformed timeout value")]
    Timeout(#[from] std::num::ParseIntError),

    /// The stored values do not form a usable configuration.
    #[error("invalid stored settings")]
    Invalid(#[from] ValidationError),
}

impl From<StorageError> for NightwatchError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
