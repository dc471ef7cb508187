/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database error from redb
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Error reported by the key-value backend
    #[error(transparent)]
    Backend(#[from] mixtape_core::MixtapeError),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for mixtape_core::MixtapeError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Backend(inner) => inner,
            other => mixtape_core::MixtapeError::storage(other.to_string()),
        }
    }
}
