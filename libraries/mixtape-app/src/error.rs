/// Application error types
use mixtape_core::{AccountError, MixtapeError};
use thiserror::Error;

/// Result type alias using `AppError`
pub type Result<T> = std::result::Result<T, AppError>;

/// Errors returned by controller operations.
///
/// The user-facing text for each failure is stored on the controller's
/// status fields; these variants tell the caller which path was taken.
#[derive(Error, Debug)]
pub enum AppError {
    /// Account form rejected
    #[error(transparent)]
    Validation(#[from] AccountError),

    /// Remote operation failed
    #[error("Remote sync failed: {0}")]
    Remote(#[from] MixtapeError),

    /// No project is open
    #[error("No project selected")]
    NoProjectSelected,

    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// User dismissed a prompt or confirmation
    #[error("Cancelled")]
    Cancelled,

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Local store could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] mixtape_storage::StorageError),
}

impl AppError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
