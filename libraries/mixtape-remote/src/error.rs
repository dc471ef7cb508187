//! Error types for the remote sync client.

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend is offline or unreachable
    #[error("Backend unreachable: {0}")]
    Unreachable(String),

    /// Backend rejected the access key
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Rate limited by the backend
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// Failed to parse a backend response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Backend returned no row where one was expected
    #[error("Backend returned no {0} record")]
    EmptyResponse(&'static str),

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Missing endpoint or access key
    #[error("Remote sync is not configured: {0}")]
    NotConfigured(String),
}

/// Result type for remote client operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

impl From<RemoteError> for mixtape_core::MixtapeError {
    fn from(err: RemoteError) -> Self {
        mixtape_core::MixtapeError::remote(err.to_string())
    }
}
