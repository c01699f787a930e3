//! Error types for taxa-dl
//!
//! Expected, anticipated failures (a single photo not found under any candidate
//! extension) are captured as data in [`crate::types::DownloadOutcome`] and never
//! surface here. This module covers the unexpected path: transport failures,
//! pagination bookkeeping that does not add up, invalid configuration, and
//! worker tasks that panic or cannot be spawned.

use thiserror::Error;

/// Result type alias for taxa-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for taxa-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "download_concurrency")
        key: Option<String>,
    },

    /// Network error from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status from an API call
    #[error("API error: status {status}: {body}")]
    Api {
        /// HTTP status code returned by the server
        status: u16,
        /// Response body, as returned by the server
        body: String,
    },

    /// Accumulated paginated results diverge from the server-reported total
    #[error("pagination mismatch: server reported {expected} records, received {received}")]
    PaginationMismatch {
        /// Total record count reported by the server
        expected: usize,
        /// Number of records actually accumulated across all pages
        received: usize,
    },

    /// A worker task failed unexpectedly (panicked or was aborted)
    #[error("worker error: {0}")]
    Worker(String),

    /// A process worker could not be spawned or waited on
    #[error("worker process error: {0}")]
    WorkerProcess(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL in configuration or endpoint construction
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Convenience constructor for configuration errors
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}
