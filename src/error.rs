//! Error types for the galerij crate

use thiserror::Error;

/// Result type for galerij operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for galerij operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Web crawling error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
