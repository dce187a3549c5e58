//! Error types for the crawler module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A page could not be fetched within the configured attempt budget
    #[error("fetch failed for {url} after {attempts} attempts")]
    FetchFailed {
        /// URL that was requested
        url: String,
        /// Number of attempts made
        attempts: u32,
    },

    /// No category listing page could be fetched, so there is nothing to crawl
    #[error("no category listing could be fetched")]
    NoListings,

    /// Filesystem error while persisting an image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::Http(e) => CrateError::Http(e),
            CrawlError::Io(e) => CrateError::Io(e),
            _ => CrateError::Crawl(err.to_string()),
        }
    }
}
