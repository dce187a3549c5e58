//! Retrying page fetcher
//!
//! Wraps a `reqwest` client with the crawl's network policy: a fixed
//! per-request timeout, an identifying user agent, and a bounded retry loop
//! with a fixed inter-attempt delay. Response bodies are decoded lossily so a
//! page with a few bad bytes still comes back as text.

use std::time::Duration;

use reqwest::Client;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::crawler::CrawlerConfig;
use crate::crawler::error::CrawlError;

/// Page fetcher with retry and backoff
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
    retry_delay: Duration,
}

impl Fetcher {
    /// Create a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay(),
        }
    }

    /// Fetch a URL and return the decoded response body.
    ///
    /// Transport failures and non-success statuses are retried up to the
    /// configured attempt budget, each failure logged with its ordinal and
    /// cause. Only after every attempt has failed does this return
    /// [`CrawlError::FetchFailed`].
    pub async fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        for attempt in 1..=self.max_attempts {
            match self.try_fetch(url).await {
                Ok(body) => {
                    debug!(url, attempt, "fetched page");
                    return Ok(body);
                }
                Err(e) => {
                    warn!(
                        url,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "fetch attempt failed"
                    );
                    if attempt < self.max_attempts {
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(CrawlError::FetchFailed {
            url: url.to_string(),
            attempts: self.max_attempts,
        })
    }

    /// Perform a single GET. Invalid UTF-8 in the body is replaced rather
    /// than treated as a failed fetch.
    async fn try_fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
