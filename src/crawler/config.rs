//! # Crawler Configuration Module
//!
//! This module provides configuration options for the webshop crawler: the
//! site to mirror, the categories to walk, network behaviour (timeout, retry
//! policy, politeness delay), and the output locations. It uses a builder
//! pattern for flexible configuration.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: The main configuration struct with crawler parameters
//! - `CrawlerConfigBuilder`: Builder pattern implementation for easier configuration
//! - `Category`: A named category listing page on the shop
//!
//! ## Features
//!
//! - Defaults mirroring the original shop layout and polite crawl behaviour
//! - Fine-grained control over retries, timeouts and request spacing
//! - Output paths for the image archive and the JSON manifest

use std::path::PathBuf;
use std::time::Duration;

/// A shop category: a display name plus its listing page path
#[derive(Debug, Clone)]
pub struct Category {
    /// Category tag recorded on every crawled painting
    pub name: String,

    /// Listing page path relative to the base URL
    pub listing_path: String,
}

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>, listing_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            listing_path: listing_path.into(),
        }
    }
}

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Base URL of the webshop, without a trailing slash
    pub base_url: String,

    /// Categories to crawl, in order
    pub categories: Vec<Category>,

    /// User agent to use for requests
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum fetch attempts per page
    pub max_attempts: u32,

    /// Delay in milliseconds between fetch attempts for the same page
    pub retry_delay_ms: u64,

    /// Politeness delay in milliseconds between detail-page requests
    pub rate_limit_ms: u64,

    /// Directory the downloaded images are stored under, one subdirectory
    /// per category
    pub image_dir: PathBuf,

    /// Path the JSON manifest is written to
    pub manifest_path: PathBuf,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sanderveen-artshop.nl".to_string(),
            categories: vec![
                Category::new("abstract", "/webshop/schilderijenpaintings/abstract/"),
                Category::new(
                    "magisch-realisme",
                    "/webshop/schilderijenpaintings/magisch-realisme--reverso-context/",
                ),
            ],
            user_agent: format!("Mozilla/5.0 (galerij/{} migration crawler)", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            max_attempts: 3,
            retry_delay_ms: 2000,
            rate_limit_ms: 500,
            image_dir: PathBuf::from("assets/images/paintings"),
            manifest_path: PathBuf::from("manifest.json"),
        }
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the base URL of the webshop
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the categories to crawl
    pub fn categories(mut self, categories: Vec<Category>) -> Self {
        self.config.categories = categories;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout in seconds
    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Set the maximum fetch attempts per page
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// Set the delay in milliseconds between fetch attempts
    pub fn retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.config.retry_delay_ms = retry_delay_ms;
        self
    }

    /// Set the politeness delay in milliseconds between detail-page requests
    pub fn rate_limit_ms(mut self, rate_limit_ms: u64) -> Self {
        self.config.rate_limit_ms = rate_limit_ms;
        self
    }

    /// Set the directory downloaded images are stored under
    pub fn image_dir(mut self, image_dir: impl Into<PathBuf>) -> Self {
        self.config.image_dir = image_dir.into();
        self
    }

    /// Set the manifest output path
    pub fn manifest_path(mut self, manifest_path: impl Into<PathBuf>) -> Self {
        self.config.manifest_path = manifest_path.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Get the politeness delay as a Duration
    pub fn rate_limit(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }

    /// Get the inter-attempt retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Get the per-request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_both_categories() {
        let config = CrawlerConfig::default();
        let names: Vec<&str> = config.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["abstract", "magisch-realisme"]);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CrawlerConfig::builder()
            .base_url("http://localhost:1234")
            .max_attempts(1)
            .rate_limit_ms(0)
            .image_dir("/tmp/images")
            .build();

        assert_eq!(config.base_url, "http://localhost:1234");
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.rate_limit(), Duration::ZERO);
        assert_eq!(config.image_dir, PathBuf::from("/tmp/images"));
    }
}
