//! # Galerij - Painting Webshop Crawler
//!
//! This crate mirrors a painting webshop into a local archive. It walks the
//! configured category listing pages, follows every product detail link,
//! extracts structured metadata from the loosely-structured shop markup, and
//! downloads each painting's primary image. The result is a single JSON
//! manifest, sorted by product id, that downstream content generators consume
//! via the `slug` join key.
//!
//! ## Features
//!
//! - Sequential, polite crawling with a configurable inter-request delay
//! - Retrying fetcher with lossy UTF-8 decoding for mildly broken encodings
//! - Layered, independently optional extraction rules - a missing price or
//!   dimension never fails a record
//! - Idempotent image downloads: existing files are never re-fetched
//! - Async API with Tokio
//! - Robust error handling and logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use galerij::crawler::{crawl_site, CrawlerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CrawlerConfig::default();
//!     let paintings = crawl_site(&config).await?;
//!
//!     galerij::manifest::write_manifest(&config.manifest_path, &paintings).await?;
//!     println!("Scraped {} paintings", paintings.len());
//!     Ok(())
//! }
//! ```

mod error;

pub mod crawler;
pub mod manifest;

pub use error::Error;

/// Re-export of types module for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
