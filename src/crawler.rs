//! # Webshop Crawler Module
//!
//! This module provides the full crawl pipeline for the painting webshop:
//! listing pages are fetched per category, product detail links are extracted,
//! each detail page is parsed into a [`PaintingRecord`], and the primary image
//! is downloaded next to the manifest.
//!
//! ## Key Components
//!
//! - `CrawlerConfig`: Configuration for the crawler, including categories, rate limits, etc.
//! - `PaintingRecord`: Represents one crawled product with its extracted metadata
//! - `Fetcher`: Retrying page fetcher with lossy text decoding
//! - `extract_detail_links`: Scans a listing page for qualifying product links
//! - `extract_product`: The pattern-matching core deriving a record from raw markup
//! - `ImageDownloader`: Idempotent, atomic image persistence
//! - `crawl_site`: Main function driving the category -> links -> records pipeline
//!
//! ## Features
//!
//! - Every extraction rule is independently optional; missing fields become
//!   empty values, never failures
//! - Unreachable pages skip one category or one item, never the whole run
//! - A fixed politeness delay between detail-page requests
//! - Re-running is safe: images already on disk are not fetched again

mod config;
mod error;
mod extract;
mod fetch;
mod images;
mod links;
mod run;

// Re-export important types and functions
pub use config::{Category, CrawlerConfig};
pub use error::CrawlError;
pub use extract::{extract_product, slugify};
pub use fetch::Fetcher;
pub use images::{image_filename, resolve_image_url, DownloadOutcome, ImageDownloader};
pub use links::extract_detail_links;
pub use run::crawl_site;

use serde::{Deserialize, Serialize};

/// One crawled product: a painting with its extracted metadata.
///
/// Serialized field names match the manifest consumed by the downstream
/// content generators, which join on `slug` and tolerate every optional
/// field being empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintingRecord {
    /// Numeric product id from the detail URL; 0 when the URL carries none
    pub id: u32,

    /// Slugified Dutch title; manifest join key and image file basename
    #[serde(default)]
    pub slug: String,

    /// Dutch title derived from the URL slug
    pub title_nl: String,

    /// English title; equals `title_nl` when the slug is not bilingual
    pub title_en: String,

    /// Asking price in euros, absent when no currency pattern matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,

    /// Physical size as free text ("130 x 80 cm"), or empty
    #[serde(default)]
    pub dimensions: String,

    /// Material/technique as free text, or empty
    #[serde(default)]
    pub medium: String,

    /// Tag-stripped, whitespace-collapsed description, or empty
    #[serde(default)]
    pub description: String,

    /// Image URLs in document order, deduplicated, primary image first
    #[serde(default)]
    pub images: Vec<String>,

    /// Manifest-relative path of the downloaded primary image; empty when no
    /// image was found or the download failed
    #[serde(default)]
    pub local_image: String,

    /// Crawl category the record was discovered under
    #[serde(default)]
    pub category: String,

    /// Original detail-page URL
    #[serde(rename = "url")]
    pub source_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_manifest_keys() {
        let record = PaintingRecord {
            id: 173,
            slug: "de-kloof".to_string(),
            title_nl: "De Kloof".to_string(),
            title_en: "The Gap".to_string(),
            price: Some(950.0),
            dimensions: "130 x 80 cm".to_string(),
            medium: "Olieverf op doek".to_string(),
            description: "Een schilderij".to_string(),
            images: vec!["/data/upload/Shop/images/kloof.jpg".to_string()],
            local_image: "images/paintings/abstract/de-kloof.jpg".to_string(),
            category: "abstract".to_string(),
            source_url: "/webshop/detail/173/de-kloof--the-gap.html".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title_nl"], "De Kloof");
        assert_eq!(json["url"], "/webshop/detail/173/de-kloof--the-gap.html");
        assert_eq!(json["local_image"], "images/paintings/abstract/de-kloof.jpg");
    }

    #[test]
    fn test_absent_price_is_omitted() {
        let record = PaintingRecord {
            id: 0,
            slug: "naamloos".to_string(),
            title_nl: "Naamloos".to_string(),
            title_en: "Naamloos".to_string(),
            price: None,
            dimensions: String::new(),
            medium: String::new(),
            description: String::new(),
            images: Vec::new(),
            local_image: String::new(),
            category: "abstract".to_string(),
            source_url: "/webshop/detail/naamloos.html".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("price").is_none());
    }
}
