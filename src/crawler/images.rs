//! Idempotent image persistence
//!
//! Downloads a painting's primary image to its destination path exactly once:
//! an existing file short-circuits without a network call, and the body is
//! written to a temporary sibling and renamed into place so a failed write
//! never leaves a file that looks downloaded.

use std::path::Path;

use reqwest::Client;
use tokio::fs;
use tracing::{debug, info};
use url::Url;

use crate::crawler::CrawlerConfig;
use crate::crawler::error::CrawlError;

/// Fallback extension when the image URL carries none
const DEFAULT_IMAGE_EXT: &str = "jpg";

/// Outcome of a download request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The image was fetched and written
    Downloaded,
    /// The destination already existed; no network call was made
    AlreadyExists,
}

/// Downloader for painting images
#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
}

impl ImageDownloader {
    /// Create a downloader from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Download `url` to `dest`, creating missing parent directories.
    ///
    /// Safe to call repeatedly: when `dest` already exists the request is
    /// skipped entirely. A single GET is performed, with no retry loop of its
    /// own. On any error no file is left at `dest`.
    pub async fn download(&self, url: &str, dest: &Path) -> Result<DownloadOutcome, CrawlError> {
        if fs::try_exists(dest).await? {
            debug!(dest = %dest.display(), "image already exists, skipping download");
            return Ok(DownloadOutcome::AlreadyExists);
        }

        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = tmp_path(dest);
        if let Err(e) = fs::write(&tmp, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp, dest).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        info!(url, dest = %dest.display(), "downloaded image");
        Ok(DownloadOutcome::Downloaded)
    }
}

fn tmp_path(dest: &Path) -> std::path::PathBuf {
    let file_name = dest
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!("{file_name}.part"))
}

/// Resolve an image href against the shop base URL. Absolute URLs pass
/// through unchanged.
pub fn resolve_image_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}

/// Local filename for a painting image: the record slug plus the extension
/// taken from the URL path, defaulting to `.jpg`.
pub fn image_filename(slug: &str, image_url: &str) -> String {
    let ext = Url::parse(image_url)
        .ok()
        .and_then(|parsed| {
            Path::new(parsed.path())
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| DEFAULT_IMAGE_EXT.to_string());

    format!("{slug}.{ext}")
}
