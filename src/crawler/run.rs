//! Crawl orchestration
//!
//! Drives the category -> links -> records pipeline: one listing fetch per
//! category, one detail fetch per discovered link, a primary-image download
//! per record, and a politeness pause between detail requests. Unreachable
//! pages skip a single category or item; only a run with no reachable
//! listing at all is fatal.

use tokio::time::sleep;
use tracing::{info, instrument, warn};

use crate::crawler::error::CrawlError;
use crate::crawler::{
    CrawlerConfig, Fetcher, ImageDownloader, PaintingRecord, extract_detail_links,
    extract_product, image_filename, resolve_image_url, slugify,
};

/// Crawl every configured category and return the records sorted by product
/// id, descending.
///
/// The sort is stable, so records with equal ids (including the 0 sentinel)
/// keep their discovery order and the result is deterministic for a given
/// input collection.
#[instrument(skip(config))]
pub async fn crawl_site(config: &CrawlerConfig) -> Result<Vec<PaintingRecord>, CrawlError> {
    let fetcher = Fetcher::new(config);
    let downloader = ImageDownloader::new(config);

    let mut paintings = Vec::new();
    let mut listings_fetched = 0u32;

    for category in &config.categories {
        info!(category = %category.name, "crawling category");
        let listing_url = format!("{}{}", config.base_url, category.listing_path);

        let listing_html = match fetcher.fetch(&listing_url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    category = %category.name,
                    url = %listing_url,
                    error = %e,
                    "listing page unreachable, skipping category"
                );
                continue;
            }
        };
        listings_fetched += 1;

        let links = extract_detail_links(&listing_html);
        info!(category = %category.name, count = links.len(), "found paintings");

        for link in links {
            let detail_url = if link.starts_with("http") {
                link.clone()
            } else {
                format!("{}{}", config.base_url, link)
            };

            let detail_html = match fetcher.fetch(&detail_url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %detail_url, error = %e, "detail page unreachable, skipping painting");
                    continue;
                }
            };

            let mut record = extract_product(&detail_html, &link);
            record.category = category.name.clone();
            record.slug = slugify(&record.title_nl);

            // Downstream image selection always takes element zero
            let primary_image = record.images.first().cloned();
            if let Some(image) = primary_image {
                let image_url = resolve_image_url(&config.base_url, &image);
                let filename = image_filename(&record.slug, &image_url);
                let dest = config.image_dir.join(&category.name).join(&filename);

                match downloader.download(&image_url, &dest).await {
                    Ok(_) => {
                        record.local_image =
                            format!("images/paintings/{}/{}", category.name, filename);
                    }
                    Err(e) => {
                        // Record proceeds without a local image; the path
                        // must never point at a file that does not exist
                        warn!(url = %image_url, error = %e, "image download failed");
                    }
                }
            } else {
                warn!(url = %record.source_url, "no image found");
            }

            paintings.push(record);
            sleep(config.rate_limit()).await;
        }
    }

    if listings_fetched == 0 {
        return Err(CrawlError::NoListings);
    }

    paintings.sort_by(|a, b| b.id.cmp(&a.id));
    info!(count = paintings.len(), "crawl finished");
    Ok(paintings)
}
