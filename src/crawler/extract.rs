//! # Product Metadata Extraction
//!
//! The pattern-matching core of the crawler. A product detail page on the
//! shop is loosely structured, so instead of relying on a single template
//! this module applies an ordered set of independent matchers, each of which
//! may simply find nothing:
//!
//! 1. Titles - derived from the URL's final path segment; a `--` separator
//!    splits the Dutch and English halves
//! 2. Product id - the digit run after the `/detail/` path marker
//! 3. Price - the first `€`-marked numeric token, normalized to a float
//! 4. Images - every upload-path attribute value in document order, with the
//!    `og:image` meta content forced to the front as the primary image
//! 5. Description - the first div whose class hints at a description block,
//!    tag-stripped and whitespace-collapsed
//! 6. Dimensions - the first `<n> x <n> cm` shape
//! 7. Medium - the first bounded material phrase ending in a surface word
//!
//! A matcher that finds nothing produces an empty or absent field and never
//! affects the other matchers; extraction always succeeds structurally.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::crawler::PaintingRecord;

/// Extract a painting record from a product detail page.
///
/// The returned record is partial: `slug`, `category` and `local_image` are
/// assigned by the orchestrator. Deterministic and side-effect free.
pub fn extract_product(html: &str, url: &str) -> PaintingRecord {
    let (title_nl, title_en) = titles_from_url(url);

    PaintingRecord {
        id: product_id(url),
        slug: String::new(),
        title_nl,
        title_en,
        price: price(html),
        dimensions: dimensions(html),
        medium: medium(html),
        description: description(html),
        images: images(html),
        local_image: String::new(),
        category: String::new(),
        source_url: url.to_string(),
    }
}

/// Convert text to a URL-safe slug: lowercase alphanumerics joined by single
/// hyphens, with no leading or trailing hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;

    for c in text.trim().to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
    }

    slug
}

/// Derive the Dutch and English titles from the URL slug.
///
/// The shop encodes bilingual names as `dutch-title--english-title`; without
/// the separator the single title fills both slots.
fn titles_from_url(url: &str) -> (String, String) {
    let segment = url.strip_suffix(".html").unwrap_or(url);
    let segment = segment.rsplit('/').next().unwrap_or(segment);

    match segment.split_once("--") {
        Some((nl, en)) => (humanize(nl), humanize(en)),
        None => {
            let title = humanize(segment);
            (title.clone(), title)
        }
    }
}

/// Turn a slug fragment into a display title: separators become spaces and
/// every word is title-cased.
fn humanize(fragment: &str) -> String {
    title_case(fragment.replace('-', " ").trim())
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First digit run after the `/detail/` path marker; 0 when absent.
fn product_id(url: &str) -> u32 {
    Regex::new(r"/detail/(\d+)/")
        .ok()
        .and_then(|re| {
            re.captures(url)
                .and_then(|caps| caps.get(1)?.as_str().parse().ok())
        })
        .unwrap_or(0)
}

/// First currency-marked numeric token, with thousands dots removed and the
/// decimal comma normalized. An unparsable token is absent, never zero.
fn price(html: &str) -> Option<f64> {
    let re = Regex::new(r"€\s*([\d.,]+)").ok()?;
    let token = re.captures(html)?.get(1)?.as_str();
    let normalized = token.replace('.', "").replace(',', ".");
    normalized.parse().ok()
}

/// Every `src`/`href` attribute value under the shop upload path, in document
/// order, deduplicated. The `og:image` meta content is inserted at the front
/// when not already present, so it always wins as the primary image.
fn images(html: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    if let Ok(re) = Regex::new(r#"(?:src|href)=["']([^"']*?/data/upload/Shop/images/[^"']+)["']"#) {
        for caps in re.captures_iter(html) {
            if let Some(m) = caps.get(1) {
                if seen.insert(m.as_str().to_string()) {
                    images.push(m.as_str().to_string());
                }
            }
        }
    }

    if let Some(og) = og_image(html) {
        if !seen.contains(&og) {
            images.insert(0, og);
        }
    }

    images
}

/// Content of the `og:image` meta tag, when present and non-empty.
fn og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;

    document
        .select(&selector)
        .next()?
        .value()
        .attr("content")
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}

/// Subtree text of the first div whose class hints at a description block,
/// whitespace-collapsed; empty when no such block exists.
fn description(html: &str) -> String {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse(
        r#"div[class*="description"], div[class*="product-text"], div[class*="detail"]"#,
    ) else {
        return String::new();
    };

    match document.select(&selector).next() {
        Some(element) => collapse_whitespace(&element.text().collect::<Vec<_>>().join(" ")),
        None => String::new(),
    }
}

/// First `<n> x <n> cm` occurrence; decimal comma or point accepted on
/// either number.
fn dimensions(html: &str) -> String {
    let Ok(re) = Regex::new(r"(\d+(?:[.,]\d+)?\s*x\s*\d+(?:[.,]\d+)?)\s*cm") else {
        return String::new();
    };

    match re.captures(html).and_then(|caps| caps.get(1)) {
        Some(m) => format!("{} cm", m.as_str().trim()),
        None => String::new(),
    }
}

/// Material phrases the shop uses, most specific first. Each is bounded to a
/// short span ending at a surface word so a match cannot run away across the
/// page.
const MEDIUM_PATTERNS: [&str; 4] = [
    r"(?i)Olie(?:verf)?[^<.]{0,60}(?:paneel|doek|canvas|panel)",
    r"(?i)Oil[^<.]{0,60}(?:panel|canvas)",
    r"(?i)Acryl[^<.]{0,60}(?:paneel|doek|canvas|panel)",
    r"(?i)Mixed media[^<.]{0,60}",
];

/// First match of the material patterns, in priority order. A match of 100
/// characters or more is discarded rather than truncated.
fn medium(html: &str) -> String {
    for pattern in MEDIUM_PATTERNS {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(m) = re.find(html) {
            let text = collapse_whitespace(&strip_tags(m.as_str()));
            if text.chars().count() < 100 {
                return text;
            }
        }
    }

    String::new()
}

fn strip_tags(text: &str) -> String {
    match Regex::new(r"<[^>]+>") {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(_) => text.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilingual_slug_splits_titles() {
        let record = extract_product("", "/webshop/detail/173/de-kloof--the-gap.html");
        assert_eq!(record.title_nl, "De Kloof");
        assert_eq!(record.title_en, "The Gap");
    }

    #[test]
    fn test_single_slug_duplicates_title() {
        let record = extract_product("", "/webshop/detail/44/de-kloof.html");
        assert_eq!(record.title_nl, "De Kloof");
        assert_eq!(record.title_en, "De Kloof");
    }

    #[test]
    fn test_title_casing_lowercases_the_rest() {
        let record = extract_product("", "/webshop/detail/9/AAN-welke-KANT-sta-je.html");
        assert_eq!(record.title_nl, "Aan Welke Kant Sta Je");
    }

    #[test]
    fn test_product_id_from_url() {
        assert_eq!(product_id("/webshop/detail/173/de-kloof.html"), 173);
        assert_eq!(product_id("/webshop/overzicht/de-kloof.html"), 0);
    }

    #[test]
    fn test_price_normalization() {
        assert_eq!(price("Prijs: € 1.250,50 incl. btw"), Some(1250.50));
        assert_eq!(price("<span>€950</span>"), Some(950.0));
    }

    #[test]
    fn test_price_absent_without_currency_marker() {
        assert_eq!(price("Prijs op aanvraag"), None);
    }

    #[test]
    fn test_unparsable_price_is_absent_not_zero() {
        assert_eq!(price("€ .,"), None);
    }

    #[test]
    fn test_images_deduplicate_preserving_order() {
        let html = r#"
            <img src="/data/upload/Shop/images/a.jpg">
            <a href="/data/upload/Shop/images/b.jpg">groot</a>
            <img src="/data/upload/Shop/images/a.jpg">
            <img src='/data/upload/Shop/images/c.jpg'>
        "#;

        assert_eq!(
            images(html),
            vec![
                "/data/upload/Shop/images/a.jpg",
                "/data/upload/Shop/images/b.jpg",
                "/data/upload/Shop/images/c.jpg"
            ]
        );
    }

    #[test]
    fn test_og_image_is_inserted_first() {
        let html = r#"
            <meta property="og:image" content="https://shop.example/data/upload/Shop/images/p.jpg">
            <img src="/data/upload/Shop/images/a.jpg">
            <img src="/data/upload/Shop/images/b.jpg">
        "#;

        let found = images(html);
        assert_eq!(found[0], "https://shop.example/data/upload/Shop/images/p.jpg");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_og_image_already_listed_is_not_duplicated() {
        let html = r#"
            <img src="/data/upload/Shop/images/a.jpg">
            <meta property="og:image" content="/data/upload/Shop/images/a.jpg">
            <img src="/data/upload/Shop/images/b.jpg">
        "#;

        assert_eq!(
            images(html),
            vec![
                "/data/upload/Shop/images/a.jpg",
                "/data/upload/Shop/images/b.jpg"
            ]
        );
    }

    #[test]
    fn test_description_strips_tags_and_collapses_whitespace() {
        let html = r#"
            <div class="product-description">
                <p>Olieverf  op <b>paneel</b>.</p>
                <p>Ingelijst   geleverd.</p>
            </div>
        "#;

        assert_eq!(description(html), "Olieverf op paneel . Ingelijst geleverd.");
    }

    #[test]
    fn test_description_absent_is_empty() {
        assert_eq!(description("<div class=\"sidebar\">niets</div>"), "");
    }

    #[test]
    fn test_dimensions_with_decimal_comma() {
        assert_eq!(dimensions("Afmetingen: 25,5 x 16 cm, ingelijst"), "25,5 x 16 cm");
        assert_eq!(dimensions("130 x 80.5 cm"), "130 x 80.5 cm");
    }

    #[test]
    fn test_dimensions_absent_is_empty() {
        assert_eq!(dimensions("Groot formaat"), "");
    }

    #[test]
    fn test_medium_matches_in_priority_order() {
        assert_eq!(medium("Techniek: Olieverf en bladgoud op paneel"), "Olieverf en bladgoud op paneel");
        assert_eq!(medium("Oil and pigment on canvas"), "Oil and pigment on canvas");
        assert_eq!(medium("Acryl op doek"), "Acryl op doek");
    }

    #[test]
    fn test_medium_absent_is_empty() {
        assert_eq!(medium("Aquarel op papier"), "");
    }

    #[test]
    fn test_medium_bound_prevents_runaway_capture() {
        // More than 60 characters between the material word and the surface
        // word: the record gets no medium rather than a runaway capture.
        let filler = "a ".repeat(40);
        let html = format!("Olieverf {filler}doek en nog van alles");
        assert_eq!(medium(&html), "");
    }

    #[test]
    fn test_slugify_is_deterministic_and_clean() {
        assert_eq!(slugify("De Kloof"), "de-kloof");
        assert_eq!(slugify("De Kloof"), "de-kloof");
        assert_eq!(slugify("  --Missie: Volbracht!--  "), "missie-volbracht");
        assert_eq!(slugify("ijle_lucht"), "ijle-lucht");

        let slug = slugify("Tweeluik voor Verzoening");
        assert!(!slug.starts_with('-') && !slug.ends_with('-'));
        assert!(!slug.contains("--"));
        assert!(slug.chars().all(|c| c.is_alphanumeric() || c == '-'));
    }

    #[test]
    fn test_partial_page_still_extracts_other_fields() {
        // No dimensions pattern anywhere; everything else present.
        let html = r#"
            <meta property="og:image" content="/data/upload/Shop/images/toro.jpg">
            <div class="product-detail">Stier in de avondzon. € 675</div>
            <p>Acryl op doek</p>
        "#;

        let record = extract_product(html, "/webshop/detail/88/toro.html");
        assert_eq!(record.dimensions, "");
        assert_eq!(record.id, 88);
        assert_eq!(record.price, Some(675.0));
        assert_eq!(record.medium, "Acryl op doek");
        assert_eq!(record.images, vec!["/data/upload/Shop/images/toro.jpg"]);
        assert!(!record.description.is_empty());
    }
}
