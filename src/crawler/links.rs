//! Detail-link extraction from category listing pages

use std::collections::HashSet;

use scraper::{Html, Selector};

/// Extract product detail links from a category listing page.
///
/// An href qualifies when it contains the `/detail/` path segment and ends in
/// `.html`. Links are deduplicated by exact string equality, keeping first
/// occurrence order. Malformed markup is parsed best-effort and never fails.
pub fn extract_detail_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(anchor) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.contains("/detail/") && href.ends_with(".html") && seen.insert(href.to_string()) {
            links.push(href.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifying_links_in_document_order() {
        let html = r#"
            <html><body>
                <a href="/webshop/detail/101/eerste.html">Eerste</a>
                <a href="/webshop/overzicht/tweede.html">Geen detail</a>
                <a href="/webshop/detail/102/tweede.html">Tweede</a>
                <a href="/webshop/detail/103/derde">Geen extensie</a>
            </body></html>
        "#;

        let links = extract_detail_links(html);
        assert_eq!(
            links,
            vec![
                "/webshop/detail/101/eerste.html",
                "/webshop/detail/102/tweede.html"
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let html = r#"
            <a href="/webshop/detail/101/a.html"><img src="thumb.jpg"></a>
            <a href="/webshop/detail/102/b.html">B</a>
            <a href="/webshop/detail/101/a.html">A nogmaals</a>
        "#;

        let links = extract_detail_links(html);
        assert_eq!(
            links,
            vec!["/webshop/detail/101/a.html", "/webshop/detail/102/b.html"]
        );
    }

    #[test]
    fn test_malformed_markup_is_tolerated() {
        let html = r#"<div><a href="/webshop/detail/55/open.html">nooit gesloten<table><a href="/x/detail/56/ook.html""#;

        let links = extract_detail_links(html);
        assert!(links.contains(&"/webshop/detail/55/open.html".to_string()));
    }

    #[test]
    fn test_empty_input_yields_no_links() {
        assert!(extract_detail_links("").is_empty());
    }
}
