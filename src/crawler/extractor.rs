//! Link and title extraction from page markup
//!
//! The extraction capability consumed by the crawl frontier: given raw
//! markup, return every anchor href with its text. Resolution and
//! classification of the hrefs happen downstream in the URL classifier.

use scraper::{Html, Selector};
use url::Url;

/// A raw link as it appears in the markup, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub href: String,
    pub anchor_text: String,
}

/// Capability for extracting raw links from markup
pub trait LinkExtractor {
    fn extract(&self, markup: &str, base: &Url) -> Vec<RawLink>;
}

/// Scraper-backed [`LinkExtractor`] implementation
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, markup: &str, _base: &Url) -> Vec<RawLink> {
        let document = Html::parse_document(markup);
        let mut links = Vec::new();

        if let Ok(selector) = Selector::parse("a[href]") {
            for element in document.select(&selector) {
                if let Some(href) = element.value().attr("href") {
                    let anchor_text = element.text().collect::<String>();
                    links.push(RawLink {
                        href: href.to_string(),
                        anchor_text,
                    });
                }
            }
        }

        links
    }
}

/// Extracts the page title, best-effort
///
/// Returns None when the markup has no non-empty `<title>`.
pub fn extract_title(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.justice.gov/page").unwrap()
    }

    #[test]
    fn test_extract_links_with_anchor_text() {
        let html = r#"<html><body>
            <a href="/files/x.pdf">Data Set 1</a>
            <a href="https://other.com/c">Elsewhere</a>
        </body></html>"#;

        let links = HtmlLinkExtractor.extract(html, &base());
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "/files/x.pdf");
        assert_eq!(links[0].anchor_text, "Data Set 1");
        assert_eq!(links[1].href, "https://other.com/c");
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Anchor</a></body></html>"#;
        let links = HtmlLinkExtractor.extract(html, &base());
        assert!(links.is_empty());
    }

    #[test]
    fn test_nested_anchor_text_flattened() {
        let html = r#"<html><body><a href="/b"><span>Read</span> <b>more</b></a></body></html>"#;
        let links = HtmlLinkExtractor.extract(html, &base());
        assert_eq!(links[0].anchor_text, "Read more");
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>  DOJ Disclosures  </title></head><body></body></html>"#;
        assert_eq!(extract_title(html), Some("DOJ Disclosures".to_string()));
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(extract_title("<html><body></body></html>"), None);
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(
            extract_title("<html><head><title></title></head></html>"),
            None
        );
    }

    #[test]
    fn test_garbage_markup_does_not_panic() {
        // html5ever recovers from anything; worst case is zero links
        let links = HtmlLinkExtractor.extract("<<<%%% not html", &base());
        assert!(links.is_empty());
    }
}
