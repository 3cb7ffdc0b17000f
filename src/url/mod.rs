//! URL handling module for docsweep
//!
//! Resolves raw hrefs against the page they were found on and sorts them
//! into the three buckets the crawl cares about: documents to download,
//! same-site navigation to expand, and external links to count and drop.

mod domain;

pub use domain::{extract_host, is_same_site};

use url::Url;

/// Classification of a resolved link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// A target document (PDF) to be downloaded
    Document,
    /// A same-site navigation page, candidate for further expansion
    InternalNav,
    /// A navigation link leaving the target site; counted but not retained
    ExternalNav,
}

impl LinkClass {
    /// Returns true if links of this class are retained in discovery state
    pub fn is_retained(&self) -> bool {
        matches!(self, Self::Document | Self::InternalNav)
    }
}

/// A raw href resolved to an absolute URL and classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    pub url: Url,
    pub class: LinkClass,
}

/// Resolves and classifies a raw href found on a page
///
/// Returns `None` for hrefs that carry no crawlable target: empty strings,
/// fragment-only references, `javascript:`/`mailto:`/`tel:`/`data:`
/// pseudo-URLs, and anything that does not resolve to an http(s) URL.
///
/// Otherwise the href is resolved against `base` per standard relative-URL
/// resolution and tagged:
/// - [`LinkClass::Document`] when the resolved *path* ends in `.pdf`
///   (case-insensitive). A `.pdf` hiding in the query string does not
///   count; only the path suffix rule applies.
/// - [`LinkClass::InternalNav`] when the host is the target domain or a
///   subdomain of it.
/// - [`LinkClass::ExternalNav`] otherwise.
///
/// Pure function of its inputs; no network or parsing side effects.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docsweep::url::{classify_href, LinkClass};
///
/// let base = Url::parse("https://example.justice.gov/page").unwrap();
/// let link = classify_href("/files/report.PDF", &base, "example.justice.gov").unwrap();
/// assert_eq!(link.class, LinkClass::Document);
/// assert_eq!(link.url.as_str(), "https://example.justice.gov/files/report.PDF");
/// ```
pub fn classify_href(href: &str, base: &Url, target_domain: &str) -> Option<ClassifiedLink> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    let host = extract_host(&resolved)?;

    let class = if is_pdf_path(&resolved) {
        LinkClass::Document
    } else if is_same_site(&host, target_domain) {
        LinkClass::InternalNav
    } else {
        LinkClass::ExternalNav
    };

    Some(ClassifiedLink {
        url: resolved,
        class,
    })
}

/// Tests whether a URL's path names a PDF document (case-insensitive)
fn is_pdf_path(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.justice.gov/page").unwrap()
    }

    const TARGET: &str = "example.justice.gov";

    #[test]
    fn test_classify_absolute_pdf() {
        let link = classify_href("https://example.justice.gov/x.pdf", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::Document);
    }

    #[test]
    fn test_classify_relative_pdf_uppercase_extension() {
        let link = classify_href("/files/report.PDF", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::Document);
        assert_eq!(
            link.url.as_str(),
            "https://example.justice.gov/files/report.PDF"
        );
    }

    #[test]
    fn test_classify_internal_nav() {
        let link = classify_href("https://example.justice.gov/b", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::InternalNav);
    }

    #[test]
    fn test_classify_subdomain_as_internal() {
        let base = Url::parse("https://www.justice.gov/epstein").unwrap();
        let link = classify_href("https://archives.justice.gov/files", &base, "justice.gov").unwrap();
        assert_eq!(link.class, LinkClass::InternalNav);
    }

    #[test]
    fn test_classify_external_nav() {
        let link = classify_href("https://other.com/c", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::ExternalNav);
    }

    #[test]
    fn test_external_pdf_is_still_a_document() {
        // Documents are tagged before the site check: an off-site PDF link
        // is recorded as a document, not as external navigation.
        let link = classify_href("https://cdn.other.com/x.pdf", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::Document);
    }

    #[test]
    fn test_root_relative_resolution() {
        let link = classify_href("/press/releases", &base(), TARGET).unwrap();
        assert_eq!(
            link.url.as_str(),
            "https://example.justice.gov/press/releases"
        );
    }

    #[test]
    fn test_path_relative_resolution() {
        let link = classify_href("sub/doc", &base(), TARGET).unwrap();
        assert_eq!(link.url.as_str(), "https://example.justice.gov/sub/doc");
    }

    #[test]
    fn test_skip_empty_href() {
        assert!(classify_href("", &base(), TARGET).is_none());
        assert!(classify_href("   ", &base(), TARGET).is_none());
    }

    #[test]
    fn test_skip_fragment_only() {
        assert!(classify_href("#section", &base(), TARGET).is_none());
    }

    #[test]
    fn test_skip_javascript_pseudo_url() {
        assert!(classify_href("javascript:void(0)", &base(), TARGET).is_none());
    }

    #[test]
    fn test_skip_mailto_tel_data() {
        assert!(classify_href("mailto:tips@justice.gov", &base(), TARGET).is_none());
        assert!(classify_href("tel:+12025551212", &base(), TARGET).is_none());
        assert!(classify_href("data:text/html,<h1>x</h1>", &base(), TARGET).is_none());
    }

    #[test]
    fn test_query_string_pdf_does_not_match() {
        let link = classify_href("/download?file=report.pdf", &base(), TARGET).unwrap();
        assert_eq!(link.class, LinkClass::InternalNav);
    }

    #[test]
    fn test_is_retained() {
        assert!(LinkClass::Document.is_retained());
        assert!(LinkClass::InternalNav.is_retained());
        assert!(!LinkClass::ExternalNav.is_retained());
    }
}
