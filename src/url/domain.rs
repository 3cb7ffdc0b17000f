use url::Url;

/// Extracts the host from a URL, lowercased
///
/// Returns None when the URL has no host (which shouldn't happen for valid
/// HTTP(S) URLs).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use docsweep::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Tests whether a host belongs to the target site
///
/// A host is in-site when it equals the target domain or is a subdomain of
/// it. Comparison is case-insensitive.
///
/// # Examples
///
/// ```
/// use docsweep::url::is_same_site;
///
/// assert!(is_same_site("justice.gov", "justice.gov"));
/// assert!(is_same_site("www.justice.gov", "justice.gov"));
/// assert!(!is_same_site("other.com", "justice.gov"));
/// assert!(!is_same_site("notjustice.gov", "justice.gov"));
/// ```
pub fn is_same_site(host: &str, target_domain: &str) -> bool {
    let host = host.to_lowercase();
    let target = target_domain.to_lowercase();
    host == target || host.ends_with(&format!(".{}", target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_host_lowercases() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_host_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_host(&url), Some("127.0.0.1".to_string()));
    }

    #[test]
    fn test_same_site_exact() {
        assert!(is_same_site("justice.gov", "justice.gov"));
    }

    #[test]
    fn test_same_site_subdomain() {
        assert!(is_same_site("www.justice.gov", "justice.gov"));
        assert!(is_same_site("archives.fbi.justice.gov", "justice.gov"));
    }

    #[test]
    fn test_same_site_case_insensitive() {
        assert!(is_same_site("WWW.Justice.GOV", "justice.gov"));
    }

    #[test]
    fn test_suffix_collision_is_not_same_site() {
        // "notjustice.gov" merely ends with the same characters
        assert!(!is_same_site("notjustice.gov", "justice.gov"));
    }

    #[test]
    fn test_different_site() {
        assert!(!is_same_site("other.com", "justice.gov"));
    }
}
