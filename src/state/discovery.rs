use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of characters of anchor text kept per link
///
/// A presentation bound only, to keep persisted state small; deduplication
/// is by URL and never looks at anchor text.
pub const ANCHOR_TEXT_MAX: usize = 100;

/// A link discovered during the crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredLink {
    /// Absolute, resolved URL
    pub url: String,

    /// Anchor text of the link, possibly empty, truncated to [`ANCHOR_TEXT_MAX`]
    pub anchor_text: String,

    /// URL of the page this link was found on
    pub source_page: String,

    /// Depth at which the source page was crawled
    pub depth: u32,
}

/// The persisted record of a discovery crawl session
///
/// `seed_url` and `max_depth` are fixed at construction. `visited` holds
/// every URL handed to the page fetcher this session (successfully or not);
/// a visited URL is never fetched again. `documents` and `nav_links` are
/// first-seen-wins sequences, unique by URL within each bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryState {
    pub seed_url: String,
    pub max_depth: u32,

    /// Hex SHA-256 of the config file this state was produced under
    #[serde(default)]
    pub config_hash: String,

    /// Refreshed on every save
    pub generated_at: DateTime<Utc>,

    pub visited: HashSet<String>,
    pub documents: Vec<DiscoveredLink>,
    pub nav_links: Vec<DiscoveredLink>,
}

impl DiscoveryState {
    /// Creates an empty state for a new crawl session
    pub fn new(seed_url: impl Into<String>, max_depth: u32, config_hash: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth,
            config_hash: config_hash.into(),
            generated_at: Utc::now(),
            visited: HashSet::new(),
            documents: Vec::new(),
            nav_links: Vec::new(),
        }
    }

    /// Returns true if the URL has already been fetched this session
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Marks a URL as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Records a discovered document link, first-seen-wins by URL
    ///
    /// Returns true if the link was new and recorded.
    pub fn record_document(&mut self, link: DiscoveredLink) -> bool {
        if self.documents.iter().any(|d| d.url == link.url) {
            return false;
        }
        self.documents.push(link);
        true
    }

    /// Records a discovered navigation link, first-seen-wins by URL
    ///
    /// Returns true if the link was new and recorded.
    pub fn record_nav_link(&mut self, link: DiscoveredLink) -> bool {
        if self.nav_links.iter().any(|n| n.url == link.url) {
            return false;
        }
        self.nav_links.push(link);
        true
    }

    /// URLs of every discovered document, in discovery order
    pub fn document_urls(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.url.clone()).collect()
    }
}

/// Collapses whitespace and truncates anchor text to the persisted bound
pub fn clean_anchor_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(ANCHOR_TEXT_MAX).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str, depth: u32) -> DiscoveredLink {
        DiscoveredLink {
            url: url.to_string(),
            anchor_text: String::new(),
            source_page: "https://example.justice.gov/a".to_string(),
            depth,
        }
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = DiscoveryState::new("https://example.justice.gov/a", 2, "abc123");
        assert!(state.visited.is_empty());
        assert!(state.documents.is_empty());
        assert!(state.nav_links.is_empty());
        assert_eq!(state.max_depth, 2);
        assert_eq!(state.config_hash, "abc123");
    }

    #[test]
    fn test_mark_visited_once() {
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 2, "");
        assert!(state.mark_visited("https://example.justice.gov/a"));
        assert!(!state.mark_visited("https://example.justice.gov/a"));
        assert!(state.is_visited("https://example.justice.gov/a"));
    }

    #[test]
    fn test_document_first_seen_wins() {
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 2, "");
        assert!(state.record_document(link("https://example.justice.gov/x.pdf", 0)));

        // Same URL at another depth is suppressed; original provenance kept
        assert!(!state.record_document(link("https://example.justice.gov/x.pdf", 1)));
        assert_eq!(state.documents.len(), 1);
        assert_eq!(state.documents[0].depth, 0);
    }

    #[test]
    fn test_nav_link_first_seen_wins() {
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 2, "");
        assert!(state.record_nav_link(link("https://example.justice.gov/b", 0)));
        assert!(!state.record_nav_link(link("https://example.justice.gov/b", 1)));
        assert_eq!(state.nav_links.len(), 1);
    }

    #[test]
    fn test_same_url_allowed_in_both_buckets() {
        // Dedup is per-bucket; classification decides the bucket upstream
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 2, "");
        assert!(state.record_document(link("https://example.justice.gov/x", 0)));
        assert!(state.record_nav_link(link("https://example.justice.gov/x", 0)));
    }

    #[test]
    fn test_document_urls_preserve_order() {
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 2, "");
        state.record_document(link("https://example.justice.gov/1.pdf", 0));
        state.record_document(link("https://example.justice.gov/2.pdf", 0));
        assert_eq!(
            state.document_urls(),
            vec![
                "https://example.justice.gov/1.pdf".to_string(),
                "https://example.justice.gov/2.pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_clean_anchor_text_collapses_whitespace() {
        assert_eq!(clean_anchor_text("  Data  Set\n  1  "), "Data Set 1");
    }

    #[test]
    fn test_clean_anchor_text_truncates() {
        let long = "x".repeat(500);
        assert_eq!(clean_anchor_text(&long).chars().count(), ANCHOR_TEXT_MAX);
    }

    #[test]
    fn test_state_json_round_trip() {
        let mut state = DiscoveryState::new("https://example.justice.gov/a", 1, "deadbeef");
        state.mark_visited("https://example.justice.gov/a");
        state.record_document(DiscoveredLink {
            url: "https://example.justice.gov/x.pdf".to_string(),
            anchor_text: "Exhibit X".to_string(),
            source_page: "https://example.justice.gov/a".to_string(),
            depth: 0,
        });

        let json = serde_json::to_string(&state).unwrap();
        // Field names follow the persisted-document contract
        assert!(json.contains("\"seedUrl\""));
        assert!(json.contains("\"maxDepth\""));
        assert!(json.contains("\"anchorText\""));
        assert!(json.contains("\"sourcePage\""));

        let back: DiscoveryState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.documents, state.documents);
        assert_eq!(back.visited, state.visited);
    }
}
