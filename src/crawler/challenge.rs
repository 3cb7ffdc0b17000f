//! Bot-challenge detection heuristic
//!
//! Some sites front their pages with a JavaScript challenge instead of the
//! real markup. The crawl cannot defeat one, but it must recognize one so
//! the page is recorded as blocked rather than mined for links. Detection
//! is a marker-substring scan behind a single predicate; callers never
//! hardcode markers themselves.

/// Detects challenge interstitials in fetched markup
#[derive(Debug, Clone)]
pub struct ChallengeDetector {
    markers: Vec<String>,
}

impl ChallengeDetector {
    /// Creates a detector with a custom marker list (matched case-insensitively)
    pub fn new(markers: Vec<String>) -> Self {
        Self {
            markers: markers.into_iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    /// Returns true if the markup looks like a challenge page
    pub fn is_challenge(&self, markup: &str) -> bool {
        let haystack = markup.to_lowercase();
        self.markers.iter().any(|marker| haystack.contains(marker))
    }
}

impl Default for ChallengeDetector {
    /// Markers of the Akamai JavaScript challenge observed in the wild
    fn default() -> Self {
        Self::new(vec!["bm-verify".to_string(), "akamai".to_string()])
    }
}
