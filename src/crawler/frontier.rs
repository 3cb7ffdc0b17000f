//! Crawl frontier: depth-bounded, visited-deduplicated page expansion
//!
//! One call expands exactly one page. The decision of *which* pages to
//! expand next belongs to the driving loop and its selection policy; the
//! frontier only guarantees the invariants: a URL is fetched at most once
//! per session, nothing past the depth bound is fetched, and every
//! discovered link is recorded first-seen-wins.

use crate::crawler::challenge::ChallengeDetector;
use crate::crawler::extractor::{extract_title, LinkExtractor};
use crate::crawler::fetcher::PageFetcher;
use crate::state::{clean_anchor_text, DiscoveredLink, DiscoveryState};
use crate::url::{classify_href, LinkClass};
use std::collections::HashSet;
use url::Url;

/// Why a crawl invocation did no work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL was already fetched this session
    AlreadyVisited,
    /// The requested depth exceeds the configured bound
    DepthExceeded,
}

/// What one page contributed to the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    /// Best-effort page title; empty when unparseable
    pub title: String,

    /// Distinct document links found on this page
    pub document_count: usize,

    /// Distinct same-site navigation links found on this page
    pub nav_link_count: usize,

    /// Distinct external links observed on this page (not retained)
    pub external_link_count: usize,

    /// Navigation candidates for expansion at the next depth
    pub candidates: Vec<DiscoveredLink>,
}

/// Terminal outcome of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// No work done; the URL stays eligible only if depth allows elsewhere
    Skipped(SkipReason),

    /// Fetch failed; the URL is recorded visited and not retried this session
    Error { detail: String },

    /// A bot challenge was detected; the page contributes no links
    Blocked,

    /// The page was fetched and mined for links
    Success(PageSummary),
}

impl CrawlOutcome {
    /// Returns true when the page was fetched and processed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Expands pages one at a time, updating discovery state
pub struct CrawlFrontier<F, E> {
    fetcher: F,
    extractor: E,
    detector: ChallengeDetector,
    target_domain: String,
}

impl<F: PageFetcher, E: LinkExtractor> CrawlFrontier<F, E> {
    pub fn new(fetcher: F, extractor: E, detector: ChallengeDetector, target_domain: impl Into<String>) -> Self {
        Self {
            fetcher,
            extractor,
            detector,
            target_domain: target_domain.into(),
        }
    }

    /// Crawls a single page at the given depth
    ///
    /// Sequence: skip-check, mark visited, fetch, challenge-check, extract,
    /// classify, record. The visited mark happens before the fetch so a
    /// failed fetch can never cause a retry loop on the same URL within one
    /// session.
    pub async fn crawl_page(
        &self,
        state: &mut DiscoveryState,
        url: &str,
        depth: u32,
    ) -> CrawlOutcome {
        if depth > state.max_depth {
            return CrawlOutcome::Skipped(SkipReason::DepthExceeded);
        }

        if !state.mark_visited(url) {
            return CrawlOutcome::Skipped(SkipReason::AlreadyVisited);
        }

        tracing::info!("Crawling (depth {}): {}", depth, url);

        let base = match Url::parse(url) {
            Ok(base) => base,
            Err(e) => {
                return CrawlOutcome::Error {
                    detail: format!("unparseable URL: {}", e),
                }
            }
        };

        let markup = match self.fetcher.fetch(url).await {
            Ok(markup) => markup,
            Err(e) => {
                tracing::warn!("Fetch failed for {}: {}", url, e);
                return CrawlOutcome::Error {
                    detail: e.to_string(),
                };
            }
        };

        if self.detector.is_challenge(&markup) {
            tracing::warn!("Bot challenge detected on {}", url);
            return CrawlOutcome::Blocked;
        }

        let title = extract_title(&markup).unwrap_or_default();
        let raw_links = self.extractor.extract(&markup, &base);

        let mut seen_on_page = HashSet::new();
        let mut document_count = 0;
        let mut nav_link_count = 0;
        let mut external_link_count = 0;
        let mut candidates = Vec::new();

        for raw in raw_links {
            let Some(classified) = classify_href(&raw.href, &base, &self.target_domain) else {
                continue;
            };

            let resolved = classified.url.to_string();
            if !seen_on_page.insert(resolved.clone()) {
                continue;
            }

            match classified.class {
                LinkClass::Document => {
                    document_count += 1;
                    state.record_document(DiscoveredLink {
                        url: resolved,
                        anchor_text: clean_anchor_text(&raw.anchor_text),
                        source_page: url.to_string(),
                        depth,
                    });
                }
                LinkClass::InternalNav => {
                    nav_link_count += 1;
                    let link = DiscoveredLink {
                        url: resolved,
                        anchor_text: clean_anchor_text(&raw.anchor_text),
                        source_page: url.to_string(),
                        depth,
                    };
                    state.record_nav_link(link.clone());
                    candidates.push(link);
                }
                LinkClass::ExternalNav => {
                    external_link_count += 1;
                }
            }
        }

        tracing::info!(
            "Found {} document(s), {} nav link(s), {} external on {}",
            document_count,
            nav_link_count,
            external_link_count,
            url
        );

        CrawlOutcome::Success(PageSummary {
            title,
            document_count,
            nav_link_count,
            external_link_count,
            candidates,
        })
    }
}
