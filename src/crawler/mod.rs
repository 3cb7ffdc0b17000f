//! Crawler module: page fetching, link extraction, and frontier expansion
//!
//! The frontier expands one page per call under the session's depth and
//! visited-set invariants; the driver walks it breadth-first from the seed,
//! consulting a selection policy between depth levels.

mod challenge;
mod driver;
mod extractor;
mod fetcher;
mod frontier;

pub use challenge::ChallengeDetector;
pub use driver::{run_discovery, DiscoveryRun, FanOutPolicy, SelectionPolicy};
pub use extractor::{extract_title, HtmlLinkExtractor, LinkExtractor, RawLink};
pub use fetcher::{build_page_client, FetchError, HttpPageFetcher, PageFetcher};
pub use frontier::{CrawlFrontier, CrawlOutcome, PageSummary, SkipReason};
