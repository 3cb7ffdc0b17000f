//! State module for tracking discovery progress
//!
//! The discovery state is the persisted record of everything the crawl has
//! learned: visited URLs, discovered documents, and same-site navigation
//! links. It is mutated only by the crawl frontier and flows read-only into
//! the download stage and the reporter.

mod discovery;

pub use discovery::{clean_anchor_text, DiscoveredLink, DiscoveryState, ANCHOR_TEXT_MAX};
