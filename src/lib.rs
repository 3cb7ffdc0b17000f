//! Docsweep: a linked-document discovery and retrieval tool
//!
//! This crate crawls a seed web page, follows same-site navigation links up
//! to a bounded depth, records every PDF document it encounters, and then
//! downloads each discovered document exactly once with verification and
//! resume support.

pub mod config;
pub mod crawler;
pub mod download;
pub mod report;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for docsweep operations
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crawler::FetchError),

    #[error("Download error: {0}")]
    Download(#[from] download::DownloadError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// These are the only fatal errors in the pipeline: everything else is
/// captured per-item and carried as data in the crawl state or the
/// download manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for docsweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::download::{DownloadManifest, DownloadRecord, DownloadStatus};
pub use crate::state::{DiscoveredLink, DiscoveryState};
pub use crate::url::{classify_href, ClassifiedLink, LinkClass};
