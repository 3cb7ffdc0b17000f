//! Configuration module for docsweep
//!
//! Loads the TOML configuration file, validates it before any crawling or
//! downloading starts, and hashes its content for resume-detection.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, CrawlConfig, DownloadConfig, HttpConfig, OutputConfig, TargetConfig};
