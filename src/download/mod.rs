//! Download module: turn discovered document URLs into files on disk
//!
//! The orchestrator drives a [`Downloader`] capability over a list of URLs,
//! skipping documents that are already on disk, verifying payloads before
//! writing, and producing a [`DownloadManifest`] with exactly one record
//! per distinct URL.

mod client;
mod filename;
mod manifest;
mod orchestrator;

pub use client::HttpDownloader;
pub use filename::derive_filename;
pub use manifest::{DownloadManifest, DownloadRecord, DownloadStatus};
pub use orchestrator::DownloadOrchestrator;

use std::future::Future;
use thiserror::Error;

/// Errors a document fetch can fail with
///
/// These are never fatal to a batch: the orchestrator folds them into
/// `failed` manifest records and moves on.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {detail}")]
    Network { url: String, detail: String },

    #[error("session establishment failed: {detail}")]
    Session { detail: String },
}

/// Capability for fetching a document's raw bytes
///
/// Implementations may need to establish a session (cookies, interstitial
/// dismissal) before the first fetch; that step's success or failure
/// surfaces only through [`DownloadError`].
pub trait Downloader {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, DownloadError>> + Send;
}
