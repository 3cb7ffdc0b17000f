//! Download orchestration
//!
//! Drives the [`Downloader`] capability over a list of document URLs with a
//! bounded worker pool. Each distinct URL yields exactly one manifest
//! record; records are buffered per input slot and emitted in input order
//! so concurrent runs produce reproducible manifests.

use crate::config::DownloadConfig;
use crate::download::{
    derive_filename, DownloadManifest, DownloadRecord, DownloadStatus, Downloader,
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Magic bytes every accepted payload must start with
const PDF_MAGIC: &[u8] = b"%PDF";

/// Orchestrates document downloads with idempotent-skip and verification
pub struct DownloadOrchestrator<D> {
    downloader: Arc<D>,
    output_dir: PathBuf,
    min_valid_bytes: u64,
    max_concurrent: usize,
    pacing: Duration,
}

impl<D: Downloader + Send + Sync + 'static> DownloadOrchestrator<D> {
    /// Creates an orchestrator from download-stage configuration
    pub fn new(downloader: D, config: &DownloadConfig) -> Self {
        Self {
            downloader: Arc::new(downloader),
            output_dir: PathBuf::from(&config.output_dir),
            min_valid_bytes: config.min_valid_bytes,
            max_concurrent: config.max_concurrent,
            pacing: Duration::from_millis(config.pacing_ms),
        }
    }

    /// Downloads every URL in the list exactly once
    ///
    /// The input is deduplicated by URL (first occurrence wins). For each
    /// distinct URL:
    /// - a plausible file already on disk yields `already_exists`, no fetch
    /// - a fetched payload is verified against the PDF signature before it
    ///   is written; a bad payload yields `failed` and no file
    /// - fetch errors yield `failed`; the batch always continues
    ///
    /// A cancel signal observed before a queued download starts drops that
    /// URL from the manifest; completed records are kept. Re-invoking with
    /// the same list converges: prior successes are skipped on disk.
    pub async fn download_all(
        &self,
        urls: &[String],
        cancel: Arc<AtomicBool>,
    ) -> crate::Result<DownloadManifest> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        // Dedup by URL, first occurrence wins; slot = position in the
        // deduplicated list, which is the manifest order.
        let mut seen = HashSet::new();
        let jobs: Vec<(String, String)> = urls
            .iter()
            .filter(|url| seen.insert(url.as_str()))
            .enumerate()
            .map(|(i, url)| (url.clone(), derive_filename(url, i)))
            .collect();

        let total = jobs.len();
        tracing::info!("Processing {} document(s)", total);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut join_set = JoinSet::new();

        for (slot, (url, filename)) in jobs.into_iter().enumerate() {
            let downloader = Arc::clone(&self.downloader);
            let semaphore = Arc::clone(&semaphore);
            let cancel = Arc::clone(&cancel);
            let path = self.output_dir.join(&filename);
            let min_valid_bytes = self.min_valid_bytes;
            let pacing = self.pacing;

            join_set.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                if cancel.load(Ordering::Relaxed) {
                    tracing::debug!("cancelled before starting {}", url);
                    return None;
                }

                let record = process_one(
                    downloader.as_ref(),
                    &url,
                    &filename,
                    &path,
                    min_valid_bytes,
                    pacing,
                    slot,
                    total,
                )
                .await;
                Some((slot, record))
            });
        }

        let mut slots: Vec<Option<DownloadRecord>> = vec![None; total];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(Some((slot, record))) => slots[slot] = Some(record),
                Ok(None) => {}
                Err(e) => tracing::error!("Download worker failed: {}", e),
            }
        }

        let mut manifest = DownloadManifest::new();
        for record in slots.into_iter().flatten() {
            manifest.push(record);
        }

        tracing::info!(
            "Download batch done: {} downloaded, {} already present, {} failed",
            manifest.downloaded_count(),
            manifest.already_present_count(),
            manifest.failed_count()
        );

        Ok(manifest)
    }
}

/// Processes a single document URL into its manifest record
#[allow(clippy::too_many_arguments)]
async fn process_one<D: Downloader>(
    downloader: &D,
    url: &str,
    filename: &str,
    path: &Path,
    min_valid_bytes: u64,
    pacing: Duration,
    slot: usize,
    total: usize,
) -> DownloadRecord {
    // Idempotent skip: a file above the plausibility threshold is a
    // completed prior download. Smaller files are truncated leftovers and
    // get re-fetched.
    if let Ok(meta) = tokio::fs::metadata(path).await {
        if meta.is_file() && meta.len() > min_valid_bytes {
            tracing::info!("[{}/{}] {} (exists)", slot + 1, total, filename);
            return DownloadRecord {
                url: url.to_string(),
                filename: filename.to_string(),
                status: DownloadStatus::AlreadyExists,
                size_bytes: Some(meta.len()),
                error_detail: None,
            };
        }
    }

    if !pacing.is_zero() {
        tokio::time::sleep(pacing).await;
    }

    tracing::info!("[{}/{}] {}", slot + 1, total, filename);

    let payload = match downloader.fetch(url).await {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("[{}/{}] {} failed: {}", slot + 1, total, filename, e);
            return failed_record(url, filename, e.to_string());
        }
    };

    // Verification gate: unverified bytes are never written to the output
    // path, so a bad payload cannot poison the exists-check of a later run.
    if !payload.starts_with(PDF_MAGIC) {
        let detail = "invalid payload: expected PDF signature (%PDF)".to_string();
        tracing::warn!("[{}/{}] {} failed: {}", slot + 1, total, filename, detail);
        return failed_record(url, filename, detail);
    }

    if let Err(e) = tokio::fs::write(path, &payload).await {
        return failed_record(url, filename, format!("write failed: {}", e));
    }

    DownloadRecord {
        url: url.to_string(),
        filename: filename.to_string(),
        status: DownloadStatus::Downloaded,
        size_bytes: Some(payload.len() as u64),
        error_detail: None,
    }
}

fn failed_record(url: &str, filename: &str, detail: String) -> DownloadRecord {
    DownloadRecord {
        url: url.to_string(),
        filename: filename.to_string(),
        status: DownloadStatus::Failed,
        size_bytes: None,
        error_detail: Some(detail),
    }
}
