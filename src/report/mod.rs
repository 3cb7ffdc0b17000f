//! Report rendering for discovery state and download manifests
//!
//! Pure functions from state to text: deterministic, ordered, no I/O and
//! no mutation. The caller decides where the text goes.

use crate::download::{DownloadManifest, DownloadStatus};
use crate::state::DiscoveryState;
use std::fmt::Write;

/// How many documents are listed before the report elides the rest
const DOCUMENT_PREVIEW_LIMIT: usize = 30;

/// How many navigation links are listed
const NAV_PREVIEW_LIMIT: usize = 20;

/// How many failed downloads are listed
const FAILURE_PREVIEW_LIMIT: usize = 10;

/// Renders a summary of a discovery session
pub fn render_discovery_report(state: &DiscoveryState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Discovery Report ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Seed URL: {}", state.seed_url);
    let _ = writeln!(out, "Max depth: {}", state.max_depth);
    let _ = writeln!(out, "Pages visited: {}", state.visited.len());
    let _ = writeln!(out, "Documents found: {}", state.documents.len());
    let _ = writeln!(out, "Navigation links: {}", state.nav_links.len());

    if !state.documents.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Documents:");
        for (i, doc) in state.documents.iter().take(DOCUMENT_PREVIEW_LIMIT).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, doc.url);
            if !doc.anchor_text.is_empty() {
                let _ = writeln!(out, "     Text: {}", doc.anchor_text);
            }
            let _ = writeln!(out, "     Source: {} (depth {})", doc.source_page, doc.depth);
        }
        if state.documents.len() > DOCUMENT_PREVIEW_LIMIT {
            let _ = writeln!(
                out,
                "  ... and {} more",
                state.documents.len() - DOCUMENT_PREVIEW_LIMIT
            );
        }
    }

    if !state.nav_links.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Navigation links:");
        for (i, link) in state.nav_links.iter().take(NAV_PREVIEW_LIMIT).enumerate() {
            let text = if link.anchor_text.is_empty() {
                "(no text)"
            } else {
                &link.anchor_text
            };
            let _ = writeln!(out, "  {}. {} - {}", i + 1, text, link.url);
        }
        if state.nav_links.len() > NAV_PREVIEW_LIMIT {
            let _ = writeln!(
                out,
                "  ... and {} more",
                state.nav_links.len() - NAV_PREVIEW_LIMIT
            );
        }
    }

    out
}

/// Renders a summary of a download batch
pub fn render_download_report(manifest: &DownloadManifest) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Download Report ===");
    let _ = writeln!(out);
    let _ = writeln!(out, "Records: {}", manifest.records.len());
    let _ = writeln!(out, "Downloaded: {}", manifest.downloaded_count());
    let _ = writeln!(out, "Already present: {}", manifest.already_present_count());
    let _ = writeln!(out, "Failed: {}", manifest.failed_count());

    let total_bytes = manifest.total_bytes();
    let _ = writeln!(
        out,
        "Total size: {} bytes ({:.2} MB)",
        total_bytes,
        total_bytes as f64 / 1024.0 / 1024.0
    );

    let failures: Vec<_> = manifest
        .records
        .iter()
        .filter(|r| r.status == DownloadStatus::Failed)
        .collect();

    if !failures.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Failed downloads:");
        for record in failures.iter().take(FAILURE_PREVIEW_LIMIT) {
            let _ = writeln!(
                out,
                "  - {}: {}",
                record.filename,
                record.error_detail.as_deref().unwrap_or("unknown error")
            );
        }
        if failures.len() > FAILURE_PREVIEW_LIMIT {
            let _ = writeln!(out, "  ... and {} more", failures.len() - FAILURE_PREVIEW_LIMIT);
        }
    }

    out
}

/// Renders pipeline status with a suggested next action
///
/// The suggestion depends only on which persisted documents exist:
/// no state yet, state but no downloads, or both.
pub fn render_status(
    state: Option<&DiscoveryState>,
    manifest: Option<&DownloadManifest>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Pipeline Status ===");
    let _ = writeln!(out);

    match (state, manifest) {
        (None, _) => {
            let _ = writeln!(out, "No discovery state found.");
            let _ = writeln!(out, "Next: run discovery with --discover");
        }
        (Some(state), None) => {
            let _ = writeln!(
                out,
                "Discovery done: {} document(s) found across {} page(s).",
                state.documents.len(),
                state.visited.len()
            );
            let _ = writeln!(out, "Next: run downloads with --download");
        }
        (Some(state), Some(manifest)) => {
            let _ = writeln!(
                out,
                "Discovery done: {} document(s) found across {} page(s).",
                state.documents.len(),
                state.visited.len()
            );
            let _ = writeln!(
                out,
                "Downloads: {} on disk, {} failed.",
                manifest.downloaded_count() + manifest.already_present_count(),
                manifest.failed_count()
            );
            if manifest.failed_count() > 0 {
                let _ = writeln!(out, "Next: re-run --download to retry failures");
            } else {
                let _ = writeln!(out, "Next: files are ready to post-process");
            }
        }
    }

    out
}
