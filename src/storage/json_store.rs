//! JSON-file persistence for discovery state and download manifests

use crate::download::DownloadManifest;
use crate::state::DiscoveryState;
use crate::storage::{StorageError, StorageResult};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Saves discovery state to the given path, refreshing its timestamp
///
/// This is the per-page checkpoint: the crawl driver calls it after every
/// page so an interrupted session can resume from the last completed page.
pub fn save_discovery_state(state: &mut DiscoveryState, path: &Path) -> StorageResult<()> {
    state.generated_at = Utc::now();
    write_atomic(state, path)
}

/// Loads discovery state from the given path
///
/// Returns `Ok(None)` when no state file exists. A file that exists but
/// fails to parse is an error; callers treat it as "no prior state" after
/// logging, never as a crash.
pub fn load_discovery_state(path: &Path) -> StorageResult<Option<DiscoveryState>> {
    read_optional(path)
}

/// Saves a download manifest to the given path, refreshing its timestamp
pub fn save_manifest(manifest: &mut DownloadManifest, path: &Path) -> StorageResult<()> {
    manifest.generated_at = Utc::now();
    write_atomic(manifest, path)
}

/// Loads a download manifest from the given path, `Ok(None)` when absent
pub fn load_manifest(path: &Path) -> StorageResult<Option<DownloadManifest>> {
    read_optional(path)
}

/// Serializes a value to `path` via a temp file in the same directory
///
/// The rename is what makes the checkpoint atomic: readers only ever see
/// the previous complete document or the new complete document.
fn write_atomic<T: Serialize>(value: &T, path: &Path) -> StorageResult<()> {
    let json = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, &json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn read_optional<T: DeserializeOwned>(path: &Path) -> StorageResult<Option<T>> {
    let content = match std::fs::read(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::Io(e)),
    };
    Ok(Some(serde_json::from_slice(&content)?))
}
