//! Storage module for persisted pipeline state
//!
//! Discovery state and download manifests are durable JSON documents.
//! Writes are atomic (temp file + rename) so an interrupt never leaves a
//! half-written document behind; a missing file on load is simply "no
//! prior state".

mod json_store;

pub use json_store::{
    load_discovery_state, load_manifest, save_discovery_state, save_manifest,
};

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed state document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
