use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of processing one document URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// A plausible file was already on disk; nothing was fetched
    AlreadyExists,
    /// Fetched, verified, and written this run
    Downloaded,
    /// Fetch or verification failed; `error_detail` says why
    Failed,
}

impl DownloadStatus {
    /// Returns true if the document is on disk after this record
    pub fn is_success(&self) -> bool {
        matches!(self, Self::AlreadyExists | Self::Downloaded)
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AlreadyExists => "already_exists",
            Self::Downloaded => "downloaded",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// One processed document URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRecord {
    pub url: String,

    /// Output filename, derived deterministically from the URL
    pub filename: String,

    pub status: DownloadStatus,

    /// Present unless the download failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,

    /// Present when the download failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

/// The ordered, durable log of one download batch
///
/// Records appear in input order, at most one per distinct URL. All
/// counters are folds over `records`; nothing is stored twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadManifest {
    /// Refreshed on save
    pub generated_at: DateTime<Utc>,

    pub records: Vec<DownloadRecord>,
}

impl DownloadManifest {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: DownloadRecord) {
        self.records.push(record);
    }

    /// Number of documents fetched and written this run
    pub fn downloaded_count(&self) -> usize {
        self.count(DownloadStatus::Downloaded)
    }

    /// Number of documents already present on disk
    pub fn already_present_count(&self) -> usize {
        self.count(DownloadStatus::AlreadyExists)
    }

    /// Number of documents that failed
    pub fn failed_count(&self) -> usize {
        self.count(DownloadStatus::Failed)
    }

    /// Total bytes on disk across successful records
    pub fn total_bytes(&self) -> u64 {
        self.records
            .iter()
            .filter(|r| r.status.is_success())
            .filter_map(|r| r.size_bytes)
            .sum()
    }

    /// True when every processed URL failed (and at least one was processed)
    pub fn is_complete_failure(&self) -> bool {
        !self.records.is_empty() && self.failed_count() == self.records.len()
    }

    /// URLs of failed records, in manifest order
    ///
    /// Re-running the download stage with these converges: records that
    /// succeeded before are skipped by the idempotence check.
    pub fn failed_urls(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|r| r.status == DownloadStatus::Failed)
            .map(|r| r.url.clone())
            .collect()
    }

    fn count(&self, status: DownloadStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }
}

impl Default for DownloadManifest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, status: DownloadStatus, size: Option<u64>) -> DownloadRecord {
        DownloadRecord {
            url: url.to_string(),
            filename: "x.pdf".to_string(),
            status,
            size_bytes: size,
            error_detail: match status {
                DownloadStatus::Failed => Some("HTTP 404".to_string()),
                _ => None,
            },
        }
    }

    #[test]
    fn test_counters_are_folds_over_records() {
        let mut manifest = DownloadManifest::new();
        manifest.push(record("https://a/1.pdf", DownloadStatus::Downloaded, Some(100)));
        manifest.push(record("https://a/2.pdf", DownloadStatus::AlreadyExists, Some(50)));
        manifest.push(record("https://a/3.pdf", DownloadStatus::Failed, None));

        assert_eq!(manifest.downloaded_count(), 1);
        assert_eq!(manifest.already_present_count(), 1);
        assert_eq!(manifest.failed_count(), 1);
        assert_eq!(manifest.total_bytes(), 150);
    }

    #[test]
    fn test_complete_failure() {
        let mut manifest = DownloadManifest::new();
        assert!(!manifest.is_complete_failure());

        manifest.push(record("https://a/1.pdf", DownloadStatus::Failed, None));
        assert!(manifest.is_complete_failure());

        manifest.push(record("https://a/2.pdf", DownloadStatus::Downloaded, Some(9)));
        assert!(!manifest.is_complete_failure());
    }

    #[test]
    fn test_failed_urls() {
        let mut manifest = DownloadManifest::new();
        manifest.push(record("https://a/1.pdf", DownloadStatus::Downloaded, Some(9)));
        manifest.push(record("https://a/2.pdf", DownloadStatus::Failed, None));
        assert_eq!(manifest.failed_urls(), vec!["https://a/2.pdf".to_string()]);
    }

    #[test]
    fn test_record_serialization_shape() {
        let json = serde_json::to_string(&record(
            "https://a/1.pdf",
            DownloadStatus::AlreadyExists,
            Some(2048),
        ))
        .unwrap();

        assert!(json.contains("\"already_exists\""));
        assert!(json.contains("\"sizeBytes\":2048"));
        // Absent optionals are omitted entirely
        assert!(!json.contains("errorDetail"));
    }

    #[test]
    fn test_failed_record_serialization_shape() {
        let json =
            serde_json::to_string(&record("https://a/1.pdf", DownloadStatus::Failed, None)).unwrap();
        assert!(json.contains("\"failed\""));
        assert!(json.contains("\"errorDetail\""));
        assert!(!json.contains("sizeBytes"));
    }
}
