use serde::Deserialize;

/// Main configuration structure for docsweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub target: TargetConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    pub output: OutputConfig,
}

/// Discovery crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Maximum depth to crawl from the seed page (inclusive)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of navigation links expanded per depth level
    #[serde(rename = "fan-out-cap", default = "default_fan_out_cap")]
    pub fan_out_cap: usize,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// Registrable domain the crawl must stay on (e.g. "justice.gov";
    /// subdomains are considered in-site)
    pub domain: String,

    /// Seed URL the discovery walk starts from
    pub seed: String,
}

/// HTTP client configuration shared by the page fetcher and the downloader
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total wall-clock budget per request, in seconds
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection establishment budget, in seconds
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

/// Download stage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloaded documents are written to
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,

    /// Page fetched once before the first download to establish session
    /// cookies (interstitial dismissal); omit when the site needs none
    #[serde(rename = "session-url", default)]
    pub session_url: Option<String>,

    /// Files at or below this size are treated as truncated leftovers and
    /// re-downloaded rather than skipped
    #[serde(rename = "min-valid-bytes", default = "default_min_valid_bytes")]
    pub min_valid_bytes: u64,

    /// Maximum number of documents fetched concurrently
    #[serde(rename = "max-concurrent", default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// Courtesy delay before each fetch, in milliseconds
    #[serde(rename = "pacing-ms", default = "default_pacing_ms")]
    pub pacing_ms: u64,
}

/// Persisted-state output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the discovery state JSON document
    #[serde(rename = "state-path")]
    pub state_path: String,

    /// Path of the download manifest JSON document
    #[serde(rename = "manifest-path")]
    pub manifest_path: String,
}

fn default_fan_out_cap() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_dir() -> String {
    "downloads".to_string()
}

fn default_min_valid_bytes() -> u64 {
    1000
}

fn default_max_concurrent() -> usize {
    4
}

fn default_pacing_ms() -> u64 {
    500
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            session_url: None,
            min_valid_bytes: default_min_valid_bytes(),
            max_concurrent: default_max_concurrent(),
            pacing_ms: default_pacing_ms(),
        }
    }
}
