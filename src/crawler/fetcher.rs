//! HTTP page fetcher
//!
//! The fetch capability consumed by the crawl frontier: given a URL, return
//! the page markup or a classified failure. Every request runs under the
//! configured wall-clock budget; a hung server surfaces as a timeout error
//! for that page, never as a stalled crawl.

use crate::config::HttpConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors a page fetch can fail with
///
/// Fetch failures are recorded per-page and the crawl continues; none of
/// these abort a session.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {detail}")]
    Network { url: String, detail: String },
}

/// Capability for fetching page markup
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Builds the HTTP client used for page fetching
pub fn build_page_client(http: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(http.user_agent.clone())
        .timeout(Duration::from_secs(http.request_timeout))
        .connect_timeout(Duration::from_secs(http.connect_timeout))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reqwest-backed [`PageFetcher`] implementation
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(http: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_page_client(http)?,
        })
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
        async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| classify_error(url, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            response.text().await.map_err(|e| classify_error(url, e))
        }
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            detail: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_page_client() {
        let client = build_page_client(&HttpConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            url: "https://example.justice.gov/a".to_string(),
            status: 403,
        };
        assert_eq!(err.to_string(), "HTTP 403 for https://example.justice.gov/a");
    }

    // Live fetch behavior is covered by the wiremock integration tests.
}
