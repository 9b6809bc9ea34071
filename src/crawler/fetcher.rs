//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent
//! - GET requests for listing and biography pages
//! - Mapping transport failures and non-success statuses to `HarvestError`
//!
//! There is no retry logic. Any failure here aborts the crawl.

use crate::config::UserAgentConfig;
use crate::HarvestError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Capability to turn a URL into page markup
///
/// The pagination driver and the biography resolver depend only on this
/// trait, so tests can substitute an in-memory site.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the body of the page at `url`
    async fn fetch(&self, url: &str) -> Result<String, HarvestError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the user agent configuration
    pub fn new(config: &UserAgentConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, HarvestError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| HarvestError::Http {
            url: url.to_string(),
            source,
        })
    }
}
