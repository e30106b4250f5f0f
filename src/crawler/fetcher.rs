//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests for catalog pages
//! - Error classification into `FetchError` kinds

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport-level reasons a page could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {target}")]
    Status { target: String, status: u16 },

    #[error("Request timeout for {target}")]
    Timeout { target: String },

    #[error("Connection failed for {target}: {message}")]
    Connect { target: String, message: String },

    #[error("Empty response body for {target}")]
    EmptyBody { target: String },

    #[error("Transport error for {target}: {message}")]
    Transport { target: String, message: String },
}

/// Performs the network call for one request target
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `target` and returns its body
    ///
    /// An empty body is a failure, not a successful empty page.
    async fn fetch(&self, target: &str) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::UserAgentConfig;
/// use catalog_harvest::crawler::{build_http_client, DEFAULT_TIMEOUT};
///
/// let config = UserAgentConfig {
///     crawler_name: "catalog-harvest".to_string(),
///     crawler_version: "0.1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, DEFAULT_TIMEOUT).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config, timeout)?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn classify(target: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                target: target.to_string(),
            }
        } else if e.is_connect() {
            FetchError::Connect {
                target: target.to_string(),
                message: e.to_string(),
            }
        } else {
            FetchError::Transport {
                target: target.to_string(),
                message: e.to_string(),
            }
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        let result = async {
            let response = self
                .client
                .get(target)
                .send()
                .await
                .map_err(|e| Self::classify(target, e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    target: target.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| Self::classify(target, e))?;

            if body.is_empty() {
                return Err(FetchError::EmptyBody {
                    target: target.to_string(),
                });
            }

            Ok::<_, FetchError>(body)
        }
        .await;

        if let Err(e) = &result {
            tracing::warn!(kind = "TransportFailure", "{}", e);
        }
        result
    }
}
