//! HTTP client for crawling with rate limiting and error handling
//!
//! Wraps a single reqwest client behind a direct (not-keyed) rate limiter so
//! all outbound calls of one crawl share the same requests-per-second quota.
//! No retry logic lives here: a transport failure or non-success status
//! propagates immediately to the caller.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, direct::NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

use crate::domain::constants;

/// HTTP client configuration for crawling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: constants::USER_AGENT.to_string(),
            timeout_seconds: 30,
            max_requests_per_second: 3,
        }
    }
}

/// Rate-limited HTTP client shared by page discovery and the search API.
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .cookie_store(true)
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second)
                .context("Rate limit must be greater than 0")?,
        );

        Ok(Self {
            client,
            rate_limiter: RateLimiter::direct(quota),
        })
    }

    /// Fetch a URL and return the response body as text.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;
        debug!("HTTP GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch URL: {url}"))?;
        let response = Self::require_success(response, url)?;

        response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from: {url}"))
    }

    /// POST a JSON body and parse the response as JSON. Extra headers are
    /// applied on top of the client defaults.
    pub async fn post_json(&self, url: &str, headers: HeaderMap, body: &Value) -> Result<Value> {
        self.rate_limiter.until_ready().await;
        debug!("HTTP POST {}", url);

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST request failed: {url}"))?;
        let response = Self::require_success(response, url)?;

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from: {url}"))
    }

    fn require_success(response: Response, url: &str) -> Result<Response> {
        if !response.status().is_success() {
            anyhow::bail!(
                "HTTP request failed with status {}: {}",
                response.status(),
                url
            );
        }
        Ok(response)
    }
}
