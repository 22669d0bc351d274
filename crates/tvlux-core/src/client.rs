//! HTTP fetcher for tvlux.sk
//!
//! Wraps a single reusable `reqwest::Client` that always identifies as a
//! desktop browser. Optionally throttles requests and retries transient
//! failures; both are off by default.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::{ClientConfig, MIN_REQUESTS_PER_SECOND};
use crate::error::{Result, TvluxError};

/// Accept-Language header for Slovak content
const DEFAULT_ACCEPT_LANGUAGE: &str = "sk-SK,sk;q=0.9,en;q=0.8";

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// Rates below `MIN_REQUESTS_PER_SECOND` are raised to it.
    ///
    /// # Example
    /// ```
    /// use tvlux_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0); // 2 requests per second
    /// ```
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = Duration::from_secs_f64(1.0 / requests_per_second.max(MIN_REQUESTS_PER_SECOND));
        let now = Instant::now();
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(now.checked_sub(min_interval).unwrap_or(now))),
        }
    }

    /// Wait until the next request is allowed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// HTTP client for tvlux.sk pages
///
/// Status codes are checked: a 404 or 500 page is never handed to the
/// parser as if it were a listing.
pub struct TvluxClient {
    client: reqwest::Client,
    rate_limiter: Option<RateLimiter>,
    max_retries: u32,
    base_retry_delay: Duration,
}

impl TvluxClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT_LANGUAGE,
                    reqwest::header::HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            rate_limiter: config.requests_per_second.map(RateLimiter::new),
            max_retries: config.max_retries,
            base_retry_delay: Duration::from_millis(config.base_retry_delay_ms),
        })
    }

    /// Fetch the raw body of an absolute URL.
    ///
    /// # Errors
    /// - `TvluxError::Http` - Network failure
    /// - `TvluxError::PageNotFound` - Server returned 404
    /// - `TvluxError::RateLimited` - Server returned 429 after all retries
    /// - `TvluxError::HttpStatus` - Any other non-success status
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.fetch_with_retry(url, 0).await
    }

    fn fetch_with_retry<'a>(
        &'a self,
        url: &'a str,
        attempt: u32,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(limiter) = &self.rate_limiter {
                limiter.acquire().await;
            }

            debug!(url, attempt, "GET");
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status.is_success() {
                let body = response.bytes().await?;
                debug!(url, bytes = body.len(), "fetched");
                return Ok(body.to_vec());
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(TvluxError::PageNotFound(url.to_string()));
            }

            let transient =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if transient && attempt < self.max_retries {
                let delay = self.backoff_delay(attempt);
                warn!(url, status = status.as_u16(), ?delay, "retrying");
                sleep(delay).await;
                return self.fetch_with_retry(url, attempt + 1).await;
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(TvluxError::RateLimited);
            }

            Err(TvluxError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            })
        })
    }

    /// Exponential backoff: base, 2*base, 4*base, ... saturating at `Duration::MAX`
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_retry_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}
