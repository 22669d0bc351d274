//! Configuration for the TV LUX scraper
//!
//! Everything has a working default, so a config file is only needed to
//! point at a different site, tune the HTTP client or add a live stream.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TvluxError};

/// Archive index listing every show alphabetically
pub const DEFAULT_INDEX_URL: &str = "https://www.tvlux.sk/archiv/abecedne/vsetko";

/// Desktop browser identity; the site rejects default client user agents
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:129.0) Gecko/20100101 Firefox/129.0";

/// Slowest accepted request rate: one request every 1000 seconds
pub const MIN_REQUESTS_PER_SECOND: f64 = 0.001;

/// Configuration for the HTTP client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Request rate cap, `None` for no throttling (default)
    pub requests_per_second: Option<f64>,
    /// Retries for 429/5xx answers (default: 0)
    pub max_retries: u32,
    /// Base delay for exponential backoff in milliseconds (default: 1000)
    pub base_retry_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            requests_per_second: None,
            max_retries: 0,
            base_retry_delay_ms: 1000,
        }
    }
}

/// Static live-stream entry shown ahead of the scraped categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveStream {
    pub title: String,
    /// Playable manifest address
    pub url: String,
    #[serde(default)]
    pub image: String,
}

/// Top-level configuration, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Archive index page the catalog is built from
    pub index_url: String,
    /// Detail pages fetched at once while building a listing (1 = sequential)
    pub detail_concurrency: usize,
    pub live_stream: Option<LiveStream>,
    pub client: ClientConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            detail_concurrency: 4,
            live_stream: None,
            client: ClientConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a TOML document; missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(text).map_err(|e| TvluxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TvluxError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.detail_concurrency == 0 {
            return Err(TvluxError::Config(
                "detail_concurrency must be at least 1".to_string(),
            ));
        }
        if let Some(rps) = self.client.requests_per_second {
            if rps.is_nan() || rps < MIN_REQUESTS_PER_SECOND {
                return Err(TvluxError::Config(format!(
                    "client.requests_per_second must be at least {}",
                    MIN_REQUESTS_PER_SECOND
                )));
            }
        }
        url::Url::parse(&self.index_url)
            .map_err(|e| TvluxError::Config(format!("index_url: {}", e)))?;
        if let Some(live) = &self.live_stream {
            url::Url::parse(&live.url)
                .map_err(|e| TvluxError::Config(format!("live_stream.url: {}", e)))?;
            if !live.image.is_empty() {
                url::Url::parse(&live.image)
                    .map_err(|e| TvluxError::Config(format!("live_stream.image: {}", e)))?;
            }
        }
        Ok(())
    }
}
