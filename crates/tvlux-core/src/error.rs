//! Error types for the TV LUX archive scraper
//!
//! Every stage of the pipeline reports through `TvluxError`. Errors are
//! never recovered inside the pipeline: a failure anywhere aborts the
//! listing being built. TvluxError implements Serialize so a host can
//! receive it as a plain message.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for TV LUX scraper operations
#[derive(Error, Debug)]
pub enum TvluxError {
    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Server answered 404
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Server answered 429 after all retries
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Response body is not valid UTF-8
    #[error("Invalid UTF-8 in response: {0}")]
    Encoding(String),

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Required HTML element was not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// URL could not be made absolute
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Date text did not follow the day-first format
    #[error("Invalid date '{text}': {reason}")]
    DateParse { text: String, reason: String },

    /// Query string had parameters but no `action`
    #[error("Invalid paramstring: {0}!")]
    MissingAction(String),

    /// Query string named an action the router does not know
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// A route was missing one of its required parameters
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl TvluxError {
    /// True for router errors, which indicate an integration mistake
    /// rather than a site or network problem.
    pub fn is_routing(&self) -> bool {
        matches!(
            self,
            TvluxError::MissingAction(_) | TvluxError::UnknownAction(_) | TvluxError::MissingParam(_)
        )
    }
}

/// Serialize TvluxError as its display string
impl Serialize for TvluxError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for TV LUX scraper operations
pub type Result<T> = std::result::Result<T, TvluxError>;
