//! TV LUX Archive Core Library
//!
//! This crate scrapes the TV LUX (tvlux.sk) video archive into records a
//! media-center plugin can list and play.
//!
//! # Features
//! - Catalog of archive shows, with an optional configured live stream
//! - Episode pages with media URLs resolved from each detail page
//! - Forward-only pagination across a show's listing pages
//! - Day-first date normalization to ISO-8601
//! - Query-string router for plugin invocations

pub mod client;
pub mod config;
pub mod date;
pub mod error;
pub mod parser;
pub mod router;
pub mod scraper;
pub mod types;

// Re-export main types for convenience
pub use client::{RateLimiter, TvluxClient};
pub use config::{ClientConfig, LiveStream, SiteConfig};
pub use error::{Result, TvluxError};
pub use router::{plugin_url, Route};
pub use scraper::{EpisodePages, TvluxScraper};
pub use types::{CategoryKind, CategoryRecord, EpisodePage, EpisodeRecord};
