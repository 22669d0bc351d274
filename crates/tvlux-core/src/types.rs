//! Data types for the TV LUX archive scraper
//!
//! Records are built once and handed to the host as-is. All types implement
//! Serialize and Deserialize so a host bridge can pass them around as JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a category entry leads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// Scraped archive show; `detail_url` is a listing page
    Archive,
    /// Configured live stream; `detail_url` is the playable manifest
    Live,
}

/// One show on the archive index page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Show title
    pub title: String,
    /// Absolute URL of the show's listing page (or stream for `Live`)
    pub detail_url: String,
    /// Absolute URL of the show's poster
    pub image_url: String,
    /// Genre label shown on the card, empty when the card has none
    pub genre_tag: String,
    pub kind: CategoryKind,
}

/// A playable episode from a listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Episode title
    pub title: String,
    /// Absolute media URL taken from the detail page
    pub playable_url: String,
    /// Absolute thumbnail URL
    pub image_url: String,
    /// First paragraph of the detail page
    pub description: String,
    /// Broadcast date, serialized as `YYYY-MM-DD`
    pub premiered: Option<NaiveDate>,
}

impl EpisodeRecord {
    /// Premiere date in ISO-8601 form
    pub fn premiered_iso(&self) -> Option<String> {
        self.premiered.map(|d| d.format("%Y-%m-%d").to_string())
    }
}

/// One listing page worth of episodes plus the pagination cursor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodePage {
    /// Episodes in document order
    pub episodes: Vec<EpisodeRecord>,
    /// Absolute URL of the next listing page, `None` on the last page
    pub next_page: Option<String>,
}

/// Episode card as it appears on a listing page, before the detail fetch
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeCard {
    pub title: String,
    pub detail_url: String,
    pub image_url: String,
    /// Raw text of the date tag, if the card has one
    pub date_text: Option<String>,
}

/// What an episode detail page contributes to the record
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeDetail {
    pub playable_url: String,
    pub description: String,
}
