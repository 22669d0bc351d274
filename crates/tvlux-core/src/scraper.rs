//! Main TV LUX scraper API
//!
//! Combines the fetcher with the parsers: the catalog of shows, one page
//! of episodes for a show, and a forward-only cursor across listing pages.
//! Nothing is cached; every call goes to the network.

use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::client::TvluxClient;
use crate::config::SiteConfig;
use crate::date::normalize_date;
use crate::error::Result;
use crate::parser::{live_category, parse_categories, parse_detail, parse_listing, ListingPage, Page};
use crate::types::{CategoryRecord, EpisodeCard, EpisodeDetail, EpisodePage, EpisodeRecord};

/// Main scraper API for tvlux.sk
///
/// # Example
/// ```no_run
/// use tvlux_core::TvluxScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = TvluxScraper::new()?;
///
///     for category in scraper.list_categories().await? {
///         println!("{} -> {}", category.title, category.detail_url);
///     }
///
///     Ok(())
/// }
/// ```
pub struct TvluxScraper {
    client: TvluxClient,
    config: SiteConfig,
}

impl TvluxScraper {
    /// Create a new scraper with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(SiteConfig::default())
    }

    /// Create a scraper from a full site configuration.
    pub fn with_config(config: SiteConfig) -> Result<Self> {
        let client = TvluxClient::with_config(config.client.clone())?;
        Ok(Self { client, config })
    }

    /// List every show on the archive index.
    ///
    /// The index is fetched on each call. A configured live stream is
    /// returned first, followed by the scraped shows in document order.
    ///
    /// # Errors
    /// Any fetch, decoding or missing-field error aborts the listing.
    pub async fn list_categories(&self) -> Result<Vec<CategoryRecord>> {
        let index_url = self.config.index_url.as_str();
        let bytes = self.client.fetch(index_url).await?;
        let scraped = build_catalog(&bytes, index_url)?;

        let mut categories = Vec::with_capacity(scraped.len() + 1);
        if let Some(live) = &self.config.live_stream {
            categories.push(live_category(live));
        }
        categories.extend(scraped);

        info!(count = categories.len(), url = index_url, "built catalog");
        Ok(categories)
    }

    /// Build one page of episodes for a show.
    ///
    /// Costs one fetch for the listing plus one per episode card. Detail
    /// pages are fetched `detail_concurrency` at a time; episodes come back
    /// in card order regardless.
    ///
    /// # Errors
    /// The first failing card aborts the page; no partial results are
    /// returned.
    pub async fn list_episodes(&self, listing_url: &str) -> Result<EpisodePage> {
        let bytes = self.client.fetch(listing_url).await?;
        let listing = build_listing(&bytes, listing_url)?;
        debug!(cards = listing.cards.len(), url = listing_url, "parsed listing");

        let episodes = stream::iter(listing.cards.into_iter().map(|card| self.resolve_episode(card)))
            .buffered(self.config.detail_concurrency.max(1))
            .try_collect::<Vec<_>>()
            .await?;

        info!(
            count = episodes.len(),
            url = listing_url,
            has_next = listing.next_page.is_some(),
            "built episode page"
        );
        Ok(EpisodePage {
            episodes,
            next_page: listing.next_page,
        })
    }

    /// Forward-only cursor over a show's listing pages, starting at `listing_url`.
    pub fn episode_pages(&self, listing_url: &str) -> EpisodePages<'_> {
        EpisodePages {
            scraper: self,
            next: Some(listing_url.to_string()),
            visited: HashSet::new(),
        }
    }

    async fn resolve_episode(&self, card: EpisodeCard) -> Result<EpisodeRecord> {
        let premiered = card.date_text.as_deref().map(normalize_date).transpose()?;

        let bytes = self.client.fetch(&card.detail_url).await?;
        let detail = build_detail(&bytes, &card.detail_url)?;

        Ok(EpisodeRecord {
            title: card.title,
            playable_url: detail.playable_url,
            image_url: card.image_url,
            description: detail.description,
            premiered,
        })
    }
}

fn build_catalog(bytes: &[u8], url: &str) -> Result<Vec<CategoryRecord>> {
    parse_categories(&Page::from_bytes(bytes, url)?)
}

fn build_listing(bytes: &[u8], url: &str) -> Result<ListingPage> {
    parse_listing(&Page::from_bytes(bytes, url)?)
}

fn build_detail(bytes: &[u8], url: &str) -> Result<EpisodeDetail> {
    parse_detail(&Page::from_bytes(bytes, url)?)
}

/// Lazy sequence of listing pages
///
/// Each `next_page` call fetches exactly one page; nothing is fetched
/// ahead. The cursor ends when a page has no next link, when the next link
/// points at a page already visited, or after an error.
pub struct EpisodePages<'a> {
    scraper: &'a TvluxScraper,
    next: Option<String>,
    visited: HashSet<String>,
}

impl EpisodePages<'_> {
    /// URL the next call will fetch, if any.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Fetch the next listing page.
    ///
    /// Returns `None` once the sequence is exhausted.
    pub async fn next_page(&mut self) -> Option<Result<EpisodePage>> {
        let url = self.next.take()?;
        self.visited.insert(url.clone());

        match self.scraper.list_episodes(&url).await {
            Ok(page) => {
                self.next = page
                    .next_page
                    .clone()
                    .filter(|next| !self.visited.contains(next));
                if self.next.is_none() && page.next_page.is_some() {
                    debug!(url = %url, "next page already visited, stopping");
                }
                Some(Ok(page))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
