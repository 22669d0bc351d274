//! Route dispatch into host calls

use anyhow::{Context, Result};
use tracing::{error, info};

use tvlux_core::{plugin_url, CategoryKind, CategoryRecord, EpisodeRecord, Route, TvluxScraper};

use crate::host::{Art, Host, ListItem, SortMethod, SpecialSort};

/// Label of the trailing entry that opens the next listing page
pub const NEXT_PAGE_LABEL: &str = "Ďalšia strana »";

/// One plugin invocation: a scraper, a host and the plugin's own base URL
pub struct Plugin<H: Host> {
    base_url: String,
    scraper: TvluxScraper,
    host: H,
}

impl<H: Host> Plugin<H> {
    pub fn new(base_url: impl Into<String>, scraper: TvluxScraper, host: H) -> Self {
        Self {
            base_url: base_url.into(),
            scraper,
            host,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Route the invocation query string and dispatch it.
    pub async fn run(&mut self, query: &str) -> Result<()> {
        let route = Route::from_query(query).with_context(|| format!("routing {:?}", query))?;
        self.dispatch(route).await
    }

    /// Perform one route.
    ///
    /// Directory routes end the directory exactly once: successfully after
    /// all entries, or unsuccessfully when building the listing failed.
    pub async fn dispatch(&mut self, route: Route) -> Result<()> {
        info!(?route, "dispatch");
        let result = match &route {
            Route::Categories => self.list_categories().await,
            Route::Listing { category, url } => self.list_videos(category, url).await,
            Route::Play { video } => return self.play_video(video),
        };

        if let Err(err) = &result {
            error!(error = %err, "listing failed");
            self.host.end_of_directory(false)?;
        }
        result
    }

    async fn list_categories(&mut self) -> Result<()> {
        self.host.set_category("Videos")?;
        self.host.set_content("videos")?;

        let categories = self.scraper.list_categories().await?;
        for category in &categories {
            let (url, item, is_folder) = self.category_entry(category);
            self.host.add_item(&url, &item, is_folder)?;
        }

        self.host.add_sort_method(SortMethod::LabelIgnoreThe)?;
        self.host.end_of_directory(true)?;
        Ok(())
    }

    async fn list_videos(&mut self, category: &str, listing_url: &str) -> Result<()> {
        self.host.set_category(category)?;
        self.host.set_content("videos")?;

        let page = self.scraper.list_episodes(listing_url).await?;
        for episode in &page.episodes {
            let (url, item) = self.episode_entry(episode);
            self.host.add_item(&url, &item, false)?;
        }

        if let Some(next) = &page.next_page {
            let route = Route::Listing {
                category: category.to_string(),
                url: next.clone(),
            };
            let mut item = ListItem::new(NEXT_PAGE_LABEL);
            item.special_sort = Some(SpecialSort::Bottom);
            self.host.add_item(&plugin_url(&self.base_url, &route), &item, true)?;
        }

        self.host.add_sort_method(SortMethod::LabelIgnoreThe)?;
        self.host.end_of_directory(true)?;
        Ok(())
    }

    fn play_video(&mut self, path: &str) -> Result<()> {
        self.host.set_resolved_url(true, &ListItem::resolved(path))?;
        Ok(())
    }

    fn category_entry(&self, category: &CategoryRecord) -> (String, ListItem, bool) {
        let mut item = ListItem::new(&category.title);
        item.art = Art::single(&category.image_url);
        if !category.genre_tag.is_empty() {
            item.info.genre = Some(category.genre_tag.clone());
        }

        match category.kind {
            CategoryKind::Archive => {
                let route = Route::Listing {
                    category: category.title.clone(),
                    url: category.detail_url.clone(),
                };
                (plugin_url(&self.base_url, &route), item, true)
            }
            CategoryKind::Live => {
                item.playable = true;
                let route = Route::Play {
                    video: category.detail_url.clone(),
                };
                (plugin_url(&self.base_url, &route), item, false)
            }
        }
    }

    fn episode_entry(&self, episode: &EpisodeRecord) -> (String, ListItem) {
        let mut item = ListItem::new(&episode.title);
        item.art = Art::single(&episode.image_url);
        item.info.plot = Some(episode.description.clone());
        item.info.premiered = episode.premiered_iso();
        item.playable = true;

        let route = Route::Play {
            video: episode.playable_url.clone(),
        };
        (plugin_url(&self.base_url, &route), item)
    }
}
