//! Show listing parser
//!
//! Episodes on a show page are `div.archive-item` cards. The cards only
//! point at detail pages; the media address is resolved separately.

use crate::error::Result;
use crate::types::EpisodeCard;

use super::page::{find_in, require_attr, require_in, text_of, Page};

const EPISODE_CARD: &str = "div.archive-item";

/// Selectors tried, in order, for the "next page" control
const NEXT_PAGE_SELECTORS: [&str; 4] = [
    "a[rel='next']",
    ".pagination li.next:not(.disabled) a",
    ".pagination a.next:not(.disabled)",
    "a.next-page",
];

/// Cards of one listing page plus its pagination cursor
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    pub cards: Vec<EpisodeCard>,
    pub next_page: Option<String>,
}

/// Parse a listing page into episode cards and the next-page URL.
///
/// Title, link and thumbnail are mandatory per card. The date tag is
/// optional; its text is kept raw for the date normalizer.
pub fn parse_listing(page: &Page) -> Result<ListingPage> {
    let cards = page
        .find_all(EPISODE_CARD)?
        .iter()
        .map(|card| -> Result<EpisodeCard> {
            let title = text_of(&require_in(card, "h4", "episode title")?);
            let link = require_in(card, "a[href]", "episode link")?;
            let detail_url = page.absolute_url(require_attr(&link, "href", "episode link")?)?;
            let image = require_in(card, "img", "episode thumbnail")?;
            let image_url = page.absolute_url(require_attr(&image, "src", "episode thumbnail")?)?;
            let date_text = find_in(card, "div.tag.dark")?
                .map(|el| text_of(&el))
                .filter(|text| !text.is_empty());

            Ok(EpisodeCard {
                title,
                detail_url,
                image_url,
                date_text,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ListingPage {
        cards,
        next_page: parse_next_page(page)?,
    })
}

/// Absolute URL of the next listing page, if the page links one.
///
/// A link back to the page itself is ignored so traversal cannot loop.
pub fn parse_next_page(page: &Page) -> Result<Option<String>> {
    for css in NEXT_PAGE_SELECTORS {
        let Some(link) = page.find(css)? else {
            continue;
        };
        let href = match link.value().attr("href").map(str::trim) {
            Some(href) if !href.is_empty() && href != "#" => href,
            _ => continue,
        };
        let next = page.absolute_url(href)?;
        if next == page.base_url().as_str() {
            return Ok(None);
        }
        return Ok(Some(next));
    }

    Ok(None)
}
