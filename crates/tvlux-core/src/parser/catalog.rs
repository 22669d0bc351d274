//! Archive index parser
//!
//! Every show on `/archiv/abecedne/vsetko` is a
//! `div.col-md-6.col-lg-3.rel-identification` card holding an `h3` title,
//! a link, a poster image and a blue genre tag.

use crate::config::LiveStream;
use crate::error::Result;
use crate::types::{CategoryKind, CategoryRecord};

use super::page::{find_in, require_attr, require_in, text_of, Page};

const CATEGORY_CARD: &str = "div.rel-identification";

/// Parse every category card on the archive index, in document order.
///
/// A card without a title, link or image aborts the whole listing with
/// `ElementNotFound`; a missing genre tag becomes an empty string.
pub fn parse_categories(page: &Page) -> Result<Vec<CategoryRecord>> {
    page.find_all(CATEGORY_CARD)?
        .iter()
        .map(|card| -> Result<CategoryRecord> {
            let title = text_of(&require_in(card, "h3", "category title")?);
            let link = require_in(card, "a[href]", "category link")?;
            let detail_url = page.absolute_url(require_attr(&link, "href", "category link")?)?;
            let image = require_in(card, "img", "category image")?;
            let image_url = page.absolute_url(require_attr(&image, "src", "category image")?)?;
            let genre_tag = find_in(card, "div.tag-blue")?
                .map(|el| text_of(&el))
                .unwrap_or_default();

            Ok(CategoryRecord {
                title,
                detail_url,
                image_url,
                genre_tag,
                kind: CategoryKind::Archive,
            })
        })
        .collect()
}

/// Static record for the configured live stream.
pub fn live_category(live: &LiveStream) -> CategoryRecord {
    CategoryRecord {
        title: live.title.clone(),
        detail_url: live.url.clone(),
        image_url: live.image.clone(),
        genre_tag: "Live".to_string(),
        kind: CategoryKind::Live,
    }
}
