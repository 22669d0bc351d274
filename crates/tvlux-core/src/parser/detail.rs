//! Episode detail page parser

use crate::error::Result;
use crate::types::EpisodeDetail;

use super::page::{require_attr, text_of, Page};

/// Extract the media source and description from an episode page.
///
/// The first `<source src>` is the playable address and is mandatory.
/// The first paragraph is the description; a page without one yields an
/// empty description.
pub fn parse_detail(page: &Page) -> Result<EpisodeDetail> {
    let source = page.require("source[src]", "video source")?;
    let playable_url = page.absolute_url(require_attr(&source, "src", "video source")?)?;
    let description = page.find("p")?.map(|p| text_of(&p)).unwrap_or_default();

    Ok(EpisodeDetail {
        playable_url,
        description,
    })
}
