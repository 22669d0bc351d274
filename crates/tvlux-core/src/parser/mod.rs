//! HTML parsers for tvlux.sk pages
//!
//! - `page`: decoding and the queryable document wrapper
//! - `catalog`: archive index (show categories)
//! - `listing`: show listing (episode cards and pagination)
//! - `detail`: episode detail (media source and description)
//!
//! Parsing is synchronous; documents never outlive the function that
//! parsed them.

pub mod catalog;
pub mod detail;
pub mod listing;
pub mod page;

pub use catalog::{live_category, parse_categories};
pub use detail::parse_detail;
pub use listing::{parse_listing, parse_next_page, ListingPage};
pub use page::{decode_utf8, Page};
