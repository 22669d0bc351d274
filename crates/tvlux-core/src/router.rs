//! Query-string router
//!
//! The host starts the plugin with a query string such as
//! `?action=listing&category=News&url=https%3A%2F%2F...`. This module turns
//! that string into a `Route` and builds the navigation URLs that lead
//! back into the plugin.

use std::collections::BTreeMap;

use crate::error::{Result, TvluxError};

/// What a single plugin invocation should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No parameters: show the top-level categories
    Categories,
    /// `action=listing`: show the episodes of one listing page
    Listing { category: String, url: String },
    /// `action=play`: resolve an already known media URL
    Play { video: String },
}

/// Split a `key=value&...` string into decoded pairs.
///
/// One leading `?` is stripped, `+` decodes to a space, and segments with
/// an empty key or value are skipped. When a key repeats, the last value
/// wins.
pub fn parse_query(query: &str) -> BTreeMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(key), decode_component(value))
        })
        .filter(|(key, value)| !key.is_empty() && !value.is_empty())
        .collect()
}

fn decode_component(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(plus_decoded.as_bytes())).into_owned()
}

impl Route {
    /// Route an invocation query string.
    ///
    /// # Errors
    /// - `MissingAction` when parameters are present but `action` is not
    /// - `UnknownAction` for any action other than `listing` or `play`
    /// - `MissingParam` when the action lacks one of its parameters
    ///
    /// # Examples
    /// ```
    /// use tvlux_core::router::Route;
    ///
    /// let route = Route::from_query("?action=play&video=https%3A%2F%2Fx.test%2Fv.m3u8").unwrap();
    /// assert_eq!(route, Route::Play { video: "https://x.test/v.m3u8".to_string() });
    /// assert_eq!(Route::from_query("").unwrap(), Route::Categories);
    /// assert!(Route::from_query("action=bogus").is_err());
    /// ```
    pub fn from_query(query: &str) -> Result<Self> {
        let mut params = parse_query(query);
        if params.is_empty() {
            return Ok(Route::Categories);
        }

        let action = params
            .remove("action")
            .ok_or_else(|| TvluxError::MissingAction(query.to_string()))?;
        let mut take = |name: &'static str| params.remove(name).ok_or(TvluxError::MissingParam(name));

        match action.as_str() {
            "listing" => Ok(Route::Listing {
                category: take("category")?,
                url: take("url")?,
            }),
            "play" => Ok(Route::Play { video: take("video")? }),
            _ => Err(TvluxError::UnknownAction(action)),
        }
    }

    /// Encoded query string for this route, without the leading `?`.
    pub fn to_query(&self) -> String {
        let pairs: Vec<(&str, &str)> = match self {
            Route::Categories => Vec::new(),
            Route::Listing { category, url } => {
                vec![("action", "listing"), ("category", category.as_str()), ("url", url.as_str())]
            }
            Route::Play { video } => vec![("action", "play"), ("video", video.as_str())],
        };

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Navigation URL that re-enters the plugin at `route`.
pub fn plugin_url(base: &str, route: &Route) -> String {
    match route {
        Route::Categories => base.to_string(),
        _ => format!("{}?{}", base, route.to_query()),
    }
}
