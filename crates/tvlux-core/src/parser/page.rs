//! Queryable HTML page
//!
//! Thin layer over `scraper::Html` that remembers the page URL, so every
//! link pulled out of it can be made absolute, and that turns absent nodes
//! into `ElementNotFound` instead of a silent `None` deep in a builder.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{Result, TvluxError};

/// Decode a response body as UTF-8.
///
/// The site serves UTF-8 without always saying so in its headers, so the
/// body is decoded explicitly. A leading byte-order mark is dropped.
pub fn decode_utf8(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|e| TvluxError::Encoding(e.to_string()))
}

/// Compile a CSS selector, reporting bad syntax as a parse error.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| TvluxError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Trimmed text content of an element
pub fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First descendant matching `css`
pub fn find_in<'a>(element: &ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    Ok(element.select(&selector(css)?).next())
}

/// First descendant matching `css`, or `ElementNotFound(what)`
pub fn require_in<'a>(element: &ElementRef<'a>, css: &str, what: &str) -> Result<ElementRef<'a>> {
    find_in(element, css)?.ok_or_else(|| TvluxError::ElementNotFound(what.to_string()))
}

/// Attribute value, trimmed; empty values count as missing.
pub fn require_attr<'a>(element: &ElementRef<'a>, attr: &str, what: &str) -> Result<&'a str> {
    element
        .value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| TvluxError::ElementNotFound(format!("{} ({} attribute)", what, attr)))
}

/// Parsed document plus the URL it was fetched from
pub struct Page {
    document: Html,
    base_url: Url,
}

impl Page {
    /// Parse already-decoded HTML fetched from `base_url`.
    pub fn parse(html: &str, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TvluxError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        Ok(Self {
            document: Html::parse_document(html),
            base_url,
        })
    }

    /// Decode a raw response body and parse it.
    pub fn from_bytes(bytes: &[u8], base_url: &str) -> Result<Self> {
        Self::parse(&decode_utf8(bytes)?, base_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// First element matching `css`
    pub fn find(&self, css: &str) -> Result<Option<ElementRef<'_>>> {
        Ok(self.document.select(&selector(css)?).next())
    }

    /// Every element matching `css`, in document order
    pub fn find_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        Ok(self.document.select(&selector(css)?).collect())
    }

    /// First element matching `css`, or `ElementNotFound(what)`
    pub fn require(&self, css: &str, what: &str) -> Result<ElementRef<'_>> {
        self.find(css)?
            .ok_or_else(|| TvluxError::ElementNotFound(what.to_string()))
    }

    /// Resolve a possibly relative link against the page URL.
    ///
    /// Only `http` and `https` results are accepted.
    pub fn absolute_url(&self, raw: &str) -> Result<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(TvluxError::InvalidUrl("empty link".to_string()));
        }
        let url = self
            .base_url
            .join(raw)
            .map_err(|e| TvluxError::InvalidUrl(format!("{}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url.into()),
            other => Err(TvluxError::InvalidUrl(format!("{}: unsupported scheme {}", raw, other))),
        }
    }
}
