//! Day-first date normalization
//!
//! Listing cards carry dates like `15.03.2023` or `5. 3. 2023`. Parsing is
//! strict: text without a complete, valid day.month.year token is an error,
//! never a guessed date.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use crate::error::{Result, TvluxError};

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|[^\d])(\d{1,2})\s*[./-]\s*(\d{1,2})\s*[./-]\s*(\d{4})(?:$|[^\d])")
            .expect("date pattern is valid")
    })
}

/// Parse site date text with day-before-month convention.
///
/// # Examples
/// ```
/// use tvlux_core::date::normalize_date;
///
/// let date = normalize_date("15.03.2023").unwrap();
/// assert_eq!(date.to_string(), "2023-03-15");
/// assert!(normalize_date("včera").is_err());
/// ```
pub fn normalize_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    let fail = |reason: &str| TvluxError::DateParse {
        text: trimmed.to_string(),
        reason: reason.to_string(),
    };

    let caps = date_pattern()
        .captures(trimmed)
        .ok_or_else(|| fail("expected day.month.year"))?;

    let day: u32 = caps[1].parse().map_err(|_| fail("day is not a number"))?;
    let month: u32 = caps[2].parse().map_err(|_| fail("month is not a number"))?;
    let year: i32 = caps[3].parse().map_err(|_| fail("year is not a number"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| fail("no such calendar date"))
}

/// Normalize site date text into an ISO-8601 `YYYY-MM-DD` string.
pub fn to_iso(text: &str) -> Result<String> {
    Ok(normalize_date(text)?.format("%Y-%m-%d").to_string())
}
