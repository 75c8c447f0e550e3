//! Text formatting for movie cards and detail views.

use chrono::{DateTime, Datelike, NaiveDate};
use marquee_api::tmdb::CatalogItem;

/// Shown for missing values.
pub const NOT_AVAILABLE: &str = "N/A";
/// Shown for a movie without a title.
pub const UNTITLED: &str = "Untitled";
/// Shown for a movie without an overview.
pub const NO_DESCRIPTION: &str = "No description available";

/// Cast members shown in a detail view.
pub const CAST_LIMIT: usize = 8;
/// Reviews shown in a detail view.
pub const REVIEW_LIMIT: usize = 3;
/// Similar titles shown in a detail view.
pub const SIMILAR_LIMIT: usize = 4;

/// Title, or [`UNTITLED`].
#[must_use]
pub fn title(item: &CatalogItem) -> &str {
    let title = item.title.trim();
    if title.is_empty() { UNTITLED } else { title }
}

/// Overview, or [`NO_DESCRIPTION`].
#[must_use]
pub fn overview(item: &CatalogItem) -> &str {
    item.overview
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

/// Average vote with one decimal (e.g. `8.4`).
#[must_use]
pub fn rating(vote_average: Option<f64>) -> String {
    vote_average.map_or_else(|| String::from(NOT_AVAILABLE), |v| format!("{v:.1}"))
}

/// Year of a `YYYY-MM-DD` release date.
#[must_use]
pub fn release_year(release_date: Option<&str>) -> String {
    release_date
        .and_then(parse_date)
        .map_or_else(|| String::from(NOT_AVAILABLE), |d| d.year().to_string())
}

/// Full release date, as TMDB sends it.
#[must_use]
pub fn release_date(release_date: Option<&str>) -> String {
    release_date
        .and_then(parse_date)
        .map_or_else(
            || String::from(NOT_AVAILABLE),
            |d| d.format("%Y-%m-%d").to_string(),
        )
}

/// Upper-cased ISO 639-1 code.
#[must_use]
pub fn language(original_language: Option<&str>) -> String {
    original_language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map_or_else(|| String::from(NOT_AVAILABLE), str::to_uppercase)
}

/// Runtime in minutes; zero means unknown.
#[must_use]
pub fn runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{m} min"),
        _ => String::from(NOT_AVAILABLE),
    }
}

/// Whole US dollars with thousands separators (e.g. `$160,000,000`).
#[must_use]
pub fn usd(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

/// Review timestamp (RFC 3339) as `YYYY-MM-DD`.
#[must_use]
pub fn review_date(created_at: &str) -> String {
    DateTime::parse_from_rfc3339(created_at).map_or_else(
        |_| {
            created_at
                .get(..10)
                .and_then(parse_date)
                .map_or_else(
                    || String::from(created_at),
                    |d| d.format("%Y-%m-%d").to_string(),
                )
        },
        |dt| dt.date_naive().format("%Y-%m-%d").to_string(),
    )
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len.saturating_add(len / 3));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && len.saturating_sub(i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}
