use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use eyre::WrapErr;
use models::TrendingEntry;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawTrendingResponse {
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct RawTrendingMovie {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

/// Why a single feed element could not become a [`TrendingEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEntryError {
    MissingTitle { rank: usize },
    Malformed { rank: usize, message: String },
}

impl FeedEntryError {
    pub fn rank(&self) -> usize {
        match self {
            Self::MissingTitle { rank } | Self::Malformed { rank, .. } => *rank,
        }
    }
}

impl fmt::Display for FeedEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle { rank } => write!(f, "feed entry #{rank} has no title"),
            Self::Malformed { rank, message } => {
                write!(f, "feed entry #{rank} is malformed: {message}")
            }
        }
    }
}

impl std::error::Error for FeedEntryError {}

/// Parse a `/trending/movie/*` response body.
///
/// The outer error covers a body that is not a trending response at all.
/// Each element is parsed on its own so one bad entry does not hide the rest;
/// the returned vector keeps the feed's rank order.
pub fn parse_trending_response(
    body: &[u8],
) -> eyre::Result<Vec<Result<TrendingEntry, FeedEntryError>>> {
    let raw: RawTrendingResponse =
        serde_json::from_slice(body).wrap_err("parse trending response json")?;

    Ok(raw
        .results
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(rank, value)| parse_entry(rank, value))
        .collect())
}

fn parse_entry(rank: usize, value: serde_json::Value) -> Result<TrendingEntry, FeedEntryError> {
    let raw: RawTrendingMovie =
        serde_json::from_value(value).map_err(|e| FeedEntryError::Malformed {
            rank,
            message: e.to_string(),
        })?;

    let title = raw
        .title
        .filter(|title| !title.trim().is_empty())
        .ok_or(FeedEntryError::MissingTitle { rank })?;
    let release_date = raw.release_date.as_deref().and_then(parse_release_date);

    Ok(TrendingEntry {
        title,
        release_date,
    })
}

/// Lenient release date parsing. Unrecognised text is `None`.
pub fn parse_release_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y/%m/%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}
