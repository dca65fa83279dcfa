use std::fmt;
use std::time::Duration;

use eyre::WrapErr;
use models::TrendingEntry;

pub mod feed;

pub use feed::{parse_release_date, parse_trending_response, FeedEntryError};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const TRENDING_MOVIES_PATH: &str = "/trending/movie/week";

#[derive(Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TmdbClient")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> eyre::Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(eyre::eyre!("TMDb API key is empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .wrap_err("build reqwest client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch this week's trending movies, most popular first.
    ///
    /// Elements that cannot be parsed are logged and skipped; the remaining
    /// entries keep their relative order.
    pub async fn trending_movies(&self) -> eyre::Result<Vec<TrendingEntry>> {
        Ok(usable_entries(self.trending_feed().await?))
    }

    /// Fetch this week's trending feed with one slot per feed element.
    ///
    /// Unusable elements stay in place as errors, so slot `i` is feed rank `i`.
    pub async fn trending_feed(&self) -> eyre::Result<Vec<Result<TrendingEntry, FeedEntryError>>> {
        let url = format!("{}{}", self.base_url, TRENDING_MOVIES_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .wrap_err("fetch trending movies")?;
        let body = response
            .error_for_status()
            .wrap_err("trending movies status")?
            .bytes()
            .await
            .wrap_err("read trending movies body")?;

        parse_trending_response(&body)
    }
}

/// Drop the feed elements that did not parse, logging each one.
pub fn usable_entries(feed: Vec<Result<TrendingEntry, FeedEntryError>>) -> Vec<TrendingEntry> {
    let total = feed.len();
    let mut entries = Vec::with_capacity(total);
    for result in feed {
        match result {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::warn!(rank = e.rank(), "tmdb: skipping trending entry: {e}"),
        }
    }

    tracing::debug!(
        "tmdb: parsed {} of {} trending entries",
        entries.len(),
        total
    );
    entries
}
