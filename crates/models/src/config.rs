use std::fmt;

pub const DEFAULT_TOP_MOVIES_COUNT: i32 = 10;
pub const DEFAULT_REFRESH_INTERVAL_HOURS: u64 = 24;

#[derive(Clone)]
pub struct BannerSettings {
    pub tmdb_api_key: Option<String>,
    pub top_movies_count: i32,
    pub refresh_interval_hours: u64,
}

impl Default for BannerSettings {
    fn default() -> Self {
        Self {
            tmdb_api_key: None,
            top_movies_count: DEFAULT_TOP_MOVIES_COUNT,
            refresh_interval_hours: DEFAULT_REFRESH_INTERVAL_HOURS,
        }
    }
}

impl fmt::Debug for BannerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BannerSettings")
            .field(
                "tmdb_api_key",
                &self.tmdb_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("top_movies_count", &self.top_movies_count)
            .field("refresh_interval_hours", &self.refresh_interval_hours)
            .finish()
    }
}
