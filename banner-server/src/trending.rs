use models::config::BannerSettings;
use models::{BannerItem, CatalogItem};
use tmdb_client::TmdbClient;

/// Fetches the trending feed and matches it against the library.
///
/// Built once at startup and shared through `AppState`.
#[derive(Debug)]
pub(crate) struct TrendingService {
    feed: Option<TmdbClient>,
    top_count: i32,
}

impl TrendingService {
    pub(crate) fn new(settings: &BannerSettings, tmdb_base_url: &str) -> Self {
        let feed = match settings.tmdb_api_key.as_deref() {
            Some(api_key) => match TmdbClient::new(api_key, tmdb_base_url) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::warn!("trending: failed to build TMDb client: {e:#}");
                    None
                }
            },
            None => {
                tracing::warn!("trending: TMDb API key not configured; banner will stay empty");
                None
            }
        };

        Self {
            feed,
            top_count: settings.top_movies_count,
        }
    }

    /// Library movies that are trending this week, in feed order.
    ///
    /// Never fails: a missing key or a feed error is logged and yields an
    /// empty list, which the banner treats as "nothing to show".
    pub(crate) async fn trending_in_library(&self, catalog: &[CatalogItem]) -> Vec<BannerItem> {
        let Some(feed) = &self.feed else {
            tracing::warn!("trending: TMDb API key not configured");
            return Vec::new();
        };

        let mut ranked = match feed.trending_feed().await {
            Ok(ranked) => ranked,
            Err(e) => {
                tracing::error!("trending: error fetching trending movies: {e:#}");
                return Vec::new();
            }
        };
        // Cut before dropping bad elements so later entries keep their rank.
        ranked.truncate(trending_match::scan_window(self.top_count));
        let trending = tmdb_client::usable_entries(ranked);

        let matched = trending_match::reconcile(&trending, catalog, self.top_count);
        tracing::info!(
            "trending: found {} trending movies in library ({} feed entries, {} catalog items)",
            matched.len(),
            trending.len(),
            catalog.len()
        );

        matched.into_iter().map(BannerItem::from).collect()
    }
}
