use axum::{extract::State, Json};
use models::BannerItem;

use crate::state::AppState;

/// GET /TrendingMoviesBanner/movies
/// Library movies that are trending this week, most popular first.
/// Always 200; an empty list means there is no banner to show.
pub(crate) async fn get_trending_movies(State(state): State<AppState>) -> Json<Vec<BannerItem>> {
    let catalog = state.catalog_snapshot();
    let items = state.trending.trending_in_library(&catalog).await;
    Json(items)
}
