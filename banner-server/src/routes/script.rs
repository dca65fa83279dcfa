use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tokio::fs;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /TrendingMoviesBanner/script
/// Serves the banner client script as-is; no auth, the web client loads it
/// from a plain script tag.
pub(crate) async fn get_script(State(state): State<AppState>) -> Result<Response> {
    if !state.script_path.is_file() {
        return Err(AppError::NotFound("Banner script not found".to_string()));
    }

    let bytes = fs::read(&state.script_path).await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        bytes,
    )
        .into_response())
}
