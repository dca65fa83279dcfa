use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyResponse {
    status: &'static str,
    catalog: &'static str,
}

pub(crate) async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

pub(crate) async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_catalog_loaded() {
        (
            StatusCode::OK,
            Json(ReadyResponse {
                status: "ready",
                catalog: "ok",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyResponse {
                status: "not_ready",
                catalog: "missing",
            }),
        )
    }
}
