use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug)]
pub(crate) enum AppError {
    NotFound(String),
    Io(std::io::Error),
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message, code) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::Io(e) => {
                tracing::error!("request failed on io: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to read banner resource".to_string(),
                    "IO_ERROR",
                )
            }
        };

        (status, Json(ErrorResponse { message, code })).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound("banner resource not found".to_string())
        } else {
            AppError::Io(e)
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, AppError>;
