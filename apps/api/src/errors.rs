use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::pipeline::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every error body has the shape `{"detail": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Body was not valid JSON or did not match the request schema.
    #[error("{}", .0.body_text())]
    InvalidRequest(#[from] JsonRejection),

    /// Any failure while building, rendering or storing the résumé.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                rejection.status()
            }
            AppError::Generation(e) => {
                tracing::error!("Resume generation failed: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}

/// `Json` extractor whose rejections are reported through `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
