pub mod calendar;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application: routes, shared state and middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(calendar::router())
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Body of a 400 or 404, shaped like `{"detail": "..."}`.
#[derive(Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub enum AppError {
    /// A path segment that is not a number.
    BadRequest(String),
    /// The requested artifact has not been scraped yet.
    NotFound(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(DetailResponse { detail })).into_response()
            }
            AppError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(DetailResponse { detail })).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                let body = Json(ErrorResponse {
                    error: err.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
