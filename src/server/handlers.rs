//! HTTP handlers for report generation.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::AppState;
use crate::services::{ErrorResponse, ReportError};

/// CORS headers attached to every generation response.
fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    ]
}

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

/// Preflight: always 200 with an empty body.
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, cors_headers())
}

/// Generate one report section from a JSON body.
///
/// Any failure, including an unreadable or oversized body, maps to a 500
/// carrying the error message in `details`.
pub async fn generate_report(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let result = match body {
        Ok(body) => state.service.handle_body(&body).await,
        Err(rejection) => Err(ReportError::UnreadableBody(rejection.body_text())),
    };

    // Headers are set here rather than through CorsLayer so every response,
    // preflight or not, carries exactly these three.
    match result {
        Ok(response) => (StatusCode::OK, cors_headers(), Json(response)).into_response(),
        Err(e) => {
            error!("Error generating report section: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                cors_headers(),
                Json(ErrorResponse::from_error(&e)),
            )
                .into_response()
        }
    }
}
