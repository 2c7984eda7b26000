//! HTTP mapping for handler failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mood_core::Error;
use serde::Serialize;

/// Wrapper converting core errors into JSON error responses.
///
/// A missing classifier handle is a lifecycle problem, not an internal
/// fault, and maps to 503 so load balancers back off.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::State(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
