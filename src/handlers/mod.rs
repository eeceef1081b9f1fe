// Handlers module
// HTTP handlers for the REST API

pub mod examples;
pub mod words;

use axum::{
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};

use crate::error::ApiError;

/// Health check handler
/// Returns "OK" with 200 status for monitoring purposes
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Router-level fallback: no binding exists for this path.
pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}

/// Per-path fallback: the path exists but not for this method.
/// In production this is where every POST/PUT lands.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method,
        path: uri.path().to_string(),
    }
}
