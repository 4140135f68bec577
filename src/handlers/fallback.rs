use crate::core::error::ApiError;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

/// Catch-all for unmatched routes and wrong methods on matched routes.
///
/// Anything under /api/ gets the generic JSON not_found body; everything
/// else gets a plain 404.
pub async fn fallback_handler(uri: Uri) -> Response {
    let path = uri.path();

    if path == "/api" || path.starts_with("/api/") {
        return ApiError::NotFound.into_response();
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
