// Centralized error handling for the JSON API surface

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not_found")]
    NotFound,

    #[error("reset_failed")]
    ResetFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "unauthorized" }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "not_found" })),
            ApiError::ResetFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "reset_failed", "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
