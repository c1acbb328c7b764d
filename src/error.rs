//! Service Error Types
//!
//! Failures that are reported back to the caller. Malformed coupon rules are
//! absent here: they are absorbed inside the evaluation core and
//! surface only as "not applicable".

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by the coupon service
#[derive(Debug, thiserror::Error)]
pub enum CouponError {
    /// No coupon with this id exists in the store (404)
    #[error("Coupon not found with id: {0}")]
    NotFound(i64),

    /// The coupon's declared type is none of the known kinds (422)
    #[error("Unknown coupon type: {0}")]
    UnknownKind(String),

    /// Another coupon already uses this code (409)
    #[error("Coupon code already exists: {0}")]
    Conflict(String),

    /// The request carried values outside their allowed range (400)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CouponError {
    fn status(&self) -> StatusCode {
        match self {
            CouponError::NotFound(_) => StatusCode::NOT_FOUND,
            CouponError::UnknownKind(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CouponError::Conflict(_) => StatusCode::CONFLICT,
            CouponError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Unreadable request bodies are reported like any other invalid input.
impl From<JsonRejection> for CouponError {
    fn from(rejection: JsonRejection) -> Self {
        CouponError::Validation(rejection.body_text())
    }
}

impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "Request failed");

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result alias used across the crate
pub type Result<T, E = CouponError> = std::result::Result<T, E>;
