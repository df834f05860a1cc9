use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::Tier;

/// Central error type for the gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("this feature requires the {required} plan or above")]
    InsufficientTier { current: Tier, required: Tier },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<persistence::StoreError> for ApiError {
    fn from(err: persistence::StoreError) -> Self {
        ApiError::Internal(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "UNAUTHORIZED", "message": message}),
            ),
            ApiError::InsufficientTier { current, required } => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": "INSUFFICIENT_TIER",
                    "message": format!(
                        "This feature requires the \"{}\" plan or above. Please upgrade your account.",
                        required
                    ),
                    "currentTier": current,
                    "requiredTier": required,
                }),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({"error": "BAD_REQUEST", "message": message}),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({"error": "NOT_FOUND", "message": message}),
            ),
            ApiError::Conflict(message) => (
                StatusCode::CONFLICT,
                json!({"error": "CONFLICT", "message": message}),
            ),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Internal error serving request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "INTERNAL_ERROR", "message": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
