//! # REST API Errors
//!
//! Error types for the REST API module.
//!
//! Only two outcomes are part of the public contract:
//! - a missing entity: `404 {"error": "<Entity> not found"}`
//! - a rejected field: `400 {"errors": ["validation errors"]}`
//!
//! Anything else is answered with a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::serialize::SerializeError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Fixed marker returned for every validation failure
pub const VALIDATION_MARKER: &str = "validation errors";

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Entity with the requested id does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A guarded field rejected its value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Single-message error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Validation failure body
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<&'static str>,
}

impl ValidationErrorResponse {
    pub fn generic() -> Self {
        Self {
            errors: vec![VALIDATION_MARKER],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound(_) => (
                status,
                Json(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            ApiError::Validation(err) => {
                debug!(field = err.field(), reason = err.message(), "Rejected write");
                (status, Json(ValidationErrorResponse::generic())).into_response()
            }
            ApiError::Storage(_) | ApiError::Serialize(_) => {
                error!(error = %self, "Request failed");
                (
                    status,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound("Hero").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(ValidationError::new("strength", "bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StorageError::LockPoisoned).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(ApiError::NotFound("Power").to_string(), "Power not found");
    }

    #[test]
    fn test_validation_body_is_generic() {
        let body = serde_json::to_value(ValidationErrorResponse::generic()).unwrap();
        assert_eq!(body, serde_json::json!({"errors": ["validation errors"]}));
    }
}
