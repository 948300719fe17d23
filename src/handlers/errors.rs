//! # Handler Errors
//!
//! One error type for the whole handler surface. Every variant carries a
//! machine-readable code and maps to an HTTP status; the `IntoResponse` impl
//! renders the JSON error envelope with a message and timestamp.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Result type for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Handler errors
#[derive(Debug, Clone, Error)]
pub enum HandlerError {
    #[error("Missing required fields: {0}")]
    MissingRequiredFields(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid exercise code: {0}")]
    InvalidExerciseCode(String),

    #[error("Exercise not found: {0}")]
    ExerciseNotFound(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0} is not configured")]
    NotConfigured(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::MissingRequiredFields(_) => "MISSING_REQUIRED_FIELDS",
            HandlerError::Validation(_) => "VALIDATION_ERROR",
            HandlerError::InvalidAction(_) => "INVALID_ACTION",
            HandlerError::InvalidExerciseCode(_) => "INVALID_EXERCISE_CODE",
            HandlerError::ExerciseNotFound(_) => "EXERCISE_NOT_FOUND",
            HandlerError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            HandlerError::Database(_) => "DATABASE_ERROR",
            HandlerError::NotConfigured(_) => "NOT_CONFIGURED",
            HandlerError::Upstream(_) => "UPSTREAM_ERROR",
            HandlerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            HandlerError::MissingRequiredFields(_) => StatusCode::BAD_REQUEST,
            HandlerError::Validation(_) => StatusCode::BAD_REQUEST,
            HandlerError::InvalidAction(_) => StatusCode::BAD_REQUEST,
            HandlerError::InvalidExerciseCode(_) => StatusCode::BAD_REQUEST,
            HandlerError::ExerciseNotFound(_) => StatusCode::NOT_FOUND,
            HandlerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HandlerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HandlerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error envelope sent to clients
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            error: self.code(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (self.status_code(), Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            HandlerError::MissingRequiredFields("title".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            HandlerError::ExerciseNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            HandlerError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            HandlerError::Database("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_machine_codes() {
        assert_eq!(
            HandlerError::Validation("title is required".into()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            HandlerError::InvalidExerciseCode("EX-XXXXXX".into()).code(),
            "INVALID_EXERCISE_CODE"
        );
        assert_eq!(HandlerError::Internal("oops".into()).code(), "INTERNAL_ERROR");
    }
}
