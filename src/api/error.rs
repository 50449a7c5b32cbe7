//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::AggregateError;
use crate::store::StoreError;
use crate::validation::{FieldError, ValidationErrors};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body or query failed field constraints
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Record store error
    #[error("Storage error: {0}")]
    Store(StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Store(err)
        }
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::NoGoal => ApiError::NotFound(err.to_string()),
            AggregateError::Store(e) => e.into(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn status_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let fields = match &self {
            ApiError::Validation(errors) => Some(errors.errors.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
                fields,
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::not_found("Workout", "abc").into();
        assert_eq!(err.status_code().0, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Workout not found: abc");
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err: ApiError = StoreError::Lock("poisoned".into()).into();
        assert_eq!(err.status_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_no_goal_maps_to_404() {
        let err: ApiError = AggregateError::NoGoal.into();
        assert_eq!(err.status_code(), (StatusCode::NOT_FOUND, "NOT_FOUND"));
        assert_eq!(err.to_string(), "No goals set");
    }

    #[test]
    fn test_validation_maps_to_422() {
        let err: ApiError = ValidationErrors::single("duration", "must be greater than 0").into();
        assert_eq!(err.status_code().0, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_server_failures_map_to_500() {
        let err = ApiError::Internal("listener closed".into());
        assert_eq!(err.status_code(), (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"));

        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: ApiError = io.into();
        assert_eq!(err.status_code(), (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
