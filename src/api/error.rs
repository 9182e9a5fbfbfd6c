//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::agent::AgentError;
use crate::db::DatabaseError;
use crate::estimator::EstimatorError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Agent backend unavailable: {0}")]
    AgentUnavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::AgentUnavailable(detail) => {
                tracing::error!(detail, "Agent backend failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "AGENT_UNAVAILABLE",
                    "The analysis backend is unavailable".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<EstimatorError> for ApiError {
    fn from(err: EstimatorError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Connection(_) | AgentError::Timeout(_) => {
                ApiError::AgentUnavailable(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
