//! JSON error envelope
//!
//! Every failure leaves the server as
//! `{"success": false, "error": <status>, "message": <text>}`. The message is
//! fixed per status; the underlying cause is only logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use trivia_core::TriviaError;

/// Error returned from HTTP handlers
#[derive(Debug, Error)]
#[error("{status}: {detail}")]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    /// Map a failure of a read-only operation; store errors there are 500s
    pub fn from_read(err: TriviaError) -> Self {
        match err {
            TriviaError::Persistence(e) => Self::internal(e.to_string()),
            other => other.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    fn message(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::METHOD_NOT_ALLOWED => "method not allowed",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
            _ => "Internal server error",
        }
    }
}

impl From<TriviaError> for ApiError {
    fn from(err: TriviaError) -> Self {
        match err {
            TriviaError::Validation(msg) => Self::bad_request(msg),
            TriviaError::NotFound(msg) => Self::not_found(msg),
            TriviaError::Persistence(e) => Self::unprocessable(e.to_string()),
            TriviaError::Internal(msg) => Self::internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else if self.status == StatusCode::UNPROCESSABLE_ENTITY {
            tracing::warn!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let envelope = ErrorEnvelope {
            success: false,
            error: self.status.as_u16(),
            message: self.message(),
        };
        (self.status, Json(envelope)).into_response()
    }
}
