// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body of every response the proxy builds itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    ConnectionError,
    ServerError,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing 'message' field")]
    MissingMessage,

    #[error("Invalid request body: {reason}")]
    InvalidBody { status: StatusCode, reason: String },

    #[error("Cannot connect to API server at {api_url}: {reason}")]
    UpstreamUnavailable { api_url: String, reason: String },

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingMessage => StatusCode::BAD_REQUEST,
            AppError::InvalidBody { status, .. } => *status,
            AppError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingMessage | AppError::InvalidBody { .. } => ErrorKind::ValidationError,
            AppError::UpstreamUnavailable { .. } => ErrorKind::ConnectionError,
            AppError::Internal(_) => ErrorKind::ServerError,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingMessage => "missing_message",
            AppError::InvalidBody { .. } => "invalid_body",
            AppError::UpstreamUnavailable { .. } => "api_unavailable",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Client-side mistakes, as opposed to failures on our side or upstream.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::ValidationError
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        let (message, api_url) = match self {
            // The transport reason is logged, not returned to the browser.
            AppError::UpstreamUnavailable { api_url, .. } => (
                format!("Cannot connect to API server at {api_url}. Please check and try again."),
                Some(api_url.clone()),
            ),
            AppError::Internal(reason) if reason.is_empty() => {
                ("Internal server error".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        ErrorEnvelope {
            error: ErrorBody {
                message,
                kind: self.kind(),
                code: self.code().to_string(),
                api_url,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
