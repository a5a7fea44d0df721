// src/message.rs
use axum::body::Bytes;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// A validated chat request, also the exact body sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawChatRequest {
    message: Option<String>,
    session_id: Option<String>,
}

impl ChatRequest {
    /// Parse and validate an inbound body. An empty body counts as `{}`.
    ///
    /// Only a JSON object can carry `message`; an array has no such field.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let raw: RawChatRequest = if body.iter().all(u8::is_ascii_whitespace) {
            RawChatRequest::default()
        } else {
            match serde_json::from_slice::<Value>(body).map_err(invalid_body)? {
                Value::Object(map) => {
                    serde_json::from_value(Value::Object(map)).map_err(invalid_body)?
                }
                Value::Array(_) => return Err(AppError::MissingMessage),
                other => {
                    return Err(AppError::InvalidBody {
                        status: StatusCode::BAD_REQUEST,
                        reason: format!("expected a JSON object, got {other}"),
                    });
                }
            }
        };

        match raw.message {
            Some(message) if !message.is_empty() => Ok(Self {
                message,
                session_id: raw.session_id,
            }),
            _ => Err(AppError::MissingMessage),
        }
    }
}

fn invalid_body(err: serde_json::Error) -> AppError {
    AppError::InvalidBody {
        status: StatusCode::BAD_REQUEST,
        reason: err.to_string(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_url: String,
    pub timestamp: String,
}

/// Upstream bodies are relayed untouched when they are JSON. Anything else is
/// wrapped as a JSON string so the caller always gets a parseable body.
pub fn relay_body(body: Bytes) -> Bytes {
    if serde_json::from_slice::<serde::de::IgnoredAny>(&body).is_ok() {
        return body;
    }
    let text = String::from_utf8_lossy(&body);
    match serde_json::to_vec(&text) {
        Ok(wrapped) => Bytes::from(wrapped),
        Err(_) => Bytes::from_static(b"\"\""),
    }
}
