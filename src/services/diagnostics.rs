// src/services/diagnostics.rs
use axum::http::{Method, StatusCode};

use crate::error::AppError;

/// One failed or non-2xx chat exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub method: Method,
    pub status: StatusCode,
    pub code: String,
    pub detail: String,
}

impl Failure {
    pub fn from_error(method: &Method, err: &AppError) -> Self {
        Self {
            method: method.clone(),
            status: err.status(),
            code: err.code().to_string(),
            detail: err.to_string(),
        }
    }

    /// An upstream answer that is relayed as-is but is not a success.
    pub fn upstream_status(method: &Method, status: StatusCode) -> Self {
        Self {
            method: method.clone(),
            status,
            code: "upstream_status".to_string(),
            detail: format!("upstream answered {status}"),
        }
    }
}

/// Where the proxy reports failures. Injected so tests can inspect what was emitted.
pub trait Diagnostics: Send + Sync {
    fn warn(&self, failure: &Failure);
    fn error(&self, failure: &Failure);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, failure: &Failure) {
        tracing::warn!(
            method = %failure.method,
            status = failure.status.as_u16(),
            code = %failure.code,
            "chat request failed: {}",
            failure.detail
        );
    }

    fn error(&self, failure: &Failure) {
        tracing::error!(
            method = %failure.method,
            status = failure.status.as_u16(),
            code = %failure.code,
            "chat request failed: {}",
            failure.detail
        );
    }
}
