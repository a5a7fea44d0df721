// src/state.rs
use std::sync::Arc;

use axum::http::Method;

use crate::config::Config;
use crate::error::AppError;
use crate::services::diagnostics::{Diagnostics, Failure};
use crate::services::upstream::UpstreamClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub upstream: Arc<dyn UpstreamClient>,
    pub diagnostics: Arc<dyn Diagnostics>,
}

impl AppState {
    pub fn new(
        config: Config,
        upstream: Arc<dyn UpstreamClient>,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            config,
            upstream,
            diagnostics,
        }
    }

    /// Log an error at the level its kind deserves and hand it back.
    pub fn report(&self, method: &Method, err: AppError) -> AppError {
        let failure = Failure::from_error(method, &err);
        if err.is_validation() {
            self.diagnostics.warn(&failure);
        } else {
            self.diagnostics.error(&failure);
        }
        err
    }
}
