use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::{message::HealthResponse, state::SharedState};

/// GET /health - liveness of this process only; the upstream is not probed.
pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        api_url: state.config.api_url.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
