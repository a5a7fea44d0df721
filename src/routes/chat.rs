use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, relay_body},
    services::{diagnostics::Failure, upstream::UpstreamError},
    state::SharedState,
};

/// POST /api/chat - validate, forward to `<api_url>/chat`, relay the answer.
///
/// The upstream call lives inside this future. If the client goes away, hyper
/// drops the future and the outbound request is cancelled with it.
pub async fn chat_handler(
    State(state): State<SharedState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    let body = body.map_err(|rejection| {
        state.report(
            &method,
            AppError::InvalidBody {
                status: rejection.status(),
                reason: rejection.body_text(),
            },
        )
    })?;

    let request = ChatRequest::from_body(&body).map_err(|err| state.report(&method, err))?;

    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    forward(&state, &method, request).instrument(span).await
}

async fn forward(
    state: &SharedState,
    method: &Method,
    request: ChatRequest,
) -> Result<Response, AppError> {
    tracing::debug!(
        session_id = request.session_id.as_deref().unwrap_or("-"),
        "forwarding chat request"
    );

    let upstream = state.upstream.send(&request).await.map_err(|err| {
        let err = match err {
            UpstreamError::Unavailable(reason) => AppError::UpstreamUnavailable {
                api_url: state.config.api_url.clone(),
                reason,
            },
            UpstreamError::Request(reason) => AppError::Internal(reason),
        };
        state.report(method, err)
    })?;

    if !upstream.status.is_success() {
        state
            .diagnostics
            .warn(&Failure::upstream_status(method, upstream.status));
    }

    if is_bodiless(upstream.status) {
        return Ok(upstream.status.into_response());
    }

    Ok((
        upstream.status,
        [(header::CONTENT_TYPE, "application/json")],
        relay_body(upstream.body),
    )
        .into_response())
}

// Statuses that must not carry a body on the wire.
fn is_bodiless(status: StatusCode) -> bool {
    status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
}
