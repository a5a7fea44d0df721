// src/routes/mod.rs
pub mod chat;
pub mod health;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::chat_handler;
use health::health_handler;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// API routes plus the frontend in `public_dir`. Unknown GET paths get
/// `index.html` so the client-side router can take over.
pub fn create_router(public_dir: &Path) -> Router<SharedState> {
    let spa = ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
