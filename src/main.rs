use std::sync::Arc;

use chat_ui_proxy::{
    config::Config,
    routes,
    services::{diagnostics::TracingDiagnostics, upstream::ReqwestUpstream},
    state::AppState,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_ui_proxy=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    if config.api_key.is_empty() {
        warn!("API_KEY is not set; upstream requests will carry an empty key");
    }

    let upstream = ReqwestUpstream::new(&config)?;
    let addr = config.bind_addr();
    let public_dir = config.public_dir.clone();

    info!(api_url = %config.api_url, "forwarding chat requests");
    info!(api_key = %config.masked_api_key(), "using API key");

    let state = Arc::new(AppState::new(
        config,
        Arc::new(upstream),
        Arc::new(TracingDiagnostics),
    ));
    let app = routes::create_router(&public_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Chat UI server running at http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down");
}
