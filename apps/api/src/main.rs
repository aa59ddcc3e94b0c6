mod assessment;
mod config;
mod errors;
mod roadmap;
mod routes;
mod search_client;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::session::spawn_session_cleanup_task;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Roadmap API v{}", env!("CARGO_PKG_VERSION"));

    info!(
        video_search = config.video_search_enabled(),
        web_search = config.web_search_enabled(),
        timeout_secs = config.external_timeout_secs,
        "Search providers configured"
    );
    if config.demo_scores {
        info!("Demo quiz scores enabled for empty sessions");
    }

    // Build app state (search client, session score registry)
    let state = AppState::from_config(config.clone())?;

    // Drop idle sessions in the background
    spawn_session_cleanup_task(
        state.scores.clone(),
        Duration::from_secs(config.session_cleanup_interval_secs),
    );
    info!(
        idle_timeout_secs = config.session_idle_timeout_secs,
        max_sessions = config.max_sessions,
        "Session cleanup task started"
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins to the front-end host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
