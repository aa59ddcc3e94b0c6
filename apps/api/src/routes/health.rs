use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "roadmap-api"
    }))
}

/// GET /api/service-status
/// Reports which search providers are configured. Unconfigured providers are
/// served from templated search links.
pub async fn service_status_handler(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "ok",
        "videoSearch": provider(config.video_search_enabled(), "youtube"),
        "webSearch": provider(config.web_search_enabled(), "google_custom_search"),
        "templatedFallback": !config.video_search_enabled() || !config.web_search_enabled(),
        "timeoutSecs": config.external_timeout_secs
    }))
}

fn provider(enabled: bool, name: &str) -> &str {
    if enabled {
        name
    } else {
        "templated"
    }
}
