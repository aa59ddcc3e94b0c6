use std::sync::Arc;

use anyhow::Result;

use crate::assessment::session::{SessionLimits, SessionScores};
use crate::config::Config;
use crate::roadmap::resources::{LiveResources, ResourceSource};
use crate::search_client::SearchClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Per-session quiz scores, keyed by the `x-session-id` header.
    pub scores: SessionScores,
    /// Videos and websites for roadmap entries. Default: `LiveResources`.
    pub resources: Arc<dyn ResourceSource>,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self> {
        let search = SearchClient::new(&config)?;
        Ok(Self {
            scores: SessionScores::new(config.demo_scores)
                .with_limits(SessionLimits::from(&config)),
            resources: Arc::new(LiveResources::new(search)),
            config,
        })
    }
}
