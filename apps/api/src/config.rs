use anyhow::{Context, Result};

/// Default upload cap for resume files (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Search API credentials are optional; without them the roadmap falls back
/// to templated resources.
#[derive(Debug, Clone)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub external_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Serve canned quiz scores for sessions that have none yet.
    pub demo_scores: bool,
    /// Sessions untouched for this long are dropped.
    pub session_idle_timeout_secs: u64,
    pub session_cleanup_interval_secs: u64,
    pub max_sessions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_sessions = std::env::var("MAX_SESSIONS")
            .unwrap_or_else(|_| "10000".to_string())
            .parse::<usize>()
            .context("MAX_SESSIONS must be a whole number")?;
        if max_sessions == 0 {
            anyhow::bail!("MAX_SESSIONS must be at least 1");
        }

        Ok(Config {
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            google_api_key: optional_env("GOOGLE_API_KEY"),
            search_engine_id: optional_env("SEARCH_ENGINE_ID"),
            external_timeout_secs: std::env::var("EXTERNAL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "5".to_string())
                .parse::<u64>()
                .context("EXTERNAL_TIMEOUT_SECS must be a whole number of seconds")?,
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            demo_scores: std::env::var("DEMO_SCORES")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            session_idle_timeout_secs: std::env::var("SESSION_IDLE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_TIMEOUT_SECS must be a whole number of seconds")?,
            session_cleanup_interval_secs: std::env::var("SESSION_CLEANUP_INTERVAL_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .context("SESSION_CLEANUP_INTERVAL_SECS must be a positive number of seconds")?,
            max_sessions,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// True when the video search API can be called.
    pub fn video_search_enabled(&self) -> bool {
        self.youtube_api_key.is_some()
    }

    /// Web search needs both the API key and the custom search engine id.
    pub fn web_search_enabled(&self) -> bool {
        self.google_api_key.is_some() && self.search_engine_id.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            youtube_api_key: None,
            google_api_key: None,
            search_engine_id: None,
            external_timeout_secs: 5,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            demo_scores: false,
            session_idle_timeout_secs: 3600,
            session_cleanup_interval_secs: 60,
            max_sessions: 10_000,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

/// Reads an env var, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_search_providers() {
        let config = Config::default();
        assert!(!config.video_search_enabled());
        assert!(!config.web_search_enabled());
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.external_timeout_secs, 5);
        assert_eq!(config.session_idle_timeout_secs, 3600);
        assert_eq!(config.max_sessions, 10_000);
    }

    #[test]
    fn test_web_search_requires_engine_id() {
        let config = Config {
            google_api_key: Some("key".to_string()),
            ..Config::default()
        };
        assert!(!config.web_search_enabled());

        let config = Config {
            search_engine_id: Some("cx".to_string()),
            ..config
        };
        assert!(config.web_search_enabled());
    }
}
