//! Search Client: the single point of entry for outbound search API calls.
//!
//! Wraps the YouTube Data API v3 search endpoint (videos) and the Google Custom
//! Search JSON API (websites). Both are optional: a missing credential is
//! reported as `SearchError::NotConfigured` and callers fall back to templated
//! content. There are no retries; every request is bounded by the configured
//! timeout.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

const YOUTUBE_SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";
const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
/// Results requested from each API per query.
pub const MAX_RESULTS: usize = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{0} search is not configured")]
    NotConfigured(&'static str),
}

/// One video from the YouTube search response.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoHit {
    pub id: VideoId,
    pub snippet: VideoSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnails {
    pub medium: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

impl VideoHit {
    pub fn watch_url(&self) -> Option<String> {
        self.id
            .video_id
            .as_deref()
            .map(|id| format!("https://www.youtube.com/watch?v={id}"))
    }

    pub fn thumbnail_url(&self) -> Option<String> {
        self.snippet
            .thumbnails
            .as_ref()
            .and_then(|t| t.medium.as_ref())
            .map(|m| m.url.clone())
    }
}

/// One result from the Custom Search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebHit {
    pub link: String,
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub display_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    items: Vec<VideoHit>,
}

/// Custom Search omits `items` entirely when nothing matched.
#[derive(Debug, Deserialize)]
struct WebSearchResponse {
    #[serde(default)]
    items: Vec<WebHit>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// The single search client used by the roadmap resolver.
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    youtube_api_key: Option<String>,
    google_api_key: Option<String>,
    search_engine_id: Option<String>,
    youtube_url: String,
    custom_search_url: String,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.external_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            youtube_api_key: config.youtube_api_key.clone(),
            google_api_key: config.google_api_key.clone(),
            search_engine_id: config.search_engine_id.clone(),
            youtube_url: YOUTUBE_SEARCH_URL.to_string(),
            custom_search_url: CUSTOM_SEARCH_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn with_endpoints(mut self, youtube_url: &str, custom_search_url: &str) -> Self {
        self.youtube_url = youtube_url.to_string();
        self.custom_search_url = custom_search_url.to_string();
        self
    }

    pub fn video_search_enabled(&self) -> bool {
        self.youtube_api_key.is_some()
    }

    pub fn web_search_enabled(&self) -> bool {
        self.google_api_key.is_some() && self.search_engine_id.is_some()
    }

    /// Searches YouTube, asking for [`MAX_RESULTS`] videos, most relevant first.
    /// Callers cap the list themselves; the API may return more.
    pub async fn search_videos(&self, query: &str) -> Result<Vec<VideoHit>, SearchError> {
        let key = self
            .youtube_api_key
            .as_deref()
            .ok_or(SearchError::NotConfigured("video"))?;
        let max_results = MAX_RESULTS.to_string();

        let response = self
            .client
            .get(&self.youtube_url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("order", "relevance"),
                ("key", key),
            ])
            .send()
            .await?;

        let body: VideoSearchResponse = read_json(response).await?;
        debug!(query, results = body.items.len(), "Video search succeeded");
        Ok(body.items)
    }

    /// Searches the web, asking for [`MAX_RESULTS`] pages.
    pub async fn search_web(&self, query: &str) -> Result<Vec<WebHit>, SearchError> {
        let (key, cx) = match (self.google_api_key.as_deref(), self.search_engine_id.as_deref()) {
            (Some(key), Some(cx)) => (key, cx),
            _ => return Err(SearchError::NotConfigured("web")),
        };
        let num = MAX_RESULTS.to_string();

        let response = self
            .client
            .get(&self.custom_search_url)
            .query(&[("q", query), ("key", key), ("cx", cx), ("num", num.as_str())])
            .send()
            .await?;

        let body: WebSearchResponse = read_json(response).await?;
        debug!(query, results = body.items.len(), "Web search succeeded");
        Ok(body.items)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, SearchError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        });
    }
    Ok(response.json().await?)
}

/// Google APIs wrap failures as `{"error": {"message": ...}}`; fall back to the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GoogleError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use serde_json::{json, Value};

    const VIDEO_JSON: &str = r#"{
        "items": [{
            "id": {"kind": "youtube#video", "videoId": "abc123"},
            "snippet": {
                "title": "Rust for Beginners",
                "description": "Start here",
                "channelTitle": "Rustaceans",
                "publishedAt": "2024-03-01T00:00:00Z",
                "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/abc123/mqdefault.jpg"}}
            }
        }]
    }"#;

    fn keyed_config() -> Config {
        Config {
            youtube_api_key: Some("yt-key".to_string()),
            google_api_key: Some("g-key".to_string()),
            search_engine_id: Some("cx".to_string()),
            ..Config::default()
        }
    }

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_video_response_parses() {
        let body: VideoSearchResponse = serde_json::from_str(VIDEO_JSON).unwrap();
        let hit = &body.items[0];
        assert_eq!(hit.watch_url().as_deref(), Some("https://www.youtube.com/watch?v=abc123"));
        assert_eq!(hit.snippet.channel_title.as_deref(), Some("Rustaceans"));
        assert!(hit.thumbnail_url().unwrap().contains("mqdefault"));
    }

    #[test]
    fn test_web_response_without_items_is_empty() {
        let body: WebSearchResponse =
            serde_json::from_str(r#"{"kind": "customsearch#search"}"#).unwrap();
        assert!(body.items.is_empty());
    }

    #[test]
    fn test_api_error_message_extraction() {
        let body = r#"{"error": {"code": 403, "message": "quota exceeded"}}"#;
        assert_eq!(api_error_message(body), "quota exceeded");
        assert_eq!(api_error_message("plain failure"), "plain failure");
    }

    #[tokio::test]
    async fn test_unconfigured_searches_fail_fast() {
        let client = SearchClient::new(&Config::default()).unwrap();
        assert!(matches!(
            client.search_videos("rust").await,
            Err(SearchError::NotConfigured("video"))
        ));
        assert!(matches!(
            client.search_web("rust").await,
            Err(SearchError::NotConfigured("web"))
        ));
    }

    #[tokio::test]
    async fn test_search_calls_stub_endpoints() {
        let video: Value = serde_json::from_str(VIDEO_JSON).unwrap();
        let router = Router::new()
            .route("/youtube", get(move || async move { Json(video) }))
            .route(
                "/search",
                get(|| async {
                    Json(json!({"items": [{
                        "link": "https://doc.rust-lang.org/book/",
                        "title": "The Rust Book",
                        "snippet": "Learn Rust",
                        "displayLink": "doc.rust-lang.org"
                    }]}))
                }),
            );
        let base = spawn_stub(router).await;

        let client = SearchClient::new(&keyed_config())
            .unwrap()
            .with_endpoints(&format!("{base}/youtube"), &format!("{base}/search"));

        let videos = client.search_videos("rust tutorial").await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].snippet.title, "Rust for Beginners");

        let pages = client.search_web("learn rust").await.unwrap();
        assert_eq!(pages[0].display_link.as_deref(), Some("doc.rust-lang.org"));
    }

    #[tokio::test]
    async fn test_api_failure_surfaces_status() {
        let router = Router::new().route(
            "/youtube",
            get(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    Json(json!({"error": {"message": "API key not valid"}})),
                )
            }),
        );
        let base = spawn_stub(router).await;
        let client = SearchClient::new(&keyed_config())
            .unwrap()
            .with_endpoints(&format!("{base}/youtube"), &format!("{base}/search"));

        match client.search_videos("rust").await {
            Err(SearchError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
