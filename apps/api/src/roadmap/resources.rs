//! Video and website resources for a roadmap entry.
//!
//! `AppState` carries an `Arc<dyn ResourceSource>`. The live source calls the
//! search APIs and falls back, per kind, to templated search links when a
//! provider is not configured.

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;

use crate::assessment::level::ProficiencyLevel;
use crate::roadmap::ranking::{rank_resources, VIDEO_POPULARITY, WEBSITE_POPULARITY};
use crate::search_client::{SearchClient, VideoHit, WebHit, MAX_RESULTS};

/// A learning resource. `title`, `url` and `description` are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: String,
    pub url: String,
    pub description: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Supplies videos and websites for a skill at a level. Implementations never
/// fail: provider errors become an empty list.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn videos(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource>;

    async fn websites(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource>;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplatedResources: search links built from the skill name
// ────────────────────────────────────────────────────────────────────────────

pub struct TemplatedResources;

#[async_trait]
impl ResourceSource for TemplatedResources {
    async fn videos(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
        templated_videos(skill, level)
    }

    async fn websites(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
        templated_websites(skill, level)
    }
}

fn link(base: &str, params: &[(&str, String)]) -> String {
    reqwest::Url::parse_with_params(base, params)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| base.to_string())
}

pub fn templated_videos(skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
    let results = "https://www.youtube.com/results";
    vec![
        Resource {
            title: format!("Learn {skill} - Complete {} Tutorial", level.title()),
            url: link(results, &[("search_query", format!("{skill} {level} tutorial"))]),
            description: format!("Comprehensive {skill} tutorial for {level} learners"),
            platform: "YouTube".to_string(),
            thumbnail: None,
            channel_title: None,
            published_at: None,
            display_link: None,
        },
        Resource {
            title: format!("{skill} Projects for {}s", level.title()),
            url: link(results, &[("search_query", format!("{skill} {level} projects"))]),
            description: format!("Build real-world {skill} projects"),
            platform: "YouTube".to_string(),
            thumbnail: None,
            channel_title: None,
            published_at: None,
            display_link: None,
        },
    ]
}

pub fn templated_websites(skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
    vec![
        Resource {
            title: format!("{skill} Documentation and Tutorials"),
            url: link(
                "https://www.google.com/search",
                &[("q", format!("{skill} documentation tutorial"))],
            ),
            description: format!("Official documentation and tutorials for {skill}"),
            platform: "Various".to_string(),
            thumbnail: None,
            channel_title: None,
            published_at: None,
            display_link: Some("google.com".to_string()),
        },
        Resource {
            title: format!("{skill} Courses for {}s", level.title()),
            url: link(
                "https://www.udemy.com/courses/search/",
                &[
                    ("q", skill.to_string()),
                    ("instructional_level", level.to_string()),
                ],
            ),
            description: format!("Online courses to master {skill} at {level} level"),
            platform: "Udemy".to_string(),
            thumbnail: None,
            channel_title: None,
            published_at: None,
            display_link: Some("udemy.com".to_string()),
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// LiveResources: YouTube and Custom Search, re-ranked
// ────────────────────────────────────────────────────────────────────────────

pub struct LiveResources {
    client: SearchClient,
}

impl LiveResources {
    pub fn new(client: SearchClient) -> Self {
        Self { client }
    }
}

pub fn video_query(skill: &str, level: ProficiencyLevel) -> String {
    match level {
        ProficiencyLevel::Beginner => format!("{skill} tutorial for beginners"),
        ProficiencyLevel::Intermediate => format!("{skill} intermediate tutorial"),
        ProficiencyLevel::Advanced => format!("{skill} advanced tutorial"),
    }
}

pub fn website_query(skill: &str, level: ProficiencyLevel) -> String {
    match level {
        ProficiencyLevel::Beginner => format!("best website to learn {skill} for beginners"),
        ProficiencyLevel::Intermediate => format!("best {skill} intermediate tutorials"),
        ProficiencyLevel::Advanced => format!("advanced {skill} tutorials"),
    }
}

/// Hits without a video id (channels, playlists) are skipped.
fn video_resource(hit: VideoHit, skill: &str) -> Option<Resource> {
    let url = hit.watch_url()?;
    let thumbnail = hit.thumbnail_url();
    let snippet = hit.snippet;
    Some(Resource {
        title: non_empty(snippet.title, || format!("{skill} tutorial")),
        url,
        description: non_empty(snippet.description, || format!("A video tutorial on {skill}")),
        platform: "YouTube".to_string(),
        thumbnail,
        channel_title: snippet.channel_title,
        published_at: snippet.published_at,
        display_link: None,
    })
}

fn website_resource(hit: WebHit, skill: &str) -> Option<Resource> {
    if hit.link.trim().is_empty() {
        return None;
    }
    let platform = hit
        .display_link
        .clone()
        .unwrap_or_else(|| "Web".to_string());
    Some(Resource {
        title: non_empty(hit.title, || format!("Learn {skill}")),
        url: hit.link,
        description: non_empty(hit.snippet, || format!("A learning resource for {skill}")),
        platform,
        thumbnail: None,
        channel_title: None,
        published_at: None,
        display_link: hit.display_link,
    })
}

fn non_empty(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.trim().is_empty() {
        fallback()
    } else {
        value
    }
}

#[async_trait]
impl ResourceSource for LiveResources {
    async fn videos(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
        if !self.client.video_search_enabled() {
            return templated_videos(skill, level);
        }

        match self.client.search_videos(&video_query(skill, level)).await {
            Ok(hits) => {
                let resources = hits
                    .into_iter()
                    .filter_map(|hit| video_resource(hit, skill))
                    .collect();
                let mut ranked = rank_resources(resources, skill, level, VIDEO_POPULARITY);
                ranked.truncate(MAX_RESULTS);
                ranked
            }
            Err(e) => {
                warn!(skill, %level, "Video search failed: {e}");
                Vec::new()
            }
        }
    }

    async fn websites(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
        if !self.client.web_search_enabled() {
            return templated_websites(skill, level);
        }

        match self.client.search_web(&website_query(skill, level)).await {
            Ok(hits) => {
                let resources = hits
                    .into_iter()
                    .filter_map(|hit| website_resource(hit, skill))
                    .collect();
                let mut ranked = rank_resources(resources, skill, level, WEBSITE_POPULARITY);
                ranked.truncate(MAX_RESULTS);
                ranked
            }
            Err(e) => {
                warn!(skill, %level, "Web search failed: {e}");
                Vec::new()
            }
        }
    }
}
