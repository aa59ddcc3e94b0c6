//! Roadmap Content Resolver: assembles one roadmap entry per skill.
//!
//! Entries are built fresh per request. Static content (learning path, practice
//! platform, books) comes from lookup tables; videos and websites come from the
//! configured [`ResourceSource`].

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::assessment::level::ProficiencyLevel;
use crate::roadmap::books::{recommended_books, Book};
use crate::roadmap::learning_path::learning_path;
use crate::roadmap::practice::{practice_platform, PracticeResource};
use crate::roadmap::resources::{Resource, ResourceSource};

/// Serialized with the display keys the roadmap view reads.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RoadmapEntry {
    #[serde(rename = "Skill Level")]
    pub level: ProficiencyLevel,
    #[serde(rename = "Learning Path")]
    pub learning_path: Vec<String>,
    #[serde(rename = "Top YouTube Tutorials")]
    pub videos: Vec<Resource>,
    #[serde(rename = "Best Learning Websites")]
    pub websites: Vec<Resource>,
    #[serde(rename = "Practice Platform")]
    pub practice_platform: PracticeResource,
    #[serde(rename = "Recommended Books")]
    pub books: Vec<Book>,
}

pub async fn resolve(
    source: &dyn ResourceSource,
    skill: &str,
    level: ProficiencyLevel,
) -> RoadmapEntry {
    let (videos, websites) = tokio::join!(source.videos(skill, level), source.websites(skill, level));
    debug!(
        skill,
        %level,
        videos = videos.len(),
        websites = websites.len(),
        "Resolved roadmap entry"
    );

    RoadmapEntry {
        level,
        learning_path: learning_path(skill, level),
        videos,
        websites,
        practice_platform: practice_platform(skill, level),
        books: recommended_books(skill, level),
    }
}

/// Skill → entry, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Roadmap {
    entries: Vec<(String, RoadmapEntry)>,
}

impl Roadmap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Roadmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (skill, entry) in &self.entries {
            map.serialize_entry(skill, entry)?;
        }
        map.end()
    }
}

/// Resolves every `(skill, level)` pair in order. Callers dedupe skills.
pub async fn build_roadmap(
    source: &dyn ResourceSource,
    requests: Vec<(String, ProficiencyLevel)>,
) -> Roadmap {
    let mut entries = Vec::with_capacity(requests.len());
    for (skill, level) in requests {
        let entry = resolve(source, &skill, level).await;
        entries.push((skill, entry));
    }
    Roadmap { entries }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Offline source returning one canned item per kind.
    pub(crate) struct StubResources;

    #[async_trait]
    impl ResourceSource for StubResources {
        async fn videos(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
            vec![stub(&format!("{skill} {level} video"), "YouTube")]
        }

        async fn websites(&self, skill: &str, level: ProficiencyLevel) -> Vec<Resource> {
            vec![stub(&format!("{skill} {level} site"), "Web")]
        }
    }

    fn stub(title: &str, platform: &str) -> Resource {
        Resource {
            title: title.to_string(),
            url: "https://example.com".to_string(),
            description: title.to_string(),
            platform: platform.to_string(),
            thumbnail: None,
            channel_title: None,
            published_at: None,
            display_link: None,
        }
    }

    struct FailingResources;

    #[async_trait]
    impl ResourceSource for FailingResources {
        async fn videos(&self, _skill: &str, _level: ProficiencyLevel) -> Vec<Resource> {
            Vec::new()
        }

        async fn websites(&self, _skill: &str, _level: ProficiencyLevel) -> Vec<Resource> {
            Vec::new()
        }
    }

    #[tokio::test]
    async fn test_known_skill_entry() {
        let entry = resolve(&StubResources, "Python", ProficiencyLevel::Advanced).await;
        assert_eq!(entry.level, ProficiencyLevel::Advanced);
        assert_eq!(entry.learning_path[0], "Master advanced language features");
        assert_eq!(entry.practice_platform.title, "LeetCode Python Problems");
        assert_eq!(entry.books[0].title, "Effective Python");
        assert_eq!(entry.videos[0].title, "Python advanced video");
        assert_eq!(entry.websites[0].title, "Python advanced site");
    }

    #[tokio::test]
    async fn test_unknown_skill_gets_defaults() {
        let entry = resolve(&StubResources, "Quantum Knitting", ProficiencyLevel::Beginner).await;
        assert!(!entry.learning_path.is_empty());
        assert_eq!(entry.learning_path[0], "Learn the fundamentals and basic concepts");
        assert_eq!(entry.practice_platform.platform, "freeCodeCamp");
        assert!(entry.books.is_empty());
    }

    #[tokio::test]
    async fn test_empty_sources_still_resolve() {
        let entry = resolve(&FailingResources, "React", ProficiencyLevel::Intermediate).await;
        assert!(entry.videos.is_empty());
        assert!(entry.websites.is_empty());
        assert_eq!(entry.practice_platform.title, "Frontend Mentor React Challenges");
    }

    #[tokio::test]
    async fn test_roadmap_serializes_in_request_order_with_display_keys() {
        let roadmap = build_roadmap(
            &StubResources,
            vec![
                ("React".to_string(), ProficiencyLevel::Beginner),
                ("Python".to_string(), ProficiencyLevel::Intermediate),
                ("Docker".to_string(), ProficiencyLevel::Advanced),
            ],
        )
        .await;
        assert_eq!(roadmap.len(), 3);

        let json = serde_json::to_string(&roadmap).unwrap();
        let react = json.find("\"React\"").unwrap();
        let python = json.find("\"Python\"").unwrap();
        let docker = json.find("\"Docker\"").unwrap();
        assert!(react < python && python < docker);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let python = &value["Python"];
        assert_eq!(python["Skill Level"], "intermediate");
        assert!(python["Learning Path"].is_array());
        assert!(python["Top YouTube Tutorials"].is_array());
        assert!(python["Best Learning Websites"].is_array());
        assert_eq!(python["Practice Platform"]["platform"], "Codewars");
        assert_eq!(python["Recommended Books"][0]["title"], "Fluent Python");
    }
}
