//! Axum route handler for roadmap generation.

use std::collections::{HashMap, HashSet};

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::assessment::level::{classify, ProficiencyLevel};
use crate::errors::AppError;
use crate::roadmap::resolver::{build_roadmap, Roadmap};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoadmapRequest {
    pub skills: Option<Vec<String>>,
    #[serde(alias = "skill_levels")]
    pub skill_levels: Option<HashMap<String, ProficiencyLevel>>,
    #[serde(default, alias = "skill_scores")]
    pub skill_scores: HashMap<String, SkillScore>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScore {
    pub score: f64,
    #[serde(alias = "max_score")]
    pub max_score: f64,
}

/// Level for each distinct skill, in request order.
///
/// Precedence: explicit level, then the classified score, then beginner.
/// Blank names are dropped and repeated names are resolved once. Map keys are
/// matched as sent first, then trimmed.
pub fn resolve_levels(
    skills: &[String],
    skill_levels: &HashMap<String, ProficiencyLevel>,
    skill_scores: &HashMap<String, SkillScore>,
) -> Result<Vec<(String, ProficiencyLevel)>, AppError> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for raw in skills {
        let skill = raw.trim();
        if skill.is_empty() || !seen.insert(skill) {
            continue;
        }

        let explicit = skill_levels
            .get(raw.as_str())
            .or_else(|| skill_levels.get(skill))
            .or_else(|| lookup_trimmed(skill_levels, skill));
        let score = skill_scores
            .get(raw.as_str())
            .or_else(|| skill_scores.get(skill))
            .or_else(|| lookup_trimmed(skill_scores, skill));

        let level = match (explicit, score) {
            (Some(level), _) => *level,
            (None, Some(s)) => classify(s.score, s.max_score)?,
            (None, None) => ProficiencyLevel::Beginner,
        };
        resolved.push((skill.to_string(), level));
    }

    Ok(resolved)
}

fn lookup_trimmed<'a, V>(map: &'a HashMap<String, V>, skill: &str) -> Option<&'a V> {
    map.iter()
        .find(|(key, _)| key.trim() == skill)
        .map(|(_, value)| value)
}

/// POST /api/generate-roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRoadmapRequest>, JsonRejection>,
) -> Result<Json<Roadmap>, AppError> {
    let Json(req) = payload?;

    let (Some(skills), Some(skill_levels)) = (req.skills, req.skill_levels) else {
        return Err(AppError::Validation(
            "Skills and skill levels are required".to_string(),
        ));
    };

    let requests = resolve_levels(&skills, &skill_levels, &req.skill_scores)?;
    let roadmap = build_roadmap(state.resources.as_ref(), requests).await;

    if roadmap.is_empty() {
        info!("Roadmap requested with no skills");
    } else {
        info!(skills = roadmap.len(), "Roadmap generated");
    }
    Ok(Json(roadmap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_level_precedence() {
        let skills = names(&["Python", "React", "Go"]);
        let levels = HashMap::from([("Python".to_string(), ProficiencyLevel::Advanced)]);
        let scores = HashMap::from([
            (
                "Python".to_string(),
                SkillScore { score: 0.0, max_score: 10.0 },
            ),
            (
                "React".to_string(),
                SkillScore { score: 3.0, max_score: 4.0 },
            ),
        ]);

        let resolved = resolve_levels(&skills, &levels, &scores).unwrap();
        assert_eq!(
            resolved,
            vec![
                ("Python".to_string(), ProficiencyLevel::Advanced),
                ("React".to_string(), ProficiencyLevel::Advanced),
                ("Go".to_string(), ProficiencyLevel::Beginner),
            ]
        );
    }

    #[test]
    fn test_duplicates_and_blanks_resolved_once() {
        let skills = names(&["Rust", " ", "Rust", "SQL"]);
        let resolved = resolve_levels(&skills, &HashMap::new(), &HashMap::new()).unwrap();
        let skills: Vec<&str> = resolved.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_invalid_score_is_rejected() {
        let skills = names(&["Rust"]);
        let scores = HashMap::from([(
            "Rust".to_string(),
            SkillScore { score: 1.0, max_score: 0.0 },
        )]);
        let result = resolve_levels(&skills, &HashMap::new(), &scores);
        assert!(matches!(result, Err(AppError::Score(_))));
    }

    #[test]
    fn test_request_accepts_camel_case() {
        let req: GenerateRoadmapRequest = serde_json::from_str(
            r#"{"skills": ["Go"], "skillLevels": {"Go": "intermediate"},
                "skillScores": {"Go": {"score": 1, "maxScore": 2}}}"#,
        )
        .unwrap();
        assert_eq!(
            req.skill_levels.unwrap()["Go"],
            ProficiencyLevel::Intermediate
        );
        assert_eq!(req.skill_scores["Go"].max_score, 2.0);
    }

    #[test]
    fn test_padded_names_match_padded_or_trimmed_keys() {
        let skills = names(&[" Go", "Rust "]);
        let levels = HashMap::from([(" Go".to_string(), ProficiencyLevel::Advanced)]);
        let scores = HashMap::from([(
            " Rust".to_string(),
            SkillScore { score: 5.0, max_score: 10.0 },
        )]);

        let resolved = resolve_levels(&skills, &levels, &scores).unwrap();
        assert_eq!(
            resolved,
            vec![
                ("Go".to_string(), ProficiencyLevel::Advanced),
                ("Rust".to_string(), ProficiencyLevel::Intermediate),
            ]
        );
    }
}
