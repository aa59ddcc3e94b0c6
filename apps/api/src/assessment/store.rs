//! Session Score Store: append-only quiz results for one session.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::assessment::level::{classify, ProficiencyLevel};

/// A finished quiz as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(alias = "skill_name")]
    pub skill_name: String,
    pub score: u32,
    #[serde(alias = "max_score")]
    pub max_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizScoreRecord {
    pub id: String,
    pub skill_name: String,
    pub score: u32,
    pub max_score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveReceipt {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    #[error("skillName cannot be empty")]
    EmptySkill,

    #[error("maxScore must be greater than zero")]
    ZeroMaxScore,

    #[error("score {score} exceeds maxScore {max_score}")]
    ScoreAboveMax { score: u32, max_score: u32 },
}

impl QuizResult {
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.skill_name.trim().is_empty() {
            return Err(ScoreError::EmptySkill);
        }
        if self.max_score == 0 {
            return Err(ScoreError::ZeroMaxScore);
        }
        if self.score > self.max_score {
            return Err(ScoreError::ScoreAboveMax {
                score: self.score,
                max_score: self.max_score,
            });
        }
        Ok(())
    }
}

/// Quiz records of a single session, in submission order.
#[derive(Debug, Clone, Default)]
pub struct ScoreStore {
    records: Vec<QuizScoreRecord>,
}

impl ScoreStore {
    pub fn save(&mut self, result: QuizResult) -> Result<SaveReceipt, ScoreError> {
        result.validate()?;

        let id = Uuid::new_v4().to_string();
        self.records.push(QuizScoreRecord {
            id: id.clone(),
            skill_name: result.skill_name.trim().to_string(),
            score: result.score,
            max_score: result.max_score,
            completed_at: Utc::now(),
        });

        Ok(SaveReceipt { success: true, id })
    }

    pub fn all(&self) -> Vec<QuizScoreRecord> {
        self.records.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Best record per skill name, skills in first-submission order. On equal
    /// scores the earlier record is kept.
    pub fn highest(&self) -> Vec<QuizScoreRecord> {
        highest_per_skill(&self.records)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

pub fn highest_per_skill(records: &[QuizScoreRecord]) -> Vec<QuizScoreRecord> {
    let mut order: Vec<&str> = Vec::new();
    let mut best: HashMap<&str, &QuizScoreRecord> = HashMap::new();

    for record in records {
        let name = record.skill_name.as_str();
        let is_better = best.get(name).map_or(true, |current| record.score > current.score);
        if !best.contains_key(name) {
            order.push(name);
        }
        if is_better {
            best.insert(name, record);
        }
    }

    order
        .into_iter()
        .filter_map(|skill| best.get(skill).map(|r| (*r).clone()))
        .collect()
}

/// Classifies each record; records with a zero max score are skipped.
pub fn levels_for(records: &[QuizScoreRecord]) -> BTreeMap<String, ProficiencyLevel> {
    records
        .iter()
        .filter_map(|r| {
            classify(r.score as f64, r.max_score as f64)
                .ok()
                .map(|level| (r.skill_name.clone(), level))
        })
        .collect()
}

/// Canned scores shown to a fresh session when demo mode is on.
pub fn demo_records() -> Vec<QuizScoreRecord> {
    let now = Utc::now();
    [("1", "JavaScript", 80), ("2", "React", 65), ("3", "Python", 90)]
        .into_iter()
        .map(|(id, skill, score)| QuizScoreRecord {
            id: id.to_string(),
            skill_name: skill.to_string(),
            score,
            max_score: 100,
            completed_at: now,
        })
        .collect()
}
