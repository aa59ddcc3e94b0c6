//! Proficiency Classifier: maps a (score, max_score) pair to an ordinal level.
//!
//! The 40 / 75 percent thresholds are shared by every call site: quiz-derived
//! levels, score-based roadmap requests and the percent score input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Below this percentage a learner is a beginner.
pub const INTERMEDIATE_THRESHOLD: f64 = 40.0;
/// At or above this percentage a learner is advanced.
pub const ADVANCED_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 3] = [
        ProficiencyLevel::Beginner,
        ProficiencyLevel::Intermediate,
        ProficiencyLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "beginner",
            ProficiencyLevel::Intermediate => "intermediate",
            ProficiencyLevel::Advanced => "advanced",
        }
    }

    /// "Beginner", "Intermediate", "Advanced".
    pub fn title(&self) -> &'static str {
        match self {
            ProficiencyLevel::Beginner => "Beginner",
            ProficiencyLevel::Intermediate => "Intermediate",
            ProficiencyLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ClassifyError {
    #[error("max score must be greater than zero, got {0}")]
    NonPositiveMax(f64),

    #[error("score must be a finite number")]
    NotFinite,
}

/// Percentage of `score` out of `max_score`.
pub fn percentage(score: f64, max_score: f64) -> Result<f64, ClassifyError> {
    if !score.is_finite() || !max_score.is_finite() {
        return Err(ClassifyError::NotFinite);
    }
    if max_score <= 0.0 {
        return Err(ClassifyError::NonPositiveMax(max_score));
    }
    Ok(score / max_score * 100.0)
}

/// `< 40%` beginner, `40% ..< 75%` intermediate, `>= 75%` advanced.
pub fn classify(score: f64, max_score: f64) -> Result<ProficiencyLevel, ClassifyError> {
    percentage(score, max_score).map(level_for_percentage)
}

pub fn level_for_percentage(pct: f64) -> ProficiencyLevel {
    if pct < INTERMEDIATE_THRESHOLD {
        ProficiencyLevel::Beginner
    } else if pct < ADVANCED_THRESHOLD {
        ProficiencyLevel::Intermediate
    } else {
        ProficiencyLevel::Advanced
    }
}
