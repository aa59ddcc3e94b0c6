//! Axum route handlers for quiz scores and score classification.

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::assessment::level::{classify, percentage, ProficiencyLevel};
use crate::assessment::quizzes::{
    all_quizzes, find_quiz, Quiz, QuizSubmission, QuizSummary, QuizView,
};
use crate::assessment::session::SessionId;
use crate::assessment::store::{QuizResult, QuizScoreRecord, SaveReceipt};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub score: f64,
    #[serde(alias = "max_score")]
    pub max_score: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub level: ProficiencyLevel,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrade {
    pub id: String,
    pub skill_name: String,
    pub score: u32,
    pub max_score: u32,
    pub level: ProficiencyLevel,
}

fn quiz_or_404(skill: &str) -> Result<&'static Quiz, AppError> {
    find_quiz(skill).ok_or_else(|| AppError::NotFound(format!("No quiz for skill '{skill}'")))
}

/// GET /api/quizzes
pub async fn handle_list_quizzes() -> Json<Vec<QuizSummary>> {
    Json(all_quizzes().iter().map(Quiz::summary).collect())
}

/// GET /api/quizzes/:skill
pub async fn handle_get_quiz(Path(skill): Path<String>) -> Result<Json<QuizView>, AppError> {
    Ok(Json(quiz_or_404(&skill)?.view()))
}

/// POST /api/quizzes/:skill/submit
///
/// Grades the chosen options and records the result for the session.
pub async fn handle_submit_quiz(
    State(state): State<AppState>,
    session: SessionId,
    Path(skill): Path<String>,
    payload: Result<Json<QuizSubmission>, JsonRejection>,
) -> Result<Json<QuizGrade>, AppError> {
    let quiz = quiz_or_404(&skill)?;
    let Json(submission) = payload?;

    let result = quiz.grade(&submission.answers);
    let level = classify(f64::from(result.score), f64::from(result.max_score))?;
    let (score, max_score) = (result.score, result.max_score);
    let receipt = state.scores.save(&session, result).await?;

    info!(quiz = quiz.slug, score, max_score, %level, "Quiz graded");
    Ok(Json(QuizGrade {
        id: receipt.id,
        skill_name: quiz.skill_name.to_string(),
        score,
        max_score,
        level,
    }))
}

/// POST /api/quiz-scores
pub async fn handle_save_score(
    State(state): State<AppState>,
    session: SessionId,
    payload: Result<Json<QuizResult>, JsonRejection>,
) -> Result<Json<SaveReceipt>, AppError> {
    let Json(result) = payload?;
    let skill = result.skill_name.clone();
    let receipt = state.scores.save(&session, result).await?;
    info!(skill = %skill, id = %receipt.id, "Quiz score saved");
    Ok(Json(receipt))
}

/// GET /api/quiz-scores
pub async fn handle_list_scores(
    State(state): State<AppState>,
    session: SessionId,
) -> Json<Vec<QuizScoreRecord>> {
    Json(state.scores.all(&session).await)
}

/// GET /api/quiz-scores/highest
pub async fn handle_highest_scores(
    State(state): State<AppState>,
    session: SessionId,
) -> Json<Vec<QuizScoreRecord>> {
    Json(state.scores.highest(&session).await)
}

/// GET /api/quiz-scores/levels
///
/// Skill → level derived from each skill's best score; feeds `skillLevels`
/// of a roadmap request.
pub async fn handle_score_levels(
    State(state): State<AppState>,
    session: SessionId,
) -> Json<BTreeMap<String, ProficiencyLevel>> {
    Json(state.scores.levels(&session).await)
}

/// DELETE /api/quiz-scores
pub async fn handle_clear_scores(State(state): State<AppState>, session: SessionId) -> Json<Value> {
    state.scores.clear(&session).await;
    Json(json!({ "success": true }))
}

/// POST /api/classify
pub async fn handle_classify(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, AppError> {
    let Json(request) = payload?;
    let level = classify(request.score, request.max_score)?;
    let percentage = percentage(request.score, request.max_score)?;
    Ok(Json(ClassifyResponse { level, percentage }))
}
