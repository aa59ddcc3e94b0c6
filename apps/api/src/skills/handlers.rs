//! Axum route handler for resume parsing.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::skills::extractor::{extract_text, ExtractError, Upload};
use crate::skills::matcher::{extract_skills, ExtractionOutcome};
use crate::skills::sections::{
    extract_education, extract_experience, EducationEntry, ExperienceEntry,
};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    #[serde(flatten)]
    pub outcome: ExtractionOutcome,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/parse-resume
///
/// Accepts a plain-text resume in multipart field `file`. Bad uploads are 400s;
/// text that is too short or has no recognizable skills is a 200 with
/// `success: false`.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or(ExtractError::MissingFile)?;

    let text = extract_text(&upload, state.config.max_upload_bytes)?;

    let response = tokio::task::spawn_blocking(move || parse_text(&text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume parsing task failed: {e}")))?;

    info!(
        success = response.outcome.success,
        skills = response.outcome.skills.len(),
        "Resume parsed"
    );

    Ok(Json(response))
}

fn parse_text(text: &str) -> ParseResumeResponse {
    let outcome = extract_skills(text);
    if !outcome.success {
        return ParseResumeResponse {
            outcome,
            education: vec![],
            experience: vec![],
            message: None,
        };
    }

    ParseResumeResponse {
        outcome,
        education: extract_education(text),
        experience: extract_experience(text),
        message: Some("Skills extracted successfully.".to_string()),
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read uploaded file: {e}")))?;
        return Ok(Some(Upload {
            file_name,
            content_type,
            data,
        }));
    }
    Ok(None)
}
