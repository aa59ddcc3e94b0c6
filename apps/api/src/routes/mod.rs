pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::roadmap::handlers as roadmap;
use crate::skills::handlers as skills;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/service-status", get(health::service_status_handler))
        // Resume parsing
        .route("/api/parse-resume", post(skills::handle_parse_resume))
        // Roadmap
        .route(
            "/api/generate-roadmap",
            post(roadmap::handle_generate_roadmap),
        )
        // Quiz scores
        .route(
            "/api/quiz-scores",
            post(assessment::handle_save_score)
                .get(assessment::handle_list_scores)
                .delete(assessment::handle_clear_scores),
        )
        .route(
            "/api/quiz-scores/highest",
            get(assessment::handle_highest_scores),
        )
        .route(
            "/api/quiz-scores/levels",
            get(assessment::handle_score_levels),
        )
        .route("/api/classify", post(assessment::handle_classify))
        // Quiz bank
        .route("/api/quizzes", get(assessment::handle_list_quizzes))
        .route("/api/quizzes/:skill", get(assessment::handle_get_quiz))
        .route(
            "/api/quizzes/:skill/submit",
            post(assessment::handle_submit_quiz),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
