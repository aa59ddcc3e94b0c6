// Quiz side of the pipeline: proficiency thresholds, per-session score stores
// and the endpoints that read and write them.

pub mod handlers;
pub mod level;
pub mod quizzes;
pub mod session;
pub mod store;
