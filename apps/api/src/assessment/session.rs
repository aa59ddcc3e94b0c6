//! Session-scoped score registry and the `x-session-id` extractor.
//!
//! Each session owns its own [`ScoreStore`]; nothing is shared between sessions
//! and nothing outlives the process. Sessions idle longer than the configured
//! timeout are dropped by a background cleanup task, and the number of live
//! sessions is capped.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::assessment::level::ProficiencyLevel;
use crate::assessment::store::{
    demo_records, levels_for, QuizResult, QuizScoreRecord, SaveReceipt, ScoreError, ScoreStore,
};
use crate::config::Config;
use crate::errors::AppError;

pub const SESSION_HEADER: &str = "x-session-id";
const MAX_SESSION_ID_LEN: usize = 128;

/// Session identifier taken from the `x-session-id` request header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation(format!("{SESSION_HEADER} header is required")))?;

        if value.len() > MAX_SESSION_ID_LEN {
            return Err(AppError::Validation(format!(
                "{SESSION_HEADER} must be at most {MAX_SESSION_ID_LEN} characters"
            )));
        }

        Ok(SessionId(value.to_string()))
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Bounds on the session registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Live sessions kept at once. Saving for a new session beyond this
    /// evicts the least recently seen one.
    pub max_sessions: usize,
    /// Sessions untouched for this long are removed by `cleanup_idle`.
    pub idle_timeout: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            idle_timeout: Duration::from_secs(60 * 60),
        }
    }
}

impl From<&Config> for SessionLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_sessions: config.max_sessions,
            idle_timeout: Duration::from_secs(config.session_idle_timeout_secs),
        }
    }
}

struct SessionEntry {
    store: ScoreStore,
    last_seen: Instant,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            store: ScoreStore::default(),
            last_seen: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_seen = Instant::now();
    }
}

/// In-memory registry of per-session score stores, carried in `AppState`.
#[derive(Clone, Default)]
pub struct SessionScores {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    demo_scores: bool,
    limits: SessionLimits,
}

impl SessionScores {
    pub fn new(demo_scores: bool) -> Self {
        Self {
            sessions: Arc::default(),
            demo_scores,
            limits: SessionLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: SessionLimits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn save(
        &self,
        session: &SessionId,
        result: QuizResult,
    ) -> Result<SaveReceipt, ScoreError> {
        result.validate()?;
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&session.0) && sessions.len() >= self.limits.max_sessions {
            self.make_room(&mut sessions);
        }

        let entry = sessions
            .entry(session.0.clone())
            .or_insert_with(SessionEntry::new);
        entry.touch();
        entry.store.save(result)
    }

    pub async fn all(&self, session: &SessionId) -> Vec<QuizScoreRecord> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.0) {
            Some(entry) => {
                entry.touch();
                entry.store.all()
            }
            None => vec![],
        }
    }

    /// Best record per skill. An empty session gets the demo records when demo
    /// mode is on, otherwise an empty list.
    pub async fn highest(&self, session: &SessionId) -> Vec<QuizScoreRecord> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.0) {
            Some(entry) if !entry.store.is_empty() => {
                entry.touch();
                entry.store.highest()
            }
            _ if self.demo_scores => demo_records(),
            _ => vec![],
        }
    }

    pub async fn levels(&self, session: &SessionId) -> BTreeMap<String, ProficiencyLevel> {
        levels_for(&self.highest(session).await)
    }

    pub async fn clear(&self, session: &SessionId) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session.0);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Cleanup idle sessions
    ///
    /// Removes every session not seen within the idle timeout and returns how
    /// many were dropped.
    pub async fn cleanup_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        let timeout = self.limits.idle_timeout;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < timeout);
        before - sessions.len()
    }

    /// Frees one slot for a new session: idle sessions go first, then the
    /// least recently seen one.
    fn make_room(&self, sessions: &mut HashMap<String, SessionEntry>) {
        let timeout = self.limits.idle_timeout;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < timeout);
        if sessions.len() < self.limits.max_sessions {
            return;
        }

        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            warn!(
                session = %id,
                max_sessions = self.limits.max_sessions,
                "Session limit reached, evicting least recently seen session"
            );
            sessions.remove(&id);
        }
    }
}

/// Spawn a background task that periodically drops idle sessions
pub fn spawn_session_cleanup_task(
    scores: SessionScores,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = scores.cleanup_idle().await;
            if removed > 0 {
                info!(removed = removed, "Cleaned up idle sessions");
            } else {
                debug!("No idle sessions to clean up");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(skill: &str, score: u32) -> QuizResult {
        QuizResult {
            skill_name: skill.to_string(),
            score,
            max_score: 100,
        }
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let scores = SessionScores::new(false);
        let alice = SessionId("alice".to_string());
        let bob = SessionId("bob".to_string());

        scores.save(&alice, result("Rust", 80)).await.unwrap();

        assert_eq!(scores.all(&alice).await.len(), 1);
        assert!(scores.all(&bob).await.is_empty());
        assert!(scores.highest(&bob).await.is_empty());
    }

    #[tokio::test]
    async fn test_highest_after_two_saves_for_same_skill() {
        let scores = SessionScores::new(false);
        let session = SessionId("s1".to_string());
        scores.save(&session, result("Python", 60)).await.unwrap();
        scores.save(&session, result("Python", 90)).await.unwrap();

        let highest = scores.highest(&session).await;
        assert_eq!(highest.len(), 1);
        assert_eq!(highest[0].score, 90);
    }

    #[tokio::test]
    async fn test_demo_records_only_for_empty_session_in_demo_mode() {
        let demo = SessionScores::new(true);
        let session = SessionId("fresh".to_string());
        assert_eq!(demo.highest(&session).await.len(), 3);

        demo.save(&session, result("Go", 10)).await.unwrap();
        let highest = demo.highest(&session).await;
        assert_eq!(highest.len(), 1);
        assert_eq!(highest[0].skill_name, "Go");

        let plain = SessionScores::new(false);
        assert!(plain.highest(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_and_levels() {
        let scores = SessionScores::new(false);
        let session = SessionId("s2".to_string());
        scores.save(&session, result("SQL", 30)).await.unwrap();
        assert_eq!(
            scores.levels(&session).await.get("SQL"),
            Some(&ProficiencyLevel::Beginner)
        );

        scores.clear(&session).await;
        assert!(scores.all(&session).await.is_empty());
        assert!(scores.levels(&session).await.is_empty());
    }

    fn limits(max_sessions: usize, idle_secs: u64) -> SessionLimits {
        SessionLimits {
            max_sessions,
            idle_timeout: Duration::from_secs(idle_secs),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_sessions_are_cleaned_up() {
        let scores = SessionScores::new(false).with_limits(limits(100, 60));
        let alice = SessionId("alice".to_string());
        let bob = SessionId("bob".to_string());

        scores.save(&alice, result("Rust", 80)).await.unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;
        scores.save(&bob, result("Go", 50)).await.unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;

        assert_eq!(scores.cleanup_idle().await, 1);
        assert_eq!(scores.session_count().await, 1);
        assert!(scores.all(&alice).await.is_empty());
        assert_eq!(scores.all(&bob).await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_keep_a_session_alive() {
        let scores = SessionScores::new(false).with_limits(limits(100, 60));
        let session = SessionId("reader".to_string());
        scores.save(&session, result("SQL", 70)).await.unwrap();

        tokio::time::advance(Duration::from_secs(50)).await;
        assert_eq!(scores.highest(&session).await.len(), 1);
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(scores.cleanup_idle().await, 0);
        assert_eq!(scores.all(&session).await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_cap_evicts_least_recently_seen() {
        let scores = SessionScores::new(false).with_limits(limits(2, 3600));
        let a = SessionId("a".to_string());
        let b = SessionId("b".to_string());
        let c = SessionId("c".to_string());

        scores.save(&a, result("Rust", 10)).await.unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        scores.save(&b, result("Rust", 20)).await.unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        scores.save(&a, result("Go", 30)).await.unwrap();
        tokio::time::advance(Duration::from_secs(1)).await;
        scores.save(&c, result("Rust", 40)).await.unwrap();

        assert_eq!(scores.session_count().await, 2);
        assert!(scores.all(&b).await.is_empty());
        assert_eq!(scores.all(&a).await.len(), 2);
        assert_eq!(scores.all(&c).await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_result_does_not_open_a_session() {
        let scores = SessionScores::new(false).with_limits(limits(1, 3600));
        let kept = SessionId("kept".to_string());
        scores.save(&kept, result("Rust", 10)).await.unwrap();

        let bad = SessionId("bad".to_string());
        assert_eq!(
            scores.save(&bad, result("Rust", 200)).await,
            Err(ScoreError::ScoreAboveMax { score: 200, max_score: 100 })
        );
        assert_eq!(scores.session_count().await, 1);
        assert_eq!(scores.all(&kept).await.len(), 1);
    }

    #[tokio::test]
    async fn test_many_sessions_stay_bounded() {
        let scores = SessionScores::new(false).with_limits(limits(100, 3600));
        for i in 0..2_000 {
            let session = SessionId(format!("session-{i}"));
            scores.save(&session, result("Rust", 50)).await.unwrap();
        }
        assert_eq!(scores.session_count().await, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_drops_idle_sessions() {
        let scores = SessionScores::new(false).with_limits(limits(100, 60));
        let task = spawn_session_cleanup_task(scores.clone(), Duration::from_secs(10));
        let session = SessionId("idle".to_string());
        scores.save(&session, result("Python", 90)).await.unwrap();
        assert_eq!(scores.session_count().await, 1);

        tokio::time::sleep(Duration::from_secs(75)).await;

        assert_eq!(scores.session_count().await, 0);
        task.abort();
    }
}
