use std::sync::Arc;

use tracing::debug;

use api::{Backend, QuizRepository, SessionRepository};
use quiz_core::Clock;
use quiz_core::model::{DashboardStats, Quiz, QuizId, Session};

use crate::error::StatsError;

/// Number of sessions listed under "recent activity".
pub const RECENT_SESSIONS: usize = 5;

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub quiz_count: usize,
    pub flashcard_count: u64,
    /// Newest first.
    pub recent: Vec<Session>,
    pub quizzes: Vec<Quiz>,
}

impl Dashboard {
    /// Title for a quiz referenced by a session, if the quiz still exists.
    #[must_use]
    pub fn quiz_title(&self, id: QuizId) -> Option<&str> {
        self.quizzes
            .iter()
            .find(|quiz| quiz.id == id)
            .map(|quiz| quiz.title.as_str())
    }
}

/// Aggregates session history into dashboard statistics.
#[derive(Clone)]
pub struct StatsService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(
        clock: Clock,
        quizzes: Arc<dyn QuizRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            quizzes,
            sessions,
        }
    }

    #[must_use]
    pub fn from_backend(clock: Clock, backend: &Backend) -> Self {
        Self::new(
            clock,
            Arc::clone(&backend.quizzes),
            Arc::clone(&backend.sessions),
        )
    }

    /// # Errors
    ///
    /// Returns `StatsError::Api` if either listing fails.
    pub async fn dashboard(&self) -> Result<Dashboard, StatsError> {
        let quizzes = self.quizzes.list_quizzes().await?;
        let mut sessions = self.sessions.list_sessions(None).await?;
        let stats = DashboardStats::from_sessions(&sessions, self.clock.today());
        debug!(
            sessions = sessions.len(),
            quizzes = quizzes.len(),
            "dashboard aggregated"
        );

        sort_newest_first(&mut sessions);
        sessions.truncate(RECENT_SESSIONS);

        Ok(Dashboard {
            stats,
            quiz_count: quizzes.len(),
            flashcard_count: quizzes.iter().map(|q| u64::from(q.flashcard_count)).sum(),
            recent: sessions,
            quizzes,
        })
    }

    /// Sessions of one quiz, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Api` if the listing fails.
    pub async fn quiz_history(&self, quiz_id: QuizId) -> Result<Vec<Session>, StatsError> {
        let mut sessions = self.sessions.list_sessions(Some(quiz_id)).await?;
        sort_newest_first(&mut sessions);
        Ok(sessions)
    }
}

fn sort_newest_first(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
}
