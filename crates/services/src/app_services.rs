use std::sync::Arc;

use tracing::info;

use api::{ApiConfig, Backend, InMemoryBackend};

use crate::Clock;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;
use crate::sessions::SessionLoopService;
use crate::stats_service::StatsService;

/// Assembles app-facing services over one backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    quizzes: Arc<QuizService>,
    session_loop: Arc<SessionLoopService>,
    stats: Arc<StatsService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, backend: &Backend, shuffle: bool) -> Self {
        Self {
            clock,
            quizzes: Arc::new(QuizService::from_backend(backend)),
            session_loop: Arc::new(
                SessionLoopService::from_backend(clock, backend).with_shuffle(shuffle),
            ),
            stats: Arc::new(StatsService::from_backend(clock, backend)),
        }
    }

    /// Build services talking to the REST backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP client cannot be configured.
    pub fn new_http(
        config: ApiConfig,
        clock: Clock,
        shuffle: bool,
    ) -> Result<Self, AppServicesError> {
        info!(base_url = %config.base_url(), "using REST backend");
        let backend = Backend::http(config)?;
        Ok(Self::new(clock, &backend, shuffle))
    }

    /// Build services over an in-memory backend seeded with a demo quiz.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if seeding fails.
    pub async fn new_offline(clock: Clock, shuffle: bool) -> Result<Self, AppServicesError> {
        let memory = InMemoryBackend::new().with_clock(clock);
        let quiz_id = memory.seed_demo().await?;
        info!(%quiz_id, "using in-memory backend with demo quiz");
        Ok(Self::new(clock, &Backend::from_shared(memory), shuffle))
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::quiz_service::QuizFilter;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn offline_services_share_one_backend() {
        let services = AppServices::new_offline(fixed_clock(), false).await.unwrap();
        let quizzes = services
            .quizzes()
            .list_quizzes(&QuizFilter::default())
            .await
            .unwrap();
        assert_eq!(quizzes.len(), 1);

        let dashboard = services.stats().dashboard().await.unwrap();
        assert_eq!(dashboard.quiz_count, 1);
        assert_eq!(dashboard.flashcard_count, 4);
    }

    #[test]
    fn http_services_build_without_network() {
        let config = ApiConfig::new("http://127.0.0.1:9/api").unwrap();
        assert!(AppServices::new_http(config, fixed_clock(), true).is_ok());
    }
}
