use std::sync::Arc;

use services::{QuizService, SessionLoopService, StatsService};

/// Services the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    /// Short description of where data comes from, shown in the sidebar.
    fn backend_label(&self) -> String;

    fn quizzes(&self) -> Arc<QuizService>;
    fn session_loop(&self) -> Arc<SessionLoopService>;
    fn stats(&self) -> Arc<StatsService>;
}

#[derive(Clone)]
pub struct AppContext {
    backend_label: String,
    quizzes: Arc<QuizService>,
    session_loop: Arc<SessionLoopService>,
    stats: Arc<StatsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            backend_label: app.backend_label(),
            quizzes: app.quizzes(),
            session_loop: app.session_loop(),
            stats: app.stats(),
        }
    }

    #[must_use]
    pub fn backend_label(&self) -> &str {
        &self.backend_label
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
