#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz_service;
pub mod sessions;
pub mod stats_service;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizServiceError, SessionError, StatsError};
pub use quiz_service::{QuizDetail, QuizFilter, QuizService};
pub use sessions::{
    AnswerRecord, PendingAnswer, SessionAnswerResult, SessionLoopService, SessionOutcome,
    SessionPhase, SessionProgress, StudySession, TimelineEntry, TimelineStatus,
};
pub use stats_service::{Dashboard, RECENT_SESSIONS, StatsService};
