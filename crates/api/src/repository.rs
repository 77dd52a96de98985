use async_trait::async_trait;
use quiz_core::model::{
    AnswerEvaluation, Flashcard, FlashcardDraft, FlashcardId, Quiz, QuizDraft, QuizId, Session,
    SessionCompletion, SessionId, SessionMode, UserAnswer,
};
use std::sync::Arc;
use thiserror::Error;

use crate::http::{ApiConfig, HttpBackend};
use crate::memory::InMemoryBackend;

/// Errors surfaced by backend adapters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("unauthorized")]
    Unauthorized,

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Map a non-success HTTP status to the closest variant.
    #[must_use]
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 => Self::NotFound,
            409 => Self::Conflict,
            401 | 403 => Self::Unauthorized,
            _ => Self::Status {
                status,
                message: message.into(),
            },
        }
    }
}

/// Quiz listing and editing endpoints.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the draft.
    async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, ApiError>;

    /// Delete a quiz together with its flashcards.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), ApiError>;
}

/// Flashcard endpoints, scoped to their owning quiz.
#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Flashcards of a quiz in backend order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown quiz, or other request errors.
    async fn list_flashcards(&self, quiz_id: QuizId) -> Result<Vec<Flashcard>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn create_flashcard(
        &self,
        quiz_id: QuizId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn update_flashcard(
        &self,
        id: FlashcardId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn delete_flashcard(&self, id: FlashcardId) -> Result<(), ApiError>;
}

/// Session lifecycle endpoints. The backend judges answers.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown quiz, or other request errors.
    async fn start_session(&self, quiz_id: QuizId, mode: SessionMode)
    -> Result<Session, ApiError>;

    /// Submit one answer and receive the backend's evaluation.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` for a completed session, or other request errors.
    async fn submit_answer(
        &self,
        session_id: SessionId,
        flashcard_id: FlashcardId,
        answer: &UserAnswer,
    ) -> Result<AnswerEvaluation, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn complete_session(
        &self,
        session_id: SessionId,
        completion: &SessionCompletion,
    ) -> Result<Session, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if missing, or other request errors.
    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError>;

    /// Sessions of the current user, optionally for one quiz.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    async fn list_sessions(&self, quiz_id: Option<QuizId>) -> Result<Vec<Session>, ApiError>;
}

/// Aggregates backend repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Backend {
    pub quizzes: Arc<dyn QuizRepository>,
    pub flashcards: Arc<dyn FlashcardRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Backend {
    #[must_use]
    pub fn from_shared<B>(backend: B) -> Self
    where
        B: QuizRepository + FlashcardRepository + SessionRepository + Clone + 'static,
    {
        Self {
            quizzes: Arc::new(backend.clone()),
            flashcards: Arc::new(backend.clone()),
            sessions: Arc::new(backend),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_shared(InMemoryBackend::new())
    }

    /// Backend talking to the REST API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the HTTP client cannot be built.
    pub fn http(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::from_shared(HttpBackend::new(config)?))
    }
}
