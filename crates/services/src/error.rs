//! Shared error types for the services crate.

use thiserror::Error;

use api::ApiError;
use quiz_core::model::{AnswerError, FlashcardError, QuizError, ResultError};

/// Errors emitted by the session state machine and its orchestrator.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no flashcards available for session")]
    Empty,
    #[error("session already completed")]
    Completed,
    #[error("session is not completed yet")]
    NotComplete,
    #[error("flashcard {index} already has an answer")]
    AlreadyAnswered { index: usize },
    #[error("flashcard {index} must be answered or revealed first")]
    NotAnswered { index: usize },
    #[error("flashcard {index} has not been seen in this session")]
    NotSeen { index: usize },
    #[error("answers cannot be revealed in test mode")]
    RevealNotAllowed,
    #[error("{remaining} flashcards are still unanswered")]
    Unanswered { remaining: usize },
    #[error("only test sessions produce a result")]
    NotTestMode,
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Flashcard(#[from] FlashcardError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
