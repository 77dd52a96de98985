use thiserror::Error;

use crate::model::{AnswerError, FlashcardError, QuizError, ResultError};

/// Umbrella for every validation error raised by the domain model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Flashcard(#[from] FlashcardError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error(transparent)]
    Result(#[from] ResultError),
}
