use std::sync::Arc;

use tracing::info;

use api::{Backend, FlashcardRepository, QuizRepository};
use quiz_core::model::{
    Flashcard, FlashcardDraft, FlashcardId, Quiz, QuizDraft, QuizId, QuizSort,
};

use crate::error::QuizServiceError;

/// Search and ordering applied to the quiz browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizFilter {
    pub query: String,
    pub sort: QuizSort,
}

impl QuizFilter {
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: QuizSort) -> Self {
        self.sort = sort;
        self
    }

    fn apply(&self, mut quizzes: Vec<Quiz>) -> Vec<Quiz> {
        let query = self.query.trim();
        if !query.is_empty() {
            quizzes.retain(|quiz| quiz.matches(query));
        }
        self.sort.sort(&mut quizzes);
        quizzes
    }
}

/// A quiz together with its flashcards, in backend order.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizDetail {
    pub quiz: Quiz,
    pub flashcards: Vec<Flashcard>,
}

/// Quiz browsing and editing over the backend.
#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>, flashcards: Arc<dyn FlashcardRepository>) -> Self {
        Self { quizzes, flashcards }
    }

    #[must_use]
    pub fn from_backend(backend: &Backend) -> Self {
        Self::new(
            Arc::clone(&backend.quizzes),
            Arc::clone(&backend.flashcards),
        )
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if the backend request fails.
    pub async fn list_quizzes(&self, filter: &QuizFilter) -> Result<Vec<Quiz>, QuizServiceError> {
        let quizzes = self.quizzes.list_quizzes().await?;
        Ok(filter.apply(quizzes))
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if either request fails.
    pub async fn get_quiz_detail(&self, id: QuizId) -> Result<QuizDetail, QuizServiceError> {
        let quiz = self.quizzes.get_quiz(id).await?;
        let flashcards = self.flashcards.list_flashcards(id).await?;
        Ok(QuizDetail { quiz, flashcards })
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for an invalid draft (nothing is sent),
    /// or `QuizServiceError::Api` if the backend rejects it.
    pub async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, QuizServiceError> {
        let draft = draft.normalized()?;
        let quiz = self.quizzes.create_quiz(&draft).await?;
        info!(quiz_id = %quiz.id, title = %quiz.title, "quiz created");
        Ok(quiz)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for an invalid draft,
    /// or `QuizServiceError::Api` if the backend rejects it.
    pub async fn update_quiz(
        &self,
        id: QuizId,
        draft: QuizDraft,
    ) -> Result<Quiz, QuizServiceError> {
        let draft = draft.normalized()?;
        Ok(self.quizzes.update_quiz(id, &draft).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if the backend request fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        self.quizzes.delete_quiz(id).await?;
        info!(quiz_id = %id, "quiz deleted");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Flashcard` for an invalid draft (nothing is sent),
    /// or `QuizServiceError::Api` if the backend rejects it.
    pub async fn add_flashcard(
        &self,
        quiz_id: QuizId,
        draft: FlashcardDraft,
    ) -> Result<Flashcard, QuizServiceError> {
        let draft = draft.normalized()?;
        Ok(self.flashcards.create_flashcard(quiz_id, &draft).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Flashcard` for an invalid draft,
    /// or `QuizServiceError::Api` if the backend rejects it.
    pub async fn update_flashcard(
        &self,
        id: FlashcardId,
        draft: FlashcardDraft,
    ) -> Result<Flashcard, QuizServiceError> {
        let draft = draft.normalized()?;
        Ok(self.flashcards.update_flashcard(id, &draft).await?)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if the backend request fails.
    pub async fn delete_flashcard(&self, id: FlashcardId) -> Result<(), QuizServiceError> {
        self.flashcards.delete_flashcard(id).await?;
        Ok(())
    }
}
