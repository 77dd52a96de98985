use async_trait::async_trait;
use quiz_core::Clock;
use quiz_core::model::{
    Answer, AnswerEvaluation, AnswerType, Difficulty, Flashcard, FlashcardDraft, FlashcardId,
    Question, Quiz, QuizDraft, QuizId, Session, SessionCompletion, SessionId, SessionMode, UserAnswer,
    UserId,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::{ApiError, FlashcardRepository, QuizRepository, SessionRepository};

#[derive(Default)]
struct State {
    next_id: u64,
    quizzes: BTreeMap<QuizId, Quiz>,
    flashcards: BTreeMap<FlashcardId, Flashcard>,
    sessions: BTreeMap<SessionId, Session>,
}

impl State {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn recount(&mut self, quiz_id: QuizId) {
        let count = self
            .flashcards
            .values()
            .filter(|card| card.quiz_id == quiz_id)
            .count();
        if let Some(quiz) = self.quizzes.get_mut(&quiz_id) {
            quiz.flashcard_count = u32::try_from(count).unwrap_or(u32::MAX);
        }
    }
}

/// Backend stand-in for tests and offline runs.
///
/// Judges answers by whitespace- and case-insensitive comparison with the
/// expected answer text.
#[derive(Clone)]
pub struct InMemoryBackend {
    clock: Clock,
    user_id: UserId,
    state: Arc<Mutex<State>>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Clock::default_clock(),
            user_id: UserId::new(1),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    /// Insert a small mixed-type quiz for offline runs.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Connection` if the state lock is poisoned.
    pub async fn seed_demo(&self) -> Result<QuizId, ApiError> {
        let quiz = self
            .create_quiz(&QuizDraft {
                title: "Rust Basics".into(),
                description: Some("Ownership, syntax and the standard library".into()),
                emoji: Some("🦀".into()),
            })
            .await?;

        let cards = [
            FlashcardDraft {
                question: Question {
                    text: "Which keyword makes a binding mutable?".into(),
                    emoji: Some("✏️".into()),
                    difficulty: Difficulty::Easy,
                    ..Question::titled("Mutable bindings")
                },
                answer: Answer::text("mut"),
            },
            FlashcardDraft {
                question: Question {
                    text: "Every value in Rust has exactly one owner.".into(),
                    ..Question::titled("Ownership")
                },
                answer: Answer::true_false(true),
            },
            FlashcardDraft {
                question: Question {
                    text: "Which collection keeps keys sorted?".into(),
                    difficulty: Difficulty::Medium,
                    ..Question::titled("Collections")
                },
                answer: Answer::multiple_choice(
                    "BTreeMap",
                    vec!["HashMap".into(), "BTreeMap".into(), "Vec".into()],
                ),
            },
            FlashcardDraft {
                question: Question {
                    text: "Write the signature of a program entry point.".into(),
                    lang: Some("rust".into()),
                    difficulty: Difficulty::Hard,
                    ..Question::titled("Entry point")
                },
                answer: Answer::code("fn main()", "rust"),
            },
        ];
        for card in &cards {
            self.create_flashcard(quiz.id, card).await?;
        }
        Ok(quiz.id)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn judge(expected: &Answer, given: &UserAnswer) -> AnswerEvaluation {
    let is_correct = !given.is_dont_know()
        && match expected.answer_type {
            AnswerType::TrueFalse => {
                given.as_str().eq_ignore_ascii_case(expected.text.trim())
            }
            AnswerType::Text | AnswerType::Code | AnswerType::MultipleChoice => {
                normalize(given.as_str()) == normalize(&expected.text)
            }
        };
    AnswerEvaluation {
        is_correct,
        feedback: (!is_correct).then(|| format!("Expected: {}", expected.text.trim())),
        correct_answer: expected.text.clone(),
    }
}

#[async_trait]
impl QuizRepository for InMemoryBackend {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.values().cloned().collect())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        let guard = self.lock()?;
        guard.quizzes.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        let now = self.clock.now();
        let mut guard = self.lock()?;
        let id = QuizId::new(guard.allocate());
        let quiz = Quiz {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            emoji: draft.emoji.clone(),
            flashcard_count: 0,
            created_at: now,
            updated_at: now,
        };
        guard.quizzes.insert(id, quiz.clone());
        Ok(quiz)
    }

    async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        let now = self.clock.now();
        let mut guard = self.lock()?;
        let quiz = guard.quizzes.get_mut(&id).ok_or(ApiError::NotFound)?;
        quiz.title.clone_from(&draft.title);
        quiz.description.clone_from(&draft.description);
        quiz.emoji.clone_from(&draft.emoji);
        quiz.updated_at = now;
        Ok(quiz.clone())
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), ApiError> {
        let mut guard = self.lock()?;
        guard.quizzes.remove(&id).ok_or(ApiError::NotFound)?;
        guard.flashcards.retain(|_, card| card.quiz_id != id);
        Ok(())
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryBackend {
    async fn list_flashcards(&self, quiz_id: QuizId) -> Result<Vec<Flashcard>, ApiError> {
        let guard = self.lock()?;
        if !guard.quizzes.contains_key(&quiz_id) {
            return Err(ApiError::NotFound);
        }
        Ok(guard
            .flashcards
            .values()
            .filter(|card| card.quiz_id == quiz_id)
            .cloned()
            .collect())
    }

    async fn create_flashcard(
        &self,
        quiz_id: QuizId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError> {
        let now = self.clock.now();
        let mut guard = self.lock()?;
        if !guard.quizzes.contains_key(&quiz_id) {
            return Err(ApiError::NotFound);
        }
        let id = FlashcardId::new(guard.allocate());
        let card = Flashcard::from_draft(id, quiz_id, draft.clone());
        guard.flashcards.insert(id, card.clone());
        guard.recount(quiz_id);
        if let Some(quiz) = guard.quizzes.get_mut(&quiz_id) {
            quiz.updated_at = now;
        }
        Ok(card)
    }

    async fn update_flashcard(
        &self,
        id: FlashcardId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError> {
        let mut guard = self.lock()?;
        let card = guard.flashcards.get_mut(&id).ok_or(ApiError::NotFound)?;
        card.question = draft.question.clone();
        card.answer = draft.answer.clone();
        Ok(card.clone())
    }

    async fn delete_flashcard(&self, id: FlashcardId) -> Result<(), ApiError> {
        let mut guard = self.lock()?;
        let card = guard.flashcards.remove(&id).ok_or(ApiError::NotFound)?;
        guard.recount(card.quiz_id);
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for InMemoryBackend {
    async fn start_session(
        &self,
        quiz_id: QuizId,
        mode: SessionMode,
    ) -> Result<Session, ApiError> {
        let now = self.clock.now();
        let mut guard = self.lock()?;
        if !guard.quizzes.contains_key(&quiz_id) {
            return Err(ApiError::NotFound);
        }
        let id = SessionId::new(guard.allocate());
        let session = Session {
            id,
            user_id: self.user_id,
            quiz_id,
            mode,
            started_at: now,
            completed_at: None,
            score: None,
            completed: false,
        };
        guard.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn submit_answer(
        &self,
        session_id: SessionId,
        flashcard_id: FlashcardId,
        answer: &UserAnswer,
    ) -> Result<AnswerEvaluation, ApiError> {
        let guard = self.lock()?;
        let session = guard.sessions.get(&session_id).ok_or(ApiError::NotFound)?;
        if session.completed {
            return Err(ApiError::Conflict);
        }
        let card = guard
            .flashcards
            .get(&flashcard_id)
            .filter(|card| card.quiz_id == session.quiz_id)
            .ok_or(ApiError::NotFound)?;
        Ok(judge(&card.answer, answer))
    }

    async fn complete_session(
        &self,
        session_id: SessionId,
        completion: &SessionCompletion,
    ) -> Result<Session, ApiError> {
        let now = self.clock.now();
        let mut guard = self.lock()?;
        let session = guard
            .sessions
            .get_mut(&session_id)
            .ok_or(ApiError::NotFound)?;
        if !session.completed {
            session.completed = true;
            session.completed_at = Some(now);
            session.score = completion.score;
        }
        Ok(session.clone())
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError> {
        let guard = self.lock()?;
        guard.sessions.get(&id).cloned().ok_or(ApiError::NotFound)
    }

    async fn list_sessions(&self, quiz_id: Option<QuizId>) -> Result<Vec<Session>, ApiError> {
        let guard = self.lock()?;
        Ok(guard
            .sessions
            .values()
            .filter(|s| quiz_id.is_none_or(|id| s.quiz_id == id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_is_case_and_whitespace_insensitive() {
        let expected = Answer::text("New  York");
        let verdict = judge(&expected, &Answer::text("x").prepare(" new york ").unwrap());
        assert!(verdict.is_correct);
        assert_eq!(verdict.feedback, None);

        let verdict = judge(&expected, &UserAnswer::dont_know());
        assert!(!verdict.is_correct);
        assert_eq!(verdict.feedback.as_deref(), Some("Expected: New  York"));
    }

    #[test]
    fn judge_true_false() {
        let expected = Answer::true_false(false);
        let given = expected.prepare("no").unwrap();
        assert!(judge(&expected, &given).is_correct);
    }
}
