use std::sync::Arc;

use rand::rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use api::{Backend, FlashcardRepository, SessionRepository};
use quiz_core::Clock;
use quiz_core::model::{Answer, AnswerEvaluation, QuizId, SessionMode, TestResult};

use super::service::{PendingAnswer, SessionPhase, StudySession};
use crate::error::SessionError;

/// Result of answering a single flashcard in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionAnswerResult {
    pub evaluation: AnswerEvaluation,
    pub phase: SessionPhase,
    pub is_complete: bool,
    pub result: Option<TestResult>,
}

/// What happened after moving past the current flashcard.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Continue,
    Completed { result: Option<TestResult> },
}

/// Orchestrates session start, backend-judged answering and completion sync.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    flashcards: Arc<dyn FlashcardRepository>,
    sessions: Arc<dyn SessionRepository>,
    shuffle: bool,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        flashcards: Arc<dyn FlashcardRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            clock,
            flashcards,
            sessions,
            shuffle: false,
        }
    }

    #[must_use]
    pub fn from_backend(clock: Clock, backend: &Backend) -> Self {
        Self::new(
            clock,
            Arc::clone(&backend.flashcards),
            Arc::clone(&backend.sessions),
        )
    }

    /// Shuffle flashcard order for learn runs. Test runs keep backend order.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Start a new session for the given quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for a quiz without flashcards (no backend
    /// session is created), or `SessionError::Api` for backend failures.
    pub async fn start_session(
        &self,
        quiz_id: QuizId,
        mode: SessionMode,
    ) -> Result<StudySession, SessionError> {
        let mut flashcards = self.flashcards.list_flashcards(quiz_id).await?;
        if flashcards.is_empty() {
            return Err(SessionError::Empty);
        }
        if self.shuffle && mode == SessionMode::Learn {
            let mut rng = rng();
            flashcards.as_mut_slice().shuffle(&mut rng);
        }

        let session = self.sessions.start_session(quiz_id, mode).await?;
        info!(
            session_id = %session.id,
            %quiz_id,
            %mode,
            cards = flashcards.len(),
            "session started"
        );
        StudySession::new(session, flashcards, self.clock.now())
    }

    /// Answer the current flashcard.
    ///
    /// Blank input is the "don't know" answer. It is sent like any other
    /// answer and always recorded as incorrect.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for state violations, unformattable input or
    /// backend failures. The flashcard stays unanswered on error.
    pub async fn submit_answer(
        &self,
        session: &mut StudySession,
        raw: &str,
    ) -> Result<SessionAnswerResult, SessionError> {
        let pending = session.prepare_submission(raw)?;
        let evaluation = self.evaluate(session, &pending).await?;
        session.record_evaluation(pending, evaluation.clone(), self.clock.now())?;
        if session.is_complete() {
            self.sync_completion(session).await;
        }

        Ok(SessionAnswerResult {
            evaluation,
            phase: session.phase(),
            is_complete: session.is_complete(),
            result: session.result().cloned(),
        })
    }

    /// Show the expected answer of the current flashcard (learn mode).
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if revealing is not allowed right now.
    pub fn reveal_answer(&self, session: &mut StudySession) -> Result<Answer, SessionError> {
        let card = session.reveal()?;
        Ok(card.answer.clone())
    }

    /// Move past the current flashcard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the current card has no answer yet.
    pub async fn next(&self, session: &mut StudySession) -> Result<SessionOutcome, SessionError> {
        session.advance(self.clock.now())?;
        if !session.is_complete() {
            return Ok(SessionOutcome::Continue);
        }
        self.sync_completion(session).await;
        Ok(SessionOutcome::Completed {
            result: session.result().cloned(),
        })
    }

    /// Jump back to a previously seen flashcard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSeen` for positions not yet visited.
    pub fn go_to_flashcard(
        &self,
        session: &mut StudySession,
        index: usize,
    ) -> Result<SessionPhase, SessionError> {
        session.go_to(index)
    }

    /// End the run early. Test runs submit "don't know" for every unanswered
    /// card before completing.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the run is already closed, or
    /// `SessionError::Api` if a gap could not be submitted. Gaps submitted
    /// before the failure stay recorded, so calling again finishes the rest.
    pub async fn end_session(
        &self,
        session: &mut StudySession,
    ) -> Result<SessionOutcome, SessionError> {
        if session.is_complete() {
            return Err(SessionError::Completed);
        }
        match session.mode() {
            SessionMode::Learn => session.finish(self.clock.now())?,
            SessionMode::Test => {
                let unanswered = session.unanswered_indices();
                debug!(
                    session_id = %session.session_id(),
                    skipped = unanswered.len(),
                    "ending test early"
                );
                for index in unanswered {
                    let pending = session.dont_know_submission(index)?;
                    let evaluation = self.evaluate(session, &pending).await?;
                    session.record_evaluation(pending, evaluation, self.clock.now())?;
                }
                if !session.is_complete() {
                    session.finish(self.clock.now())?;
                }
            }
        }
        self.sync_completion(session).await;
        Ok(SessionOutcome::Completed {
            result: session.result().cloned(),
        })
    }

    /// Retry the completion call for a finished but unsynced session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotComplete` for a running session, or
    /// `SessionError::Api` if the backend call fails again.
    pub async fn finalize(&self, session: &mut StudySession) -> Result<(), SessionError> {
        if session.is_synced() {
            return Ok(());
        }
        if !session.is_complete() {
            return Err(SessionError::NotComplete);
        }
        let completion = session.completion();
        let synced = self
            .sessions
            .complete_session(session.session_id(), &completion)
            .await?;
        session.mark_synced(synced);
        Ok(())
    }

    async fn evaluate(
        &self,
        session: &StudySession,
        pending: &PendingAnswer,
    ) -> Result<AnswerEvaluation, SessionError> {
        let evaluation = self
            .sessions
            .submit_answer(session.session_id(), pending.flashcard_id(), pending.answer())
            .await?
            .for_answer(pending.answer());
        debug!(
            session_id = %session.session_id(),
            flashcard_id = %pending.flashcard_id(),
            correct = evaluation.is_correct,
            dont_know = pending.answer().is_dont_know(),
            "answer evaluated"
        );
        Ok(evaluation)
    }

    async fn sync_completion(&self, session: &mut StudySession) {
        if session.is_synced() {
            return;
        }
        let completion = session.completion();
        match self
            .sessions
            .complete_session(session.session_id(), &completion)
            .await
        {
            Ok(synced) => {
                info!(
                    session_id = %synced.id,
                    score = ?completion.score,
                    duration_secs = ?completion.duration_secs,
                    "session completed"
                );
                session.mark_synced(synced);
            }
            Err(err) => warn!(
                session_id = %session.session_id(),
                error = %err,
                "failed to sync session completion"
            ),
        }
    }
}
