use quiz_core::model::{AnswerType, Flashcard, QuizId, SessionMode};
use services::{
    AnswerRecord, SessionLoopService, SessionOutcome, SessionPhase, StudySession, TimelineStatus,
};

use crate::views::ViewError;
use crate::vm::result_vm::{ResultVm, map_result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionIntent {
    Submit(String),
    DontKnow,
    Reveal,
    Next,
    GoTo(usize),
    End,
    RetrySync,
}

/// How the answer box should be rendered for the current card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInputKind {
    Text,
    Code { lang: Option<String> },
    Choice { options: Vec<String> },
    TrueFalse,
}

impl AnswerInputKind {
    #[must_use]
    pub fn for_flashcard(card: &Flashcard) -> Self {
        match card.answer.answer_type {
            AnswerType::Text => AnswerInputKind::Text,
            AnswerType::Code => AnswerInputKind::Code {
                lang: card.answer.lang.clone(),
            },
            AnswerType::MultipleChoice => AnswerInputKind::Choice {
                options: card.answer.options().to_vec(),
            },
            AnswerType::TrueFalse => AnswerInputKind::TrueFalse,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptVm {
    pub title: String,
    pub text: String,
    pub emoji: Option<String>,
    pub image: Option<String>,
    pub lang: Option<String>,
    pub difficulty_label: &'static str,
}

impl PromptVm {
    #[must_use]
    pub fn from_flashcard(card: &Flashcard) -> Self {
        let question = &card.question;
        Self {
            title: question.title.clone(),
            text: question.text.clone(),
            emoji: question.emoji.clone(),
            image: question.image.clone(),
            lang: question.lang.clone(),
            difficulty_label: question.difficulty.label(),
        }
    }
}

/// What to show under the card once it has a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedbackVm {
    /// Learn mode: the backend verdict.
    Verdict {
        is_correct: bool,
        user_answer: String,
        correct_answer: String,
        message: Option<String>,
    },
    /// Test mode: correctness stays hidden until the results.
    Saved { user_answer: String },
    Revealed { correct_answer: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineItemVm {
    pub index: usize,
    pub label: String,
    pub status_class: &'static str,
    pub reachable: bool,
    pub is_current: bool,
}

/// UI wrapper around a running `StudySession`.
pub struct SessionVm {
    session: StudySession,
}

impl SessionVm {
    #[must_use]
    pub fn new(session: StudySession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.session.quiz_id()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }

    #[must_use]
    pub fn needs_sync(&self) -> bool {
        self.session.is_complete() && !self.session.is_synced()
    }

    #[must_use]
    pub fn prompt(&self) -> Option<PromptVm> {
        self.session.current_flashcard().map(PromptVm::from_flashcard)
    }

    #[must_use]
    pub fn input_kind(&self) -> Option<AnswerInputKind> {
        self.session
            .current_flashcard()
            .map(AnswerInputKind::for_flashcard)
    }

    #[must_use]
    pub fn can_reveal(&self) -> bool {
        !self.mode().is_test() && self.phase() == SessionPhase::Presenting
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        matches!(self.phase(), SessionPhase::Answered | SessionPhase::Revealed)
    }

    /// Label of the forward button. Only learn runs reach it on the last
    /// card; a test run completes as soon as that card is answered.
    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.session.current_index() + 1 >= self.session.total() {
            "Finish"
        } else {
            "Next"
        }
    }

    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        if self.session.is_complete() {
            return None;
        }
        let record = self.session.current_record()?;
        let expected = self
            .session
            .current_flashcard()
            .map(|card| card.answer.text.clone())
            .unwrap_or_default();
        Some(match record {
            AnswerRecord::Revealed => FeedbackVm::Revealed {
                correct_answer: expected,
            },
            AnswerRecord::Answered {
                user_answer,
                evaluation,
            } => {
                let user_answer = if user_answer.is_dont_know() {
                    "I don't know".to_string()
                } else {
                    user_answer.as_str().to_string()
                };
                if self.mode().is_test() {
                    FeedbackVm::Saved { user_answer }
                } else {
                    FeedbackVm::Verdict {
                        is_correct: evaluation.is_correct,
                        user_answer,
                        correct_answer: evaluation.correct_answer.clone(),
                        message: evaluation.feedback.clone(),
                    }
                }
            }
        })
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.session.progress();
        if progress.is_complete {
            return format!("{} of {} cards", progress.answered, progress.total);
        }
        format!("Card {} of {}", progress.current + 1, progress.total)
    }

    /// Running score; a test run only shows how many cards have answers.
    #[must_use]
    pub fn score_label(&self) -> String {
        let progress = self.session.progress();
        if self.mode().is_test() && !progress.is_complete {
            return format!("{} answered", progress.answered);
        }
        format!("{} correct · {} incorrect", progress.correct, progress.incorrect)
    }

    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineItemVm> {
        self.session
            .timeline()
            .into_iter()
            .map(|entry| TimelineItemVm {
                index: entry.index,
                label: (entry.index + 1).to_string(),
                status_class: status_class(entry.status),
                reachable: entry.status.is_reachable() && !self.session.is_complete(),
                is_current: entry.is_current,
            })
            .collect()
    }

    #[must_use]
    pub fn result(&self) -> Option<ResultVm> {
        self.session.result().map(map_result)
    }

    /// Summary line for a finished learn run.
    #[must_use]
    pub fn learn_summary(&self) -> Option<String> {
        if self.mode().is_test() || !self.session.is_complete() {
            return None;
        }
        let progress = self.session.progress();
        Some(format!(
            "You studied {} of {} cards: {} correct, {} incorrect.",
            self.session.flashcards_completed(),
            progress.total,
            progress.correct,
            progress.incorrect
        ))
    }

    /// # Errors
    ///
    /// Returns a `ViewError` describing the failed step. The session is left
    /// usable; a failed submit leaves the card unanswered.
    pub async fn apply(
        &mut self,
        session_loop: &SessionLoopService,
        intent: SessionIntent,
    ) -> Result<Option<SessionOutcome>, ViewError> {
        let session = &mut self.session;
        match intent {
            SessionIntent::Submit(raw) => {
                let outcome = session_loop.submit_answer(session, &raw).await?;
                Ok(outcome.is_complete.then(|| SessionOutcome::Completed {
                    result: outcome.result,
                }))
            }
            SessionIntent::DontKnow => {
                let outcome = session_loop.submit_answer(session, "").await?;
                Ok(outcome.is_complete.then(|| SessionOutcome::Completed {
                    result: outcome.result,
                }))
            }
            SessionIntent::Reveal => {
                session_loop.reveal_answer(session)?;
                Ok(None)
            }
            SessionIntent::Next => Ok(Some(session_loop.next(session).await?)),
            SessionIntent::GoTo(index) => {
                session_loop.go_to_flashcard(session, index)?;
                Ok(None)
            }
            SessionIntent::End => Ok(Some(session_loop.end_session(session).await?)),
            SessionIntent::RetrySync => {
                session_loop.finalize(session).await?;
                Ok(None)
            }
        }
    }
}

fn status_class(status: TimelineStatus) -> &'static str {
    match status {
        TimelineStatus::Unseen => "timeline-unseen",
        TimelineStatus::Seen => "timeline-seen",
        TimelineStatus::Answered => "timeline-answered",
        TimelineStatus::Correct => "timeline-correct",
        TimelineStatus::Incorrect => "timeline-incorrect",
        TimelineStatus::Revealed => "timeline-revealed",
        TimelineStatus::Skipped => "timeline-skipped",
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when the quiz has no flashcards.
/// Returns other `ViewError` kinds for backend failures.
pub async fn start_session(
    session_loop: &SessionLoopService,
    quiz_id: QuizId,
    mode: SessionMode,
) -> Result<SessionVm, ViewError> {
    let session = session_loop.start_session(quiz_id, mode).await?;
    Ok(SessionVm::new(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    use api::{Backend, InMemoryBackend};
    use pretty_assertions::assert_eq;
    use quiz_core::time::fixed_clock;

    async fn started(mode: SessionMode) -> (SessionLoopService, SessionVm) {
        let memory = InMemoryBackend::new().with_clock(fixed_clock());
        let quiz_id = memory.seed_demo().await.unwrap();
        let session_loop =
            SessionLoopService::from_backend(fixed_clock(), &Backend::from_shared(memory));
        let vm = start_session(&session_loop, quiz_id, mode).await.unwrap();
        (session_loop, vm)
    }

    #[tokio::test]
    async fn learn_mode_shows_verdicts_and_reveal() {
        let (session_loop, mut vm) = started(SessionMode::Learn).await;
        assert_eq!(vm.input_kind(), Some(AnswerInputKind::Text));
        assert!(vm.can_reveal());
        assert_eq!(vm.progress_label(), "Card 1 of 4");

        vm.apply(&session_loop, SessionIntent::Submit("val".into()))
            .await
            .unwrap();
        assert_eq!(
            vm.feedback(),
            Some(FeedbackVm::Verdict {
                is_correct: false,
                user_answer: "val".into(),
                correct_answer: "mut".into(),
                message: Some("Expected: mut".into()),
            })
        );
        assert!(vm.can_advance());

        vm.apply(&session_loop, SessionIntent::Next).await.unwrap();
        assert_eq!(vm.input_kind(), Some(AnswerInputKind::TrueFalse));
        vm.apply(&session_loop, SessionIntent::Reveal).await.unwrap();
        assert_eq!(
            vm.feedback(),
            Some(FeedbackVm::Revealed {
                correct_answer: "true".into()
            })
        );

        let classes: Vec<&str> = vm.timeline().iter().map(|t| t.status_class).collect();
        assert_eq!(
            classes,
            vec![
                "timeline-incorrect",
                "timeline-revealed",
                "timeline-unseen",
                "timeline-unseen"
            ]
        );
    }

    #[tokio::test]
    async fn test_mode_hides_verdicts_and_maps_result() {
        let (session_loop, mut vm) = started(SessionMode::Test).await;
        assert!(!vm.can_reveal());

        vm.apply(&session_loop, SessionIntent::Submit("mut".into()))
            .await
            .unwrap();
        assert_eq!(
            vm.feedback(),
            Some(FeedbackVm::Saved {
                user_answer: "mut".into()
            })
        );
        assert_eq!(vm.score_label(), "1 answered");

        let outcome = vm.apply(&session_loop, SessionIntent::End).await.unwrap();
        assert!(matches!(
            outcome,
            Some(SessionOutcome::Completed { result: Some(_) })
        ));
        let result = vm.result().unwrap();
        assert_eq!(result.score_label, "25%");
        assert_eq!(result.skipped_label.as_deref(), Some("3 questions skipped"));
        assert!(!vm.needs_sync());
        assert!(vm.timeline().iter().all(|item| !item.reachable));
    }

    #[tokio::test]
    async fn invalid_choice_is_reported_and_card_stays_open() {
        let (session_loop, mut vm) = started(SessionMode::Learn).await;
        vm.apply(&session_loop, SessionIntent::DontKnow).await.unwrap();
        vm.apply(&session_loop, SessionIntent::Next).await.unwrap();
        vm.apply(&session_loop, SessionIntent::Submit("true".into()))
            .await
            .unwrap();
        vm.apply(&session_loop, SessionIntent::Next).await.unwrap();

        assert_eq!(
            vm.input_kind(),
            Some(AnswerInputKind::Choice {
                options: vec!["HashMap".into(), "BTreeMap".into(), "Vec".into()]
            })
        );
        let err = vm
            .apply(&session_loop, SessionIntent::Submit("LinkedList".into()))
            .await
            .unwrap_err();
        assert_eq!(err, ViewError::InvalidAnswer);
        assert_eq!(vm.phase(), SessionPhase::Presenting);
    }

    #[tokio::test]
    async fn last_card_finishes_learn_run_and_completes_test_run() {
        let (session_loop, mut vm) = started(SessionMode::Learn).await;
        for _ in 0..3 {
            vm.apply(&session_loop, SessionIntent::Reveal).await.unwrap();
            assert_eq!(vm.next_label(), "Next");
            vm.apply(&session_loop, SessionIntent::Next).await.unwrap();
        }
        vm.apply(&session_loop, SessionIntent::Reveal).await.unwrap();
        assert!(vm.can_advance());
        assert_eq!(vm.next_label(), "Finish");

        let (session_loop, mut vm) = started(SessionMode::Test).await;
        for _ in 0..3 {
            vm.apply(&session_loop, SessionIntent::DontKnow).await.unwrap();
            vm.apply(&session_loop, SessionIntent::Next).await.unwrap();
        }
        vm.apply(&session_loop, SessionIntent::DontKnow).await.unwrap();
        assert!(vm.is_complete());
        assert!(!vm.can_advance());
    }

    #[tokio::test]
    async fn finishing_learn_run_summarizes_progress() {
        let (session_loop, mut vm) = started(SessionMode::Learn).await;
        vm.apply(&session_loop, SessionIntent::Submit("mut".into()))
            .await
            .unwrap();
        let outcome = vm.apply(&session_loop, SessionIntent::End).await.unwrap();
        assert_eq!(outcome, Some(SessionOutcome::Completed { result: None }));
        assert_eq!(
            vm.learn_summary().as_deref(),
            Some("You studied 1 of 4 cards: 1 correct, 0 incorrect.")
        );
        assert!(vm.prompt().is_none());
    }
}
