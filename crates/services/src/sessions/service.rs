use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{
    AnswerEvaluation, BreakdownItem, Flashcard, FlashcardId, QuizId, Session, SessionCompletion,
    SessionId, SessionMode, TestResult, UserAnswer, Verdict,
};

use super::progress::{SessionProgress, TimelineEntry, TimelineStatus};
use crate::error::SessionError;

//
// ─── PHASE / RECORDS ───────────────────────────────────────────────────────────
//

/// Where the current flashcard stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for an answer (or a reveal in learn mode).
    Presenting,
    /// An answer was evaluated; feedback is available.
    Answered,
    /// The expected answer was shown without an attempt.
    Revealed,
    Completed,
}

/// Stored outcome for one flashcard. Kept for the lifetime of the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerRecord {
    Answered {
        user_answer: UserAnswer,
        evaluation: AnswerEvaluation,
    },
    Revealed,
}

impl AnswerRecord {
    #[must_use]
    pub fn user_answer(&self) -> Option<&UserAnswer> {
        match self {
            AnswerRecord::Answered { user_answer, .. } => Some(user_answer),
            AnswerRecord::Revealed => None,
        }
    }

    #[must_use]
    pub fn evaluation(&self) -> Option<&AnswerEvaluation> {
        match self {
            AnswerRecord::Answered { evaluation, .. } => Some(evaluation),
            AnswerRecord::Revealed => None,
        }
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.evaluation().is_some_and(|e| e.is_correct)
    }

    #[must_use]
    pub fn is_dont_know(&self) -> bool {
        self.user_answer().is_some_and(UserAnswer::is_dont_know)
    }

    fn verdict(&self) -> Verdict {
        match self {
            AnswerRecord::Revealed => Verdict::Skipped,
            AnswerRecord::Answered { user_answer, .. } if user_answer.is_dont_know() => {
                Verdict::Skipped
            }
            AnswerRecord::Answered { evaluation, .. } if evaluation.is_correct => Verdict::Correct,
            AnswerRecord::Answered { .. } => Verdict::Incorrect,
        }
    }
}

/// A formatted answer waiting for its evaluation.
///
/// Bound to the flashcard it was prepared for, so the evaluation lands on that
/// card even if the user navigates while the request is in flight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAnswer {
    index: usize,
    flashcard_id: FlashcardId,
    answer: UserAnswer,
}

impl PendingAnswer {
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn flashcard_id(&self) -> FlashcardId {
        self.flashcard_id
    }

    #[must_use]
    pub fn answer(&self) -> &UserAnswer {
        &self.answer
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one learn or test run.
///
/// Steps through the flashcards in order, remembers which positions were seen,
/// and keeps every stored answer for the lifetime of the run. Holds no I/O;
/// `SessionLoopService` talks to the backend.
pub struct StudySession {
    session: Session,
    flashcards: Vec<Flashcard>,
    records: Vec<Option<AnswerRecord>>,
    current: usize,
    seen: Vec<usize>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    result: Option<TestResult>,
    synced: bool,
}

impl StudySession {
    /// Start presenting the first flashcard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if no flashcards are provided.
    pub fn new(
        session: Session,
        flashcards: Vec<Flashcard>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if flashcards.is_empty() {
            return Err(SessionError::Empty);
        }
        let records = vec![None; flashcards.len()];
        Ok(Self {
            session,
            flashcards,
            records,
            current: 0,
            seen: vec![0],
            started_at,
            completed_at: None,
            result: None,
            synced: false,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session.id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.session.quiz_id
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.session.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Whether the backend acknowledged the completion.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    #[must_use]
    pub fn result(&self) -> Option<&TestResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.flashcards.len()
    }

    #[must_use]
    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    #[must_use]
    pub fn flashcard(&self, index: usize) -> Option<&Flashcard> {
        self.flashcards.get(index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_flashcard(&self) -> Option<&Flashcard> {
        if self.is_complete() {
            None
        } else {
            self.flashcards.get(self.current)
        }
    }

    #[must_use]
    pub fn current_record(&self) -> Option<&AnswerRecord> {
        self.record(self.current)
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&AnswerRecord> {
        self.records.get(index).and_then(Option::as_ref)
    }

    /// Positions visited so far, in visiting order.
    #[must_use]
    pub fn seen_indices(&self) -> &[usize] {
        &self.seen
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    /// Learn mode counts visited cards; test mode counts answered ones.
    #[must_use]
    pub fn flashcards_completed(&self) -> usize {
        match self.mode() {
            SessionMode::Learn => self.seen.len(),
            SessionMode::Test => self.answered_count(),
        }
    }

    #[must_use]
    pub fn unanswered_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.is_complete() {
            return SessionPhase::Completed;
        }
        match self.current_record() {
            None => SessionPhase::Presenting,
            Some(AnswerRecord::Answered { .. }) => SessionPhase::Answered,
            Some(AnswerRecord::Revealed) => SessionPhase::Revealed,
        }
    }

    /// Format `raw` for the current flashcard.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion,
    /// `SessionError::AlreadyAnswered` if the card already has a record,
    /// or `SessionError::Answer` if the input does not fit the answer type.
    pub fn prepare_submission(&self, raw: &str) -> Result<PendingAnswer, SessionError> {
        let card = self.current_flashcard().ok_or(SessionError::Completed)?;
        if self.current_record().is_some() {
            return Err(SessionError::AlreadyAnswered {
                index: self.current,
            });
        }
        let answer = card.answer.prepare(raw)?;
        Ok(PendingAnswer {
            index: self.current,
            flashcard_id: card.id,
            answer,
        })
    }

    /// Store the evaluation for the card `pending` was prepared for.
    ///
    /// In test mode the session completes once every card has a record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion or
    /// `SessionError::AlreadyAnswered` if the card already has a record.
    pub fn record_evaluation(
        &mut self,
        pending: PendingAnswer,
        evaluation: AnswerEvaluation,
        at: DateTime<Utc>,
    ) -> Result<&AnswerRecord, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let index = pending.index;
        let slot = self
            .records
            .get_mut(index)
            .ok_or(SessionError::NotSeen { index })?;
        if slot.is_some() {
            return Err(SessionError::AlreadyAnswered { index });
        }
        *slot = Some(AnswerRecord::Answered {
            user_answer: pending.answer,
            evaluation,
        });

        if self.mode().is_test() && self.records.iter().all(Option::is_some) {
            self.complete(at)?;
        }
        self.record(index).ok_or(SessionError::NotSeen { index })
    }

    /// A "don't know" answer for the unanswered card at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` after completion,
    /// `SessionError::NotSeen` for an index out of range, or
    /// `SessionError::AlreadyAnswered` if the card already has a record.
    pub(crate) fn dont_know_submission(
        &self,
        index: usize,
    ) -> Result<PendingAnswer, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let card = self
            .flashcards
            .get(index)
            .ok_or(SessionError::NotSeen { index })?;
        if self.records[index].is_some() {
            return Err(SessionError::AlreadyAnswered { index });
        }
        Ok(PendingAnswer {
            index,
            flashcard_id: card.id,
            answer: UserAnswer::dont_know(),
        })
    }

    /// Show the expected answer of the current card (learn mode only).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::RevealNotAllowed` in test mode,
    /// `SessionError::Completed` after completion, or
    /// `SessionError::AlreadyAnswered` if the card already has a record.
    pub fn reveal(&mut self) -> Result<&Flashcard, SessionError> {
        if self.mode().is_test() {
            return Err(SessionError::RevealNotAllowed);
        }
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        let index = self.current;
        if self.records[index].is_some() {
            return Err(SessionError::AlreadyAnswered { index });
        }
        self.records[index] = Some(AnswerRecord::Revealed);
        Ok(&self.flashcards[index])
    }

    /// Move to the next flashcard, completing a learn run past the last card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAnswered` while the current card has no record,
    /// `SessionError::Completed` after completion, or
    /// `SessionError::Unanswered` if a test run would end with gaps.
    pub fn advance(&mut self, at: DateTime<Utc>) -> Result<SessionPhase, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.current_record().is_none() {
            return Err(SessionError::NotAnswered {
                index: self.current,
            });
        }

        let next = self.current + 1;
        if next >= self.flashcards.len() {
            self.finish(at)?;
            return Ok(self.phase());
        }

        self.current = next;
        if !self.seen.contains(&next) {
            self.seen.push(next);
        }
        Ok(self.phase())
    }

    /// Jump back to a previously seen flashcard. Stored answers are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSeen` for unseen positions or
    /// `SessionError::Completed` after completion.
    pub fn go_to(&mut self, index: usize) -> Result<SessionPhase, SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if !self.seen.contains(&index) {
            return Err(SessionError::NotSeen { index });
        }
        self.current = index;
        Ok(self.phase())
    }

    /// Close the run. Test runs need a record for every card.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if already closed or
    /// `SessionError::Unanswered` for a test run with unanswered cards.
    pub fn finish(&mut self, at: DateTime<Utc>) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::Completed);
        }
        if self.mode().is_test() {
            let remaining = self.records.iter().filter(|r| r.is_none()).count();
            if remaining > 0 {
                return Err(SessionError::Unanswered { remaining });
            }
        }
        self.complete(at)
    }

    fn complete(&mut self, at: DateTime<Utc>) -> Result<(), SessionError> {
        self.completed_at = Some(at);
        if self.mode().is_test() {
            self.result = Some(self.build_result()?);
        }
        Ok(())
    }

    /// Assemble the scored result from the stored evaluations, in card order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotTestMode` for learn runs and
    /// `SessionError::Unanswered` while cards lack a record.
    pub fn build_result(&self) -> Result<TestResult, SessionError> {
        if !self.mode().is_test() {
            return Err(SessionError::NotTestMode);
        }
        let remaining = self.records.iter().filter(|r| r.is_none()).count();
        if remaining > 0 {
            return Err(SessionError::Unanswered { remaining });
        }

        let breakdown = self
            .flashcards
            .iter()
            .zip(self.records.iter().flatten())
            .map(|(card, record)| BreakdownItem {
                flashcard_id: card.id,
                question: card.question.title.clone(),
                user_answer: record
                    .user_answer()
                    .map(|a| a.as_str().to_string())
                    .unwrap_or_default(),
                correct_answer: record
                    .evaluation()
                    .map_or_else(|| card.answer.text.clone(), |e| e.correct_answer.clone()),
                verdict: record.verdict(),
                feedback: record.evaluation().and_then(|e| e.feedback.clone()),
            })
            .collect();

        let duration = self.completed_at.map(|end| end - self.started_at);
        Ok(TestResult::from_breakdown(breakdown, duration)?)
    }

    /// Body for the backend completion call.
    #[must_use]
    pub fn completion(&self) -> SessionCompletion {
        SessionCompletion {
            score: self.result.as_ref().map(|r| f64::from(r.final_score())),
            duration_secs: self
                .completed_at
                .and_then(|end| u64::try_from((end - self.started_at).num_seconds()).ok()),
        }
    }

    pub(crate) fn mark_synced(&mut self, session: Session) {
        self.session = session;
        self.synced = true;
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = self.answered_count();
        let correct = self
            .records
            .iter()
            .flatten()
            .filter(|r| r.is_correct())
            .count();
        SessionProgress {
            total: self.total(),
            seen: self.seen.len(),
            answered,
            correct,
            incorrect: answered - correct,
            remaining: self.total() - answered,
            current: self.current,
            is_complete: self.is_complete(),
        }
    }

    /// One entry per flashcard. Test runs hide correctness until completion.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineEntry> {
        let hide_verdicts = self.mode().is_test() && !self.is_complete();
        self.flashcards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let status = match self.record(index) {
                    None if self.seen.contains(&index) => TimelineStatus::Seen,
                    None => TimelineStatus::Unseen,
                    Some(_) if hide_verdicts => TimelineStatus::Answered,
                    Some(AnswerRecord::Revealed) => TimelineStatus::Revealed,
                    Some(record) => match record.verdict() {
                        Verdict::Correct => TimelineStatus::Correct,
                        Verdict::Incorrect => TimelineStatus::Incorrect,
                        Verdict::Skipped => TimelineStatus::Skipped,
                    },
                };
                TimelineEntry {
                    index,
                    flashcard_id: card.id,
                    status,
                    is_current: index == self.current && !self.is_complete(),
                }
            })
            .collect()
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("session_id", &self.session.id)
            .field("mode", &self.session.mode)
            .field("cards_len", &self.flashcards.len())
            .field("current", &self.current)
            .field("seen", &self.seen)
            .field("answered", &self.answered_count())
            .field("completed_at", &self.completed_at)
            .field("synced", &self.synced)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use quiz_core::model::{Answer, Question, UserId};
    use quiz_core::time::fixed_now;

    fn build_card(id: u64) -> Flashcard {
        Flashcard {
            id: FlashcardId::new(id),
            quiz_id: QuizId::new(1),
            question: Question::titled(format!("Q{id}")),
            answer: Answer::text(format!("A{id}")),
        }
    }

    fn build_session(mode: SessionMode, cards: u64) -> StudySession {
        let session = Session {
            id: SessionId::new(1),
            user_id: UserId::new(1),
            quiz_id: QuizId::new(1),
            mode,
            started_at: fixed_now(),
            completed_at: None,
            score: None,
            completed: false,
        };
        let cards = (1..=cards).map(build_card).collect();
        StudySession::new(session, cards, fixed_now()).unwrap()
    }

    fn verdict(correct: bool, expected: &str) -> AnswerEvaluation {
        AnswerEvaluation {
            is_correct: correct,
            feedback: None,
            correct_answer: expected.into(),
        }
    }

    fn answer(session: &mut StudySession, raw: &str, correct: bool) {
        let pending = session.prepare_submission(raw).unwrap();
        let expected = session.flashcard(pending.index()).unwrap().answer.text.clone();
        session
            .record_evaluation(pending, verdict(correct, &expected), fixed_now())
            .unwrap();
    }

    #[test]
    fn empty_session_returns_error() {
        let session = Session {
            id: SessionId::new(1),
            user_id: UserId::new(1),
            quiz_id: QuizId::new(1),
            mode: SessionMode::Learn,
            started_at: fixed_now(),
            completed_at: None,
            score: None,
            completed: false,
        };
        let err = StudySession::new(session, Vec::new(), fixed_now()).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn learn_run_walks_presenting_answered_revealed_completed() {
        let mut s = build_session(SessionMode::Learn, 2);
        assert_eq!(s.phase(), SessionPhase::Presenting);
        assert_eq!(s.seen_indices(), &[0]);

        answer(&mut s, "A1", true);
        assert_eq!(s.phase(), SessionPhase::Answered);

        assert_eq!(s.advance(fixed_now()).unwrap(), SessionPhase::Presenting);
        assert_eq!(s.current_index(), 1);

        let revealed = s.reveal().unwrap();
        assert_eq!(revealed.answer.text, "A2");
        assert_eq!(s.phase(), SessionPhase::Revealed);

        assert_eq!(s.advance(fixed_now()).unwrap(), SessionPhase::Completed);
        assert!(s.is_complete());
        assert!(s.result().is_none());
        assert!(s.current_flashcard().is_none());
    }

    #[test]
    fn advance_requires_answer_or_reveal() {
        let mut s = build_session(SessionMode::Learn, 2);
        assert_eq!(
            s.advance(fixed_now()),
            Err(SessionError::NotAnswered { index: 0 })
        );
    }

    #[test]
    fn seen_indices_grow_and_contain_current() {
        fn check(s: &StudySession, last_len: &mut usize) {
            assert!(s.seen_indices().len() >= *last_len);
            assert!(s.seen_indices().contains(&s.current_index()));
            assert_eq!(s.flashcards_completed(), s.seen_indices().len());
            *last_len = s.seen_indices().len();
        }

        let mut s = build_session(SessionMode::Learn, 4);
        let mut last_len = 0;
        check(&s, &mut last_len);

        answer(&mut s, "A1", true);
        check(&s, &mut last_len);
        s.advance(fixed_now()).unwrap();
        check(&s, &mut last_len);
        s.reveal().unwrap();
        check(&s, &mut last_len);
        s.advance(fixed_now()).unwrap();
        check(&s, &mut last_len);
        s.go_to(0).unwrap();
        check(&s, &mut last_len);

        assert_eq!(s.seen_indices(), &[0, 1, 2]);
    }

    #[test]
    fn go_to_only_reaches_seen_cards_and_preserves_records() {
        let mut s = build_session(SessionMode::Learn, 3);
        answer(&mut s, "wrong", false);
        s.advance(fixed_now()).unwrap();
        answer(&mut s, "A2", true);
        let before: Vec<_> = (0..3).map(|i| s.record(i).cloned()).collect();

        assert_eq!(s.go_to(2), Err(SessionError::NotSeen { index: 2 }));
        assert_eq!(s.go_to(0).unwrap(), SessionPhase::Answered);
        assert_eq!(
            s.current_record()
                .and_then(AnswerRecord::user_answer)
                .map(UserAnswer::as_str),
            Some("wrong")
        );

        let after: Vec<_> = (0..3).map(|i| s.record(i).cloned()).collect();
        assert_eq!(before, after);

        // Walking forward again passes through the stored answer.
        assert_eq!(s.advance(fixed_now()).unwrap(), SessionPhase::Answered);
        assert_eq!(s.advance(fixed_now()).unwrap(), SessionPhase::Presenting);
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn resubmitting_a_stored_card_is_rejected() {
        let mut s = build_session(SessionMode::Learn, 2);
        answer(&mut s, "A1", true);
        assert_eq!(
            s.prepare_submission("again"),
            Err(SessionError::AlreadyAnswered { index: 0 })
        );
        assert_eq!(
            s.reveal().map(|_| ()),
            Err(SessionError::AlreadyAnswered { index: 0 })
        );
    }

    #[test]
    fn pending_answer_lands_on_its_own_card_after_navigation() {
        let mut s = build_session(SessionMode::Learn, 3);
        answer(&mut s, "A1", true);
        s.advance(fixed_now()).unwrap();

        let pending = s.prepare_submission("A2").unwrap();
        s.go_to(0).unwrap();
        s.record_evaluation(pending, verdict(true, "A2"), fixed_now())
            .unwrap();

        assert_eq!(s.current_index(), 0);
        assert!(s.record(1).is_some_and(AnswerRecord::is_correct));
        assert_eq!(
            s.record(0).and_then(AnswerRecord::user_answer).map(UserAnswer::as_str),
            Some("A1")
        );
    }

    #[test]
    fn dont_know_is_recorded_as_incorrect() {
        let mut s = build_session(SessionMode::Test, 2);
        let pending = s.prepare_submission("   ").unwrap();
        assert!(pending.answer().is_dont_know());
        s.record_evaluation(pending, verdict(false, "A1"), fixed_now()).unwrap();
        assert!(!s.record(0).unwrap().is_correct());
        assert!(s.record(0).unwrap().is_dont_know());
    }

    #[test]
    fn test_run_completes_after_final_submit_with_consistent_breakdown() {
        let mut s = build_session(SessionMode::Test, 3);
        answer(&mut s, "A1", true);
        s.advance(fixed_now()).unwrap();
        answer(&mut s, "nope", false);
        s.advance(fixed_now()).unwrap();

        let pending = s.prepare_submission("").unwrap();
        let end = fixed_now() + Duration::seconds(75);
        s.record_evaluation(pending, verdict(false, "A3"), end).unwrap();

        assert_eq!(s.phase(), SessionPhase::Completed);
        let result = s.result().unwrap();
        assert_eq!(result.breakdown().len(), result.total() as usize);
        assert_eq!(result.correct() + result.incorrect(), result.total());
        assert_eq!(result.correct(), 1);
        assert_eq!(result.final_score(), 33);
        assert_eq!(result.duration_secs(), Some(75));

        let verdicts: Vec<Verdict> = result.breakdown().iter().map(|b| b.verdict).collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Correct, Verdict::Incorrect, Verdict::Skipped]
        );
        assert_eq!(result.breakdown()[1].user_answer, "nope");

        assert_eq!(
            s.completion(),
            SessionCompletion {
                score: Some(33.0),
                duration_secs: Some(75),
            }
        );
    }

    #[test]
    fn test_mode_forbids_reveal_and_early_finish() {
        let mut s = build_session(SessionMode::Test, 2);
        assert_eq!(s.reveal().map(|_| ()), Err(SessionError::RevealNotAllowed));
        assert_eq!(
            s.finish(fixed_now()),
            Err(SessionError::Unanswered { remaining: 2 })
        );
        assert_eq!(s.build_result(), Err(SessionError::Unanswered { remaining: 2 }));
    }

    #[test]
    fn learn_mode_has_no_result() {
        let mut s = build_session(SessionMode::Learn, 1);
        s.finish(fixed_now()).unwrap();
        assert_eq!(s.build_result(), Err(SessionError::NotTestMode));
        assert_eq!(s.completion().score, None);
        assert_eq!(s.finish(fixed_now()), Err(SessionError::Completed));
    }

    #[test]
    fn dont_know_submissions_fill_gaps_and_complete_test() {
        let mut s = build_session(SessionMode::Test, 3);
        answer(&mut s, "A1", true);
        assert_eq!(
            s.dont_know_submission(0),
            Err(SessionError::AlreadyAnswered { index: 0 })
        );
        for index in s.unanswered_indices() {
            let pending = s.dont_know_submission(index).unwrap();
            assert_eq!(pending.index(), index);
            assert!(pending.answer().is_dont_know());
            s.record_evaluation(pending, verdict(false, "x"), fixed_now())
                .unwrap();
        }
        assert!(s.is_complete());
        assert_eq!(s.result().map(TestResult::skipped), Some(2));
        assert_eq!(s.dont_know_submission(1), Err(SessionError::Completed));
    }

    #[test]
    fn progress_and_timeline_reflect_records() {
        let mut s = build_session(SessionMode::Learn, 3);
        answer(&mut s, "A1", true);
        s.advance(fixed_now()).unwrap();
        answer(&mut s, "x", false);

        let progress = s.progress();
        assert_eq!(
            progress,
            SessionProgress {
                total: 3,
                seen: 2,
                answered: 2,
                correct: 1,
                incorrect: 1,
                remaining: 1,
                current: 1,
                is_complete: false,
            }
        );

        let statuses: Vec<TimelineStatus> = s.timeline().iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                TimelineStatus::Correct,
                TimelineStatus::Incorrect,
                TimelineStatus::Unseen
            ]
        );
        assert!(s.timeline()[1].is_current);
    }

    #[test]
    fn test_timeline_hides_verdicts_until_completion() {
        let mut s = build_session(SessionMode::Test, 2);
        answer(&mut s, "wrong", false);
        s.advance(fixed_now()).unwrap();
        let statuses: Vec<TimelineStatus> = s.timeline().iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![TimelineStatus::Answered, TimelineStatus::Seen]);

        answer(&mut s, "A2", true);
        let statuses: Vec<TimelineStatus> = s.timeline().iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![TimelineStatus::Incorrect, TimelineStatus::Correct]);
        assert!(s.timeline().iter().all(|e| !e.is_current));
    }
}
