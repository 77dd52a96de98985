use quiz_core::model::FlashcardId;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub seen: usize,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub remaining: usize,
    pub current: usize,
    pub is_complete: bool,
}

/// State of one slot in the session timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineStatus {
    Unseen,
    Seen,
    /// Answered in a test run that is still in progress.
    Answered,
    Correct,
    Incorrect,
    Revealed,
    Skipped,
}

impl TimelineStatus {
    /// Whether the slot can be jumped to.
    #[must_use]
    pub fn is_reachable(self) -> bool {
        !matches!(self, TimelineStatus::Unseen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub index: usize,
    pub flashcard_id: FlashcardId,
    pub status: TimelineStatus,
    pub is_current: bool,
}
