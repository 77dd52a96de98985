use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::FlashcardId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("a test result needs at least one answered flashcard")]
    Empty,
    #[error("too many flashcards for a test result: {len}")]
    TooManyItems { len: usize },
}

/// Per-flashcard correctness recorded at test completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Answered with "don't know".
    Skipped,
}

impl Verdict {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub flashcard_id: FlashcardId,
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Scored outcome of a completed test run. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    final_score: u32,
    correct: u32,
    total: u32,
    breakdown: Vec<BreakdownItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_secs: Option<u64>,
}

impl TestResult {
    /// Build a result from the per-card breakdown, in session order.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::Empty` for an empty breakdown.
    /// Returns `ResultError::TooManyItems` if the count cannot fit in `u32`.
    pub fn from_breakdown(
        breakdown: Vec<BreakdownItem>,
        duration: Option<Duration>,
    ) -> Result<Self, ResultError> {
        if breakdown.is_empty() {
            return Err(ResultError::Empty);
        }
        let total = u32::try_from(breakdown.len())
            .map_err(|_| ResultError::TooManyItems {
                len: breakdown.len(),
            })?;
        let correct = breakdown
            .iter()
            .filter(|item| item.verdict.is_correct())
            .fold(0_u32, |acc, _| acc.saturating_add(1));

        Ok(Self {
            final_score: percentage(correct, total),
            correct,
            total,
            breakdown,
            duration_secs: duration.and_then(|d| u64::try_from(d.num_seconds()).ok()),
        })
    }

    /// Score in percent, 0..=100.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        self.final_score
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total - self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.breakdown
            .iter()
            .filter(|item| item.verdict == Verdict::Skipped)
            .count()
    }

    #[must_use]
    pub fn breakdown(&self) -> &[BreakdownItem] {
        &self.breakdown
    }

    #[must_use]
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration_secs
    }
}

/// Integer percentage rounded half up.
fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 200 + u64::from(whole);
    let pct = scaled / (u64::from(whole) * 2);
    u32::try_from(pct).unwrap_or(100).min(100)
}
