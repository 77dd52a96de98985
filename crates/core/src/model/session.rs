use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::{QuizId, SessionId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown session mode: {0:?}")]
pub struct ParseModeError(String);

/// Kind of run over a quiz's flashcards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Free study with per-answer feedback and answer reveal.
    #[default]
    Learn,
    /// Every card must be answered; produces a scored result.
    Test,
}

impl SessionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionMode::Learn => "learn",
            SessionMode::Test => "test",
        }
    }

    #[must_use]
    pub const fn is_test(self) -> bool {
        matches!(self, SessionMode::Test)
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "learn" => Ok(SessionMode::Learn),
            "test" => Ok(SessionMode::Test),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Backend record of one learn or test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub quiz_id: QuizId,
    pub mode: SessionMode,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub completed: bool,
}

impl Session {
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.completed_at
            .filter(|_| self.completed)
            .map(|end| end - self.started_at)
    }

    /// Score of a completed test run; learn runs never carry one.
    #[must_use]
    pub fn test_score(&self) -> Option<f64> {
        if self.completed && self.mode.is_test() {
            self.score
        } else {
            None
        }
    }
}

/// Payload closing a session on the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionCompletion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}
