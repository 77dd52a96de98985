use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuizId;

pub const MAX_QUIZ_TITLE_LEN: usize = 120;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz title exceeds {max} characters")]
    TitleTooLong { max: usize },
}

/// Quiz metadata as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub flashcard_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Case-insensitive search over title and description. Blank queries match everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }

    #[must_use]
    pub fn to_draft(&self) -> QuizDraft {
        QuizDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            emoji: self.emoji.clone(),
        }
    }
}

/// Browser ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuizSort {
    #[default]
    Title,
    Newest,
    MostCards,
}

impl QuizSort {
    pub fn sort(self, quizzes: &mut [Quiz]) {
        match self {
            QuizSort::Title => quizzes.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then(a.id.cmp(&b.id))
            }),
            QuizSort::Newest => {
                quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
            }
            QuizSort::MostCards => quizzes.sort_by(|a, b| {
                b.flashcard_count
                    .cmp(&a.flashcard_count)
                    .then(a.id.cmp(&b.id))
            }),
        }
    }
}

/// Editor payload for creating or renaming a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl QuizDraft {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Trim fields, drop blank optionals, and validate the title.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for an empty or oversized title.
    pub fn normalized(self) -> Result<Self, QuizError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if title.chars().count() > MAX_QUIZ_TITLE_LEN {
            return Err(QuizError::TitleTooLong {
                max: MAX_QUIZ_TITLE_LEN,
            });
        }
        Ok(Self {
            title,
            description: non_blank(self.description),
            emoji: non_blank(self.emoji),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn quiz(id: u64, title: &str, cards: u32, age_days: i64) -> Quiz {
        let at = fixed_now() - Duration::days(age_days);
        Quiz {
            id: QuizId::new(id),
            title: title.into(),
            description: Some(format!("About {title}")),
            emoji: None,
            flashcard_count: cards,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn matches_title_and_description() {
        let q = quiz(1, "Rust Basics", 3, 0);
        assert!(q.matches("rust"));
        assert!(q.matches("ABOUT"));
        assert!(q.matches("  "));
        assert!(!q.matches("python"));
    }

    #[test]
    fn sorts_by_each_mode() {
        let mut list = vec![
            quiz(1, "beta", 5, 3),
            quiz(2, "Alpha", 1, 1),
            quiz(3, "gamma", 9, 2),
        ];

        QuizSort::Title.sort(&mut list);
        let ids: Vec<u64> = list.iter().map(|q| q.id.value()).collect();
        assert_eq!(ids, vec![2, 1, 3]);

        QuizSort::Newest.sort(&mut list);
        let ids: Vec<u64> = list.iter().map(|q| q.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        QuizSort::MostCards.sort(&mut list);
        let ids: Vec<u64> = list.iter().map(|q| q.id.value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn draft_normalization() {
        let draft = QuizDraft {
            title: "  Capitals ".into(),
            description: Some("   ".into()),
            emoji: Some(" 🌍 ".into()),
        }
        .normalized()
        .unwrap();
        assert_eq!(draft.title, "Capitals");
        assert_eq!(draft.description, None);
        assert_eq!(draft.emoji.as_deref(), Some("🌍"));

        assert_eq!(
            QuizDraft::titled(" ").normalized(),
            Err(QuizError::EmptyTitle)
        );
        assert!(matches!(
            QuizDraft::titled("x".repeat(MAX_QUIZ_TITLE_LEN + 1)).normalized(),
            Err(QuizError::TitleTooLong { .. })
        ));
    }
}
