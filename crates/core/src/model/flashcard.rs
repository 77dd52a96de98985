use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{FlashcardId, QuizId};

/// Longest question title the editor accepts.
pub const MAX_QUESTION_TITLE_LEN: usize = 200;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("question title cannot be empty")]
    EmptyTitle,

    #[error("question title exceeds {max} characters")]
    TitleTooLong { max: usize },

    #[error("answer text cannot be empty")]
    EmptyAnswer,

    #[error("multiple choice answers need at least two options")]
    TooFewOptions,

    #[error("answer options cannot be blank")]
    BlankOption,

    #[error("duplicate answer option: {0}")]
    DuplicateOption(String),

    #[error("answer must be one of the options")]
    AnswerNotInOptions,

    #[error("true/false answer must be `true` or `false`, got {0:?}")]
    InvalidBoolean(String),
}

//
// ─── QUESTION / ANSWER ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// How an answer is captured and formatted before submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    #[default]
    Text,
    Code,
    MultipleChoice,
    TrueFalse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
            lang: None,
            difficulty: Difficulty::default(),
            emoji: None,
            image: None,
        }
    }
}

/// Expected answer of a flashcard.
///
/// `options` is only meaningful for `AnswerType::MultipleChoice`; `metadata`
/// carries whatever extra JSON the backend attaches (hints, sources).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(rename = "type", default)]
    pub answer_type: AnswerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Answer {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
            answer_type: AnswerType::Text,
            options: None,
            metadata: None,
        }
    }

    #[must_use]
    pub fn multiple_choice(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            answer_type: AnswerType::MultipleChoice,
            ..Self::text(text)
        }
    }

    #[must_use]
    pub fn true_false(value: bool) -> Self {
        Self {
            answer_type: AnswerType::TrueFalse,
            ..Self::text(value.to_string())
        }
    }

    #[must_use]
    pub fn code(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            answer_type: AnswerType::Code,
            ..Self::text(text)
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

//
// ─── FLASHCARD ─────────────────────────────────────────────────────────────────
//

/// A question/answer unit belonging to a quiz, as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: FlashcardId,
    pub quiz_id: QuizId,
    pub question: Question,
    pub answer: Answer,
}

impl Flashcard {
    #[must_use]
    pub fn from_draft(id: FlashcardId, quiz_id: QuizId, draft: FlashcardDraft) -> Self {
        Self {
            id,
            quiz_id,
            question: draft.question,
            answer: draft.answer,
        }
    }

    /// Editor draft pre-filled with this flashcard's content.
    #[must_use]
    pub fn to_draft(&self) -> FlashcardDraft {
        FlashcardDraft {
            question: self.question.clone(),
            answer: self.answer.clone(),
        }
    }
}

/// Editor payload for creating or replacing a flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub question: Question,
    pub answer: Answer,
}

impl FlashcardDraft {
    /// Check the draft before it is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns the first `FlashcardError` found.
    pub fn validate(&self) -> Result<(), FlashcardError> {
        let title = self.question.title.trim();
        if title.is_empty() {
            return Err(FlashcardError::EmptyTitle);
        }
        if title.chars().count() > MAX_QUESTION_TITLE_LEN {
            return Err(FlashcardError::TitleTooLong {
                max: MAX_QUESTION_TITLE_LEN,
            });
        }

        let expected = self.answer.text.trim();
        if expected.is_empty() {
            return Err(FlashcardError::EmptyAnswer);
        }

        match self.answer.answer_type {
            AnswerType::Text | AnswerType::Code => Ok(()),
            AnswerType::MultipleChoice => validate_options(self.answer.options(), expected),
            AnswerType::TrueFalse => match expected.to_ascii_lowercase().as_str() {
                "true" | "false" => Ok(()),
                _ => Err(FlashcardError::InvalidBoolean(expected.to_string())),
            },
        }
    }

    /// Trimmed copy ready to be sent.
    ///
    /// # Errors
    ///
    /// Returns `FlashcardError` if the draft is invalid.
    pub fn normalized(mut self) -> Result<Self, FlashcardError> {
        self.validate()?;
        self.question.title = self.question.title.trim().to_string();
        self.question.text = self.question.text.trim().to_string();
        if self.answer.answer_type != AnswerType::Code {
            self.answer.text = self.answer.text.trim().to_string();
        }
        if self.answer.answer_type == AnswerType::TrueFalse {
            self.answer.text = self.answer.text.to_ascii_lowercase();
        }
        if let Some(options) = self.answer.options.as_mut() {
            for option in options.iter_mut() {
                *option = option.trim().to_string();
            }
        }
        Ok(self)
    }
}

fn validate_options(options: &[String], expected: &str) -> Result<(), FlashcardError> {
    if options.len() < 2 {
        return Err(FlashcardError::TooFewOptions);
    }
    let mut seen: Vec<String> = Vec::with_capacity(options.len());
    for option in options {
        let trimmed = option.trim();
        if trimmed.is_empty() {
            return Err(FlashcardError::BlankOption);
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            return Err(FlashcardError::DuplicateOption(trimmed.to_string()));
        }
        seen.push(key);
    }
    if !seen.contains(&expected.to_lowercase()) {
        return Err(FlashcardError::AnswerNotInOptions);
    }
    Ok(())
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(answer: Answer) -> FlashcardDraft {
        FlashcardDraft {
            question: Question::titled("Capital of France?"),
            answer,
        }
    }

    #[test]
    fn text_draft_is_valid() {
        assert_eq!(draft(Answer::text("Paris")).validate(), Ok(()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut d = draft(Answer::text("Paris"));
        d.question.title = "   ".into();
        assert_eq!(d.validate(), Err(FlashcardError::EmptyTitle));
    }

    #[test]
    fn long_title_is_rejected() {
        let mut d = draft(Answer::text("Paris"));
        d.question.title = "x".repeat(MAX_QUESTION_TITLE_LEN + 1);
        assert_eq!(
            d.validate(),
            Err(FlashcardError::TitleTooLong {
                max: MAX_QUESTION_TITLE_LEN
            })
        );
    }

    #[test]
    fn multiple_choice_requires_answer_among_options() {
        let d = draft(Answer::multiple_choice(
            "Paris",
            vec!["Lyon".into(), "Nice".into()],
        ));
        assert_eq!(d.validate(), Err(FlashcardError::AnswerNotInOptions));

        let d = draft(Answer::multiple_choice("paris", vec!["Paris".into(), "Nice".into()]));
        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn multiple_choice_rejects_duplicates_and_blanks() {
        let d = draft(Answer::multiple_choice(
            "Paris",
            vec!["Paris".into(), "paris ".into()],
        ));
        assert_eq!(
            d.validate(),
            Err(FlashcardError::DuplicateOption("paris".into()))
        );

        let d = draft(Answer::multiple_choice("Paris", vec!["Paris".into(), " ".into()]));
        assert_eq!(d.validate(), Err(FlashcardError::BlankOption));

        let d = draft(Answer::multiple_choice("Paris", vec!["Paris".into()]));
        assert_eq!(d.validate(), Err(FlashcardError::TooFewOptions));
    }

    #[test]
    fn true_false_requires_boolean_literal() {
        let mut answer = Answer::true_false(true);
        answer.text = "maybe".into();
        assert_eq!(
            draft(answer).validate(),
            Err(FlashcardError::InvalidBoolean("maybe".into()))
        );
        assert_eq!(draft(Answer::true_false(false)).validate(), Ok(()));
    }

    #[test]
    fn normalized_trims_but_keeps_code_indentation() {
        let mut d = draft(Answer::code("  fn main() {}\n", "rust"));
        d.question.title = "  Entry point  ".into();
        let d = d.normalized().unwrap();
        assert_eq!(d.question.title, "Entry point");
        assert_eq!(d.answer.text, "  fn main() {}\n");
    }

    #[test]
    fn answer_type_is_serialized_as_type_field() {
        let json = serde_json::to_value(Answer::true_false(true)).unwrap();
        assert_eq!(json["type"], "true_false");
        assert_eq!(json["text"], "true");
        assert!(json.get("options").is_none());
    }

    #[test]
    fn flashcard_deserializes_with_missing_optionals() {
        let raw = r#"{
            "id": 3,
            "quiz_id": 1,
            "question": {"title": "2 + 2?", "difficulty": "easy"},
            "answer": {"text": "4"}
        }"#;
        let card: Flashcard = serde_json::from_str(raw).unwrap();
        assert_eq!(card.id, FlashcardId::new(3));
        assert_eq!(card.question.difficulty, Difficulty::Easy);
        assert_eq!(card.answer.answer_type, AnswerType::Text);
        assert!(card.answer.options().is_empty());
    }
}
