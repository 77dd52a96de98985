use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::flashcard::{Answer, AnswerType};

/// Longest raw answer accepted from the answer input.
pub const MAX_ANSWER_LEN: usize = 10_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("{given:?} is not one of the options")]
    UnknownOption { given: String },

    #[error("{given:?} is not a true/false answer")]
    NotBoolean { given: String },

    #[error("answer exceeds {max} characters")]
    TooLong { max: usize },
}

/// Formatted answer text for one flashcard. Empty means "don't know".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserAnswer(String);

impl UserAnswer {
    #[must_use]
    pub fn dont_know() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn is_dont_know(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Backend verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    pub correct_answer: String,
}

impl AnswerEvaluation {
    /// Pin the backend verdict to the answer it was given for: an empty
    /// answer is never correct.
    #[must_use]
    pub fn for_answer(mut self, answer: &UserAnswer) -> Self {
        if answer.is_dont_know() {
            self.is_correct = false;
        }
        self
    }
}

impl Answer {
    /// Format raw input the way the backend expects it for this answer type.
    ///
    /// Blank input becomes the "don't know" answer.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` when the input cannot represent an answer of this type.
    pub fn prepare(&self, raw: &str) -> Result<UserAnswer, AnswerError> {
        if raw.chars().count() > MAX_ANSWER_LEN {
            return Err(AnswerError::TooLong {
                max: MAX_ANSWER_LEN,
            });
        }
        if raw.trim().is_empty() {
            return Ok(UserAnswer::dont_know());
        }

        let formatted = match self.answer_type {
            AnswerType::Text => collapse_whitespace(raw),
            AnswerType::Code => tidy_code(raw),
            AnswerType::MultipleChoice => self.match_option(raw)?,
            AnswerType::TrueFalse => parse_bool(raw)?.to_string(),
        };
        Ok(UserAnswer(formatted))
    }

    fn match_option(&self, raw: &str) -> Result<String, AnswerError> {
        let wanted = raw.trim().to_lowercase();
        self.options()
            .iter()
            .find(|option| option.trim().to_lowercase() == wanted)
            .map(|option| option.trim().to_string())
            .ok_or_else(|| AnswerError::UnknownOption {
                given: raw.trim().to_string(),
            })
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tidy_code(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|line| !line.is_empty()).unwrap_or(0);
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(start, |idx| idx + 1);
    lines[start..end].join("\n")
}

fn parse_bool(raw: &str) -> Result<bool, AnswerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "0" => Ok(false),
        _ => Err(AnswerError::NotBoolean {
            given: raw.trim().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_dont_know_for_every_type() {
        let answers = [
            Answer::text("Paris"),
            Answer::code("x", "rust"),
            Answer::multiple_choice("A", vec!["A".into(), "B".into()]),
            Answer::true_false(true),
        ];
        for answer in answers {
            let prepared = answer.prepare("  \n\t ").unwrap();
            assert!(prepared.is_dont_know());
        }
    }

    #[test]
    fn text_collapses_whitespace() {
        let prepared = Answer::text("x").prepare("  New   York \n City ").unwrap();
        assert_eq!(prepared.as_str(), "New York City");
    }

    #[test]
    fn code_keeps_indentation_and_drops_blank_edges() {
        let raw = "\n\nfn main() {   \n    println!(\"hi\");\n}\n\n";
        let prepared = Answer::code("x", "rust").prepare(raw).unwrap();
        assert_eq!(prepared.as_str(), "fn main() {\n    println!(\"hi\");\n}");
    }

    #[test]
    fn multiple_choice_canonicalises_option() {
        let answer = Answer::multiple_choice("Blue", vec!["Red".into(), " Blue ".into()]);
        assert_eq!(answer.prepare("blue").unwrap().as_str(), "Blue");
        assert_eq!(
            answer.prepare("green"),
            Err(AnswerError::UnknownOption {
                given: "green".into()
            })
        );
    }

    #[test]
    fn true_false_accepts_common_spellings() {
        let answer = Answer::true_false(true);
        assert_eq!(answer.prepare("Yes").unwrap().as_str(), "true");
        assert_eq!(answer.prepare("f").unwrap().as_str(), "false");
        assert!(matches!(
            answer.prepare("perhaps"),
            Err(AnswerError::NotBoolean { .. })
        ));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let raw = "a".repeat(MAX_ANSWER_LEN + 1);
        assert_eq!(
            Answer::text("a").prepare(&raw),
            Err(AnswerError::TooLong {
                max: MAX_ANSWER_LEN
            })
        );
    }

    #[test]
    fn empty_answer_overrides_a_lenient_verdict() {
        let lenient = AnswerEvaluation {
            is_correct: true,
            feedback: None,
            correct_answer: "Paris".into(),
        };
        let pinned = lenient.clone().for_answer(&UserAnswer::dont_know());
        assert!(!pinned.is_correct);
        assert_eq!(pinned.correct_answer, "Paris");

        let given = Answer::text("Paris").prepare("Paris").unwrap();
        assert!(lenient.for_answer(&given).is_correct);
    }
}
