use quiz_core::model::{
    Answer, AnswerType, Difficulty, Flashcard, FlashcardDraft, FlashcardId, Question, Quiz,
    QuizDraft,
};
use services::QuizServiceError;

use crate::views::ViewError;

/// Editable quiz metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizFormVm {
    pub title: String,
    pub description: String,
    pub emoji: String,
}

impl QuizFormVm {
    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            description: quiz.description.clone().unwrap_or_default(),
            emoji: quiz.emoji.clone().unwrap_or_default(),
        }
    }

    /// Blank fields become `None`; the service validates the title.
    #[must_use]
    pub fn to_draft(&self) -> QuizDraft {
        QuizDraft {
            title: self.title.clone(),
            description: non_blank(&self.description),
            emoji: non_blank(&self.emoji),
        }
    }
}

/// Editable flashcard. Options are entered one per line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashcardFormVm {
    pub editing: Option<FlashcardId>,
    pub title: String,
    pub text: String,
    pub emoji: String,
    pub difficulty: Difficulty,
    pub answer_type: AnswerType,
    pub answer: String,
    pub options: String,
    pub lang: String,
}

impl FlashcardFormVm {
    #[must_use]
    pub fn from_flashcard(card: &Flashcard) -> Self {
        Self {
            editing: Some(card.id),
            title: card.question.title.clone(),
            text: card.question.text.clone(),
            emoji: card.question.emoji.clone().unwrap_or_default(),
            difficulty: card.question.difficulty,
            answer_type: card.answer.answer_type,
            answer: card.answer.text.clone(),
            options: card.answer.options().join("\n"),
            lang: card
                .answer
                .lang
                .clone()
                .or_else(|| card.question.lang.clone())
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Build a validated draft, or the message to show next to the form.
    ///
    /// # Errors
    ///
    /// Returns the validation message for an invalid form.
    pub fn to_draft(&self) -> Result<FlashcardDraft, String> {
        let lang = non_blank(&self.lang);
        let question = Question {
            title: self.title.clone(),
            text: self.text.clone(),
            lang: lang.clone().filter(|_| self.answer_type == AnswerType::Code),
            difficulty: self.difficulty,
            emoji: non_blank(&self.emoji),
            image: None,
        };
        let answer = match self.answer_type {
            AnswerType::Text => Answer::text(self.answer.clone()),
            AnswerType::Code => Answer {
                lang,
                ..Answer::code(self.answer.clone(), String::new())
            },
            AnswerType::MultipleChoice => {
                let options = self
                    .options
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect();
                Answer::multiple_choice(self.answer.clone(), options)
            }
            AnswerType::TrueFalse => Answer {
                answer_type: AnswerType::TrueFalse,
                ..Answer::text(self.answer.trim().to_ascii_lowercase())
            },
        };
        let draft = FlashcardDraft { question, answer };
        draft.validate().map_err(|err| capitalize(&err.to_string()))?;
        Ok(draft)
    }
}

#[must_use]
pub fn answer_type_value(answer_type: AnswerType) -> &'static str {
    match answer_type {
        AnswerType::Text => "text",
        AnswerType::Code => "code",
        AnswerType::MultipleChoice => "multiple_choice",
        AnswerType::TrueFalse => "true_false",
    }
}

#[must_use]
pub fn answer_type_from_value(value: &str) -> AnswerType {
    match value {
        "code" => AnswerType::Code,
        "multiple_choice" => AnswerType::MultipleChoice,
        "true_false" => AnswerType::TrueFalse,
        _ => AnswerType::Text,
    }
}

#[must_use]
pub fn difficulty_from_value(value: &str) -> Difficulty {
    match value {
        "easy" => Difficulty::Easy,
        "hard" => Difficulty::Hard,
        _ => Difficulty::Medium,
    }
}

#[must_use]
pub fn difficulty_value(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "easy",
        Difficulty::Medium => "medium",
        Difficulty::Hard => "hard",
    }
}

/// Validation failures read as-is; backend failures use the generic copy.
#[must_use]
pub fn save_error_message(err: QuizServiceError) -> String {
    match err {
        QuizServiceError::Quiz(err) => capitalize(&err.to_string()),
        QuizServiceError::Flashcard(err) => capitalize(&err.to_string()),
        other => ViewError::from(other).message().to_string(),
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
