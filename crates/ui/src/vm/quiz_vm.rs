use quiz_core::model::{AnswerType, Flashcard, FlashcardId, Quiz, QuizId, QuizSort};

use crate::vm::time_fmt::format_datetime;

/// Card in the quiz browser grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: QuizId,
    pub title: String,
    pub avatar: String,
    pub description: Option<String>,
    pub cards_label: String,
    pub updated_str: String,
}

impl From<&Quiz> for QuizCardVm {
    fn from(quiz: &Quiz) -> Self {
        let avatar = quiz.emoji.clone().unwrap_or_else(|| {
            quiz.title
                .chars()
                .next()
                .map_or_else(|| "?".to_string(), |ch| ch.to_uppercase().to_string())
        });
        Self {
            id: quiz.id,
            title: quiz.title.clone(),
            avatar,
            description: quiz.description.clone(),
            cards_label: cards_label(quiz.flashcard_count),
            updated_str: format_datetime(quiz.updated_at),
        }
    }
}

#[must_use]
pub fn map_quiz_cards(quizzes: &[Quiz]) -> Vec<QuizCardVm> {
    quizzes.iter().map(QuizCardVm::from).collect()
}

#[must_use]
pub fn cards_label(count: u32) -> String {
    match count {
        0 => "No cards".to_string(),
        1 => "1 card".to_string(),
        n => format!("{n} cards"),
    }
}

#[must_use]
pub fn sort_value(sort: QuizSort) -> &'static str {
    match sort {
        QuizSort::Title => "title",
        QuizSort::Newest => "newest",
        QuizSort::MostCards => "cards",
    }
}

#[must_use]
pub fn sort_from_value(value: &str) -> QuizSort {
    match value {
        "newest" => QuizSort::Newest,
        "cards" => QuizSort::MostCards,
        _ => QuizSort::Title,
    }
}

#[must_use]
pub fn answer_type_label(answer_type: AnswerType) -> &'static str {
    match answer_type {
        AnswerType::Text => "Text",
        AnswerType::Code => "Code",
        AnswerType::MultipleChoice => "Multiple choice",
        AnswerType::TrueFalse => "True / false",
    }
}

/// Row in the quiz detail flashcard list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardRowVm {
    pub id: FlashcardId,
    pub title: String,
    pub answer_preview: String,
    pub type_label: &'static str,
    pub difficulty_label: &'static str,
}

const PREVIEW_CHARS: usize = 60;

impl From<&Flashcard> for FlashcardRowVm {
    fn from(card: &Flashcard) -> Self {
        let first_line = card.answer.text.lines().next().unwrap_or_default();
        let mut answer_preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
        if first_line.chars().count() > PREVIEW_CHARS || card.answer.text.lines().count() > 1 {
            answer_preview.push('…');
        }
        Self {
            id: card.id,
            title: card.question.title.clone(),
            answer_preview,
            type_label: answer_type_label(card.answer.answer_type),
            difficulty_label: card.question.difficulty.label(),
        }
    }
}

#[must_use]
pub fn map_flashcard_rows(cards: &[Flashcard]) -> Vec<FlashcardRowVm> {
    cards.iter().map(FlashcardRowVm::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Answer, Question};
    use quiz_core::time::fixed_now;

    fn quiz(title: &str, emoji: Option<&str>, count: u32) -> Quiz {
        Quiz {
            id: QuizId::new(1),
            title: title.into(),
            description: None,
            emoji: emoji.map(Into::into),
            flashcard_count: count,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }

    #[test]
    fn quiz_card_prefers_emoji_then_initial() {
        let vm = QuizCardVm::from(&quiz("geography", None, 1));
        assert_eq!(vm.avatar, "G");
        assert_eq!(vm.cards_label, "1 card");

        let vm = QuizCardVm::from(&quiz("Rust", Some("🦀"), 0));
        assert_eq!(vm.avatar, "🦀");
        assert_eq!(vm.cards_label, "No cards");
    }

    #[test]
    fn sort_values_round_trip_with_title_fallback() {
        for sort in [QuizSort::Title, QuizSort::Newest, QuizSort::MostCards] {
            assert_eq!(sort_from_value(sort_value(sort)), sort);
        }
        assert_eq!(sort_from_value("bogus"), QuizSort::Title);
    }

    #[test]
    fn flashcard_row_truncates_multiline_answers() {
        let card = Flashcard {
            id: FlashcardId::new(7),
            quiz_id: QuizId::new(1),
            question: Question::titled("Entry point"),
            answer: Answer::code("fn main() {\n    run();\n}", "rust"),
        };
        let row = FlashcardRowVm::from(&card);
        assert_eq!(row.answer_preview, "fn main() {…");
        assert_eq!(row.type_label, "Code");
        assert_eq!(row.difficulty_label, "Medium");
    }
}
