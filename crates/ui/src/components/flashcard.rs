use dioxus::prelude::*;

use crate::vm::{FeedbackVm, PromptVm};

#[component]
pub fn FlashcardView(prompt: PromptVm) -> Element {
    rsx! {
        article { class: "flashcard",
            header { class: "flashcard-header",
                if let Some(emoji) = prompt.emoji.as_ref() {
                    span { class: "flashcard-emoji", "{emoji}" }
                }
                h3 { class: "flashcard-title", "{prompt.title}" }
                span { class: "flashcard-difficulty", "{prompt.difficulty_label}" }
            }
            if !prompt.text.is_empty() {
                if let Some(lang) = prompt.lang.as_ref() {
                    pre { class: "flashcard-code", "data-lang": "{lang}",
                        code { "{prompt.text}" }
                    }
                } else {
                    p { class: "flashcard-text", "{prompt.text}" }
                }
            }
            if let Some(image) = prompt.image.as_ref() {
                img { class: "flashcard-image", src: "{image}", alt: "{prompt.title}" }
            }
        }
    }
}

#[component]
pub fn FeedbackPanel(feedback: FeedbackVm) -> Element {
    match feedback {
        FeedbackVm::Verdict {
            is_correct,
            user_answer,
            correct_answer,
            message,
        } => {
            let (class, label) = if is_correct {
                ("feedback feedback-correct", "Correct")
            } else {
                ("feedback feedback-incorrect", "Not quite")
            };
            rsx! {
                div { class: "{class}", role: "status",
                    strong { "{label}" }
                    p { "Your answer: {user_answer}" }
                    if !is_correct {
                        p { class: "feedback-expected", "Correct answer: {correct_answer}" }
                    }
                    if let Some(message) = message {
                        p { class: "feedback-message", "{message}" }
                    }
                }
            }
        }
        FeedbackVm::Saved { user_answer } => rsx! {
            div { class: "feedback feedback-saved", role: "status",
                strong { "Answer saved" }
                p { "Your answer: {user_answer}" }
            }
        },
        FeedbackVm::Revealed { correct_answer } => rsx! {
            div { class: "feedback feedback-revealed", role: "status",
                strong { "Answer" }
                p { class: "feedback-expected", "{correct_answer}" }
            }
        },
    }
}
