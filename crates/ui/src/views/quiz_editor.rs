use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use quiz_core::model::{AnswerType, Flashcard, FlashcardId, QuizId};
use services::QuizDetail;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    FlashcardFormVm, QuizFormVm, answer_type_from_value, answer_type_label, answer_type_value,
    difficulty_from_value, difficulty_value, save_error_message,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(String),
}

impl SaveState {
    fn is_saving(&self) -> bool {
        matches!(self, SaveState::Saving)
    }
}

#[component]
fn SaveStatus(state: SaveState) -> Element {
    match state {
        SaveState::Idle | SaveState::Saving => rsx! {},
        SaveState::Saved => rsx! {
            p { class: "save-status save-status-ok", "Saved" }
        },
        SaveState::Error(message) => rsx! {
            p { class: "save-status view-error", "{message}" }
        },
    }
}

#[component]
fn QuizFormFields(form: Signal<QuizFormVm>) -> Element {
    let mut form = form;
    let current = form.read().clone();

    rsx! {
        div { class: "editor-section",
            label { class: "editor-label", r#for: "quiz-title", "Title" }
            input {
                id: "quiz-title",
                class: "editor-input",
                placeholder: "e.g. Rust Basics",
                value: "{current.title}",
                oninput: move |evt| form.write().title = evt.value(),
            }
        }
        div { class: "editor-section",
            label { class: "editor-label", r#for: "quiz-emoji", "Emoji" }
            input {
                id: "quiz-emoji",
                class: "editor-input editor-input-short",
                value: "{current.emoji}",
                oninput: move |evt| form.write().emoji = evt.value(),
            }
        }
        div { class: "editor-section",
            label { class: "editor-label", r#for: "quiz-description", "Description" }
            textarea {
                id: "quiz-description",
                class: "editor-input",
                rows: 3,
                value: "{current.description}",
                oninput: move |evt| form.write().description = evt.value(),
            }
        }
    }
}

#[component]
pub fn NewQuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quizzes = ctx.quizzes();
    let form = use_signal(QuizFormVm::default);
    let mut save_state = use_signal(|| SaveState::Idle);

    let create = move |_: MouseEvent| {
        let draft = form.read().to_draft();
        save_state.set(SaveState::Saving);
        let quizzes = quizzes.clone();
        spawn(async move {
            match quizzes.create_quiz(draft).await {
                Ok(quiz) => {
                    let _ = navigator.replace(Route::QuizEditor {
                        quiz_id: quiz.id.value(),
                    });
                }
                Err(err) => save_state.set(SaveState::Error(save_error_message(err))),
            }
        });
    };

    rsx! {
        div { class: "page editor-page",
            header { class: "view-header",
                h2 { class: "view-title", "New quiz" }
            }
            div { class: "view-divider" }
            QuizFormFields { form }
            SaveStatus { state: save_state() }
            div { class: "editor-actions",
                Link { class: "btn btn-secondary", to: Route::Quizzes {}, "Cancel" }
                button {
                    id: "quiz-create",
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: save_state.read().is_saving(),
                    onclick: create,
                    "Create quiz"
                }
            }
        }
    }
}

#[component]
fn FlashcardFormFields(form: Signal<FlashcardFormVm>) -> Element {
    let mut form = form;
    let current = form.read().clone();
    let answer_field = match current.answer_type {
        AnswerType::TrueFalse => rsx! {
            select {
                id: "card-answer",
                class: "editor-input",
                value: "{current.answer}",
                onchange: move |evt| form.write().answer = evt.value(),
                option { value: "", "Choose..." }
                option { value: "true", "True" }
                option { value: "false", "False" }
            }
        },
        AnswerType::Code => rsx! {
            textarea {
                id: "card-answer",
                class: "editor-input editor-code",
                rows: 5,
                value: "{current.answer}",
                oninput: move |evt| form.write().answer = evt.value(),
            }
        },
        AnswerType::Text | AnswerType::MultipleChoice => rsx! {
            input {
                id: "card-answer",
                class: "editor-input",
                value: "{current.answer}",
                oninput: move |evt| form.write().answer = evt.value(),
            }
        },
    };

    rsx! {
        div { class: "editor-section",
            label { class: "editor-label", r#for: "card-title", "Question" }
            input {
                id: "card-title",
                class: "editor-input",
                value: "{current.title}",
                oninput: move |evt| form.write().title = evt.value(),
            }
        }
        div { class: "editor-section",
            label { class: "editor-label", r#for: "card-text", "Details" }
            textarea {
                id: "card-text",
                class: "editor-input",
                rows: 3,
                value: "{current.text}",
                oninput: move |evt| form.write().text = evt.value(),
            }
        }
        div { class: "editor-row",
            div { class: "editor-section",
                label { class: "editor-label", r#for: "card-emoji", "Emoji" }
                input {
                    id: "card-emoji",
                    class: "editor-input editor-input-short",
                    value: "{current.emoji}",
                    oninput: move |evt| form.write().emoji = evt.value(),
                }
            }
            div { class: "editor-section",
                label { class: "editor-label", r#for: "card-difficulty", "Difficulty" }
                select {
                    id: "card-difficulty",
                    class: "editor-input",
                    value: difficulty_value(current.difficulty),
                    onchange: move |evt| form.write().difficulty = difficulty_from_value(&evt.value()),
                    option { value: "easy", "Easy" }
                    option { value: "medium", "Medium" }
                    option { value: "hard", "Hard" }
                }
            }
            div { class: "editor-section",
                label { class: "editor-label", r#for: "card-type", "Answer type" }
                select {
                    id: "card-type",
                    class: "editor-input",
                    value: answer_type_value(current.answer_type),
                    onchange: move |evt| form.write().answer_type = answer_type_from_value(&evt.value()),
                    for ty in [
                        AnswerType::Text,
                        AnswerType::Code,
                        AnswerType::MultipleChoice,
                        AnswerType::TrueFalse,
                    ] {
                        option { value: answer_type_value(ty), "{answer_type_label(ty)}" }
                    }
                }
            }
        }
        div { class: "editor-section",
            label { class: "editor-label", r#for: "card-answer", "Answer" }
            {answer_field}
        }
        if current.answer_type == AnswerType::MultipleChoice {
            div { class: "editor-section",
                label { class: "editor-label", r#for: "card-options", "Options (one per line)" }
                textarea {
                    id: "card-options",
                    class: "editor-input",
                    rows: 4,
                    value: "{current.options}",
                    oninput: move |evt| form.write().options = evt.value(),
                }
            }
        }
        if current.answer_type == AnswerType::Code {
            div { class: "editor-section",
                label { class: "editor-label", r#for: "card-lang", "Language" }
                input {
                    id: "card-lang",
                    class: "editor-input editor-input-short",
                    placeholder: "rust",
                    value: "{current.lang}",
                    oninput: move |evt| form.write().lang = evt.value(),
                }
            }
        }
    }
}

#[component]
pub fn QuizEditorView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();
    let id = QuizId::new(quiz_id);
    let mut quiz_form = use_signal(QuizFormVm::default);
    let mut quiz_form_loaded = use_signal(|| false);
    let mut quiz_save = use_signal(|| SaveState::Idle);
    let mut card_form = use_signal(FlashcardFormVm::default);
    let mut card_save = use_signal(|| SaveState::Idle);

    let quizzes_for_resource = quizzes.clone();
    let mut resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        async move {
            let detail = quizzes.get_quiz_detail(id).await.map_err(ViewError::from)?;
            // Reloads after card edits must not clobber unsaved quiz fields.
            if !*quiz_form_loaded.peek() {
                quiz_form.set(QuizFormVm::from_quiz(&detail.quiz));
                quiz_form_loaded.set(true);
            }
            Ok::<QuizDetail, ViewError>(detail)
        }
    });
    let state = view_state_from_resource(&resource);

    let quizzes_for_quiz_save = quizzes.clone();
    let save_quiz = move |_: MouseEvent| {
        let draft = quiz_form.read().to_draft();
        quiz_save.set(SaveState::Saving);
        let quizzes = quizzes_for_quiz_save.clone();
        spawn(async move {
            match quizzes.update_quiz(id, draft).await {
                Ok(quiz) => {
                    quiz_form.set(QuizFormVm::from_quiz(&quiz));
                    quiz_save.set(SaveState::Saved);
                }
                Err(err) => quiz_save.set(SaveState::Error(save_error_message(err))),
            }
        });
    };

    let quizzes_for_card_save = quizzes.clone();
    let save_card = move |_: MouseEvent| {
        let form = card_form.read().clone();
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                card_save.set(SaveState::Error(message));
                return;
            }
        };
        card_save.set(SaveState::Saving);
        let quizzes = quizzes_for_card_save.clone();
        spawn(async move {
            let saved = match form.editing {
                Some(card_id) => quizzes.update_flashcard(card_id, draft).await,
                None => quizzes.add_flashcard(id, draft).await,
            };
            match saved {
                Ok(_) => {
                    card_form.set(FlashcardFormVm::default());
                    card_save.set(SaveState::Saved);
                    resource.restart();
                }
                Err(err) => card_save.set(SaveState::Error(save_error_message(err))),
            }
        });
    };

    let delete_card = use_callback(move |card_id: FlashcardId| {
        let quizzes = quizzes.clone();
        spawn(async move {
            match quizzes.delete_flashcard(card_id).await {
                Ok(()) => {
                    if card_form.peek().editing == Some(card_id) {
                        card_form.set(FlashcardFormVm::default());
                    }
                    resource.restart();
                }
                Err(err) => card_save.set(SaveState::Error(save_error_message(err))),
            }
        });
    });

    let card_heading = if card_form.read().is_editing() {
        "Edit flashcard"
    } else {
        "Add flashcard"
    };
    let card_submit_label = if card_form.read().is_editing() {
        "Update flashcard"
    } else {
        "Add flashcard"
    };

    rsx! {
        div { class: "page editor-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "view-error", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
                ViewState::Ready(detail) => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "Edit quiz" }
                        Link {
                            class: "btn btn-secondary",
                            to: Route::QuizDetail { quiz_id },
                            "Done"
                        }
                    }
                    div { class: "view-divider" }
                    section { class: "editor-window",
                        QuizFormFields { form: quiz_form }
                        SaveStatus { state: quiz_save() }
                        div { class: "editor-actions",
                            button {
                                id: "quiz-save",
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: quiz_save.read().is_saving(),
                                onclick: save_quiz,
                                "Save quiz"
                            }
                        }
                    }
                    section { class: "editor-window",
                        h3 { "Flashcards ({detail.flashcards.len()})" }
                        ul { class: "flashcard-rows",
                            for card in detail.flashcards.iter().cloned() {
                                EditableFlashcardRow {
                                    key: "{card.id}",
                                    card,
                                    on_edit: move |card: Flashcard| {
                                        card_form.set(FlashcardFormVm::from_flashcard(&card));
                                        card_save.set(SaveState::Idle);
                                    },
                                    on_delete: delete_card,
                                }
                            }
                        }
                    }
                    section { class: "editor-window",
                        h3 { "{card_heading}" }
                        FlashcardFormFields { form: card_form }
                        SaveStatus { state: card_save() }
                        div { class: "editor-actions",
                            if card_form.read().is_editing() {
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| {
                                        card_form.set(FlashcardFormVm::default());
                                        card_save.set(SaveState::Idle);
                                    },
                                    "Cancel edit"
                                }
                            }
                            button {
                                id: "card-save",
                                class: "btn btn-primary",
                                r#type: "button",
                                disabled: card_save.read().is_saving(),
                                onclick: save_card,
                                "{card_submit_label}"
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn EditableFlashcardRow(
    card: Flashcard,
    on_edit: Callback<Flashcard>,
    on_delete: Callback<FlashcardId>,
) -> Element {
    let card_id = card.id;
    let title = card.question.title.clone();
    let type_label = answer_type_label(card.answer.answer_type);

    rsx! {
        li { class: "flashcard-row",
            span { class: "flashcard-row-title", "{title}" }
            span { class: "flashcard-row-type", "{type_label}" }
            button {
                class: "btn btn-small",
                r#type: "button",
                onclick: move |_| on_edit.call(card.clone()),
                "Edit"
            }
            button {
                class: "btn btn-small btn-danger",
                r#type: "button",
                onclick: move |_| on_delete.call(card_id),
                "Delete"
            }
        }
    }
}
