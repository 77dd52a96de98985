use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use quiz_core::model::{QuizId, QuizSort, SessionMode};
use services::QuizFilter;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    FlashcardRowVm, QuizCardVm, RecentSessionVm, map_flashcard_rows, map_quiz_cards,
    map_recent_session, sort_from_value, sort_value,
};

#[component]
pub fn QuizListView() -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();
    let mut search = use_signal(String::new);
    let mut sort = use_signal(QuizSort::default);

    // Reading the signals here re-runs the query when either changes.
    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        let filter = QuizFilter::default()
            .with_query(search())
            .with_sort(sort());
        async move {
            let list = quizzes.list_quizzes(&filter).await.map_err(ViewError::from)?;
            Ok::<Vec<QuizCardVm>, ViewError>(map_quiz_cards(&list))
        }
    });
    let state = view_state_from_resource(&resource);
    let has_query = !search.read().trim().is_empty();

    rsx! {
        div { class: "page quizzes-page",
            header { class: "view-header",
                h2 { class: "view-title", "Quizzes" }
                Link { class: "btn btn-primary", to: Route::NewQuiz {}, "New quiz" }
            }
            div { class: "quiz-toolbar",
                input {
                    id: "quiz-search",
                    class: "quiz-search",
                    r#type: "search",
                    placeholder: "Search quizzes",
                    value: "{search.read()}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    id: "quiz-sort",
                    class: "quiz-sort",
                    value: sort_value(sort()),
                    onchange: move |evt| sort.set(sort_from_value(&evt.value())),
                    option { value: "title", "Title" }
                    option { value: "newest", "Recently updated" }
                    option { value: "cards", "Most cards" }
                }
            }
            div { class: "view-divider" }
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
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(cards) if cards.is_empty() => rsx! {
                    if has_query {
                        p { class: "empty-state", "No quizzes match that search." }
                    } else {
                        p { class: "empty-state",
                            "No quizzes yet. "
                            Link { to: Route::NewQuiz {}, "Create one" }
                            " to get started."
                        }
                    }
                },
                ViewState::Ready(cards) => rsx! {
                    div { class: "quiz-grid",
                        for card in cards {
                            Link {
                                key: "{card.id}",
                                class: "quiz-card",
                                to: Route::QuizDetail { quiz_id: card.id.value() },
                                span { class: "quiz-avatar", "{card.avatar}" }
                                div { class: "quiz-card-body",
                                    h3 { class: "quiz-card-title", "{card.title}" }
                                    if let Some(description) = card.description.as_ref() {
                                        p { class: "quiz-card-description", "{description}" }
                                    }
                                    span { class: "quiz-card-meta",
                                        "{card.cards_label} · updated {card.updated_str}"
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct QuizDetailData {
    card: QuizCardVm,
    rows: Vec<FlashcardRowVm>,
    history: Vec<RecentSessionVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeleteState {
    Idle,
    Confirming,
    Deleting,
    Error(ViewError),
}

#[component]
pub fn QuizDetailView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quizzes = ctx.quizzes();
    let stats = ctx.stats();
    let id = QuizId::new(quiz_id);
    let mut delete_state = use_signal(|| DeleteState::Idle);

    let quizzes_for_resource = quizzes.clone();
    let resource = use_resource(move || {
        let quizzes = quizzes_for_resource.clone();
        let stats = stats.clone();
        async move {
            let detail = quizzes.get_quiz_detail(id).await.map_err(ViewError::from)?;
            // History is secondary; a failure there should not hide the quiz.
            let history = match stats.quiz_history(id).await {
                Ok(sessions) => sessions
                    .iter()
                    .map(|session| map_recent_session(session, &detail.quiz.title))
                    .collect(),
                Err(err) => {
                    tracing::warn!(error = %err, quiz_id = %id, "quiz history unavailable");
                    Vec::new()
                }
            };
            Ok::<_, ViewError>(QuizDetailData {
                card: QuizCardVm::from(&detail.quiz),
                rows: map_flashcard_rows(&detail.flashcards),
                history,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    let confirm_delete = move |_: MouseEvent| {
        if delete_state() != DeleteState::Confirming {
            delete_state.set(DeleteState::Confirming);
            return;
        }
        delete_state.set(DeleteState::Deleting);
        let quizzes = quizzes.clone();
        spawn(async move {
            match quizzes.delete_quiz(id).await {
                Ok(()) => {
                    let _ = navigator.push(Route::Quizzes {});
                }
                Err(err) => delete_state.set(DeleteState::Error(ViewError::from(err))),
            }
        });
    };

    let delete_label = match delete_state() {
        DeleteState::Confirming => "Really delete?",
        DeleteState::Deleting => "Deleting...",
        DeleteState::Idle | DeleteState::Error(_) => "Delete",
    };
    let delete_error = match delete_state() {
        DeleteState::Error(err) => Some(err.message()),
        _ => None,
    };

    rsx! {
        div { class: "page quiz-detail-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "view-error", "{err.message()}" }
                    Link { to: Route::Quizzes {}, "Back to quizzes" }
                },
                ViewState::Ready(data) => {
                    let has_cards = !data.rows.is_empty();
                    rsx! {
                        header { class: "view-header quiz-detail-header",
                            span { class: "quiz-avatar", "{data.card.avatar}" }
                            div {
                                h2 { class: "view-title", "{data.card.title}" }
                                if let Some(description) = data.card.description.as_ref() {
                                    p { class: "view-subtitle", "{description}" }
                                }
                                span { class: "quiz-card-meta", "{data.card.cards_label}" }
                            }
                        }
                        div { class: "quiz-actions",
                            if has_cards {
                                Link {
                                    class: "btn btn-primary",
                                    to: Route::Study { quiz_id, mode: SessionMode::Learn },
                                    "Learn"
                                }
                                Link {
                                    class: "btn btn-primary",
                                    to: Route::Study { quiz_id, mode: SessionMode::Test },
                                    "Test"
                                }
                            } else {
                                p { class: "empty-state", "Add flashcards to start studying." }
                            }
                            Link {
                                class: "btn btn-secondary",
                                to: Route::QuizEditor { quiz_id },
                                "Edit"
                            }
                            button {
                                id: "quiz-delete",
                                class: "btn btn-danger",
                                r#type: "button",
                                disabled: delete_state() == DeleteState::Deleting,
                                onclick: confirm_delete,
                                "{delete_label}"
                            }
                        }
                        if let Some(message) = delete_error {
                            p { class: "view-error", "{message}" }
                        }
                        div { class: "view-divider" }
                        section { class: "quiz-flashcards",
                            h3 { "Flashcards" }
                            if has_cards {
                                ul { class: "flashcard-rows",
                                    for row in data.rows.iter() {
                                        li { key: "{row.id}", class: "flashcard-row",
                                            span { class: "flashcard-row-title", "{row.title}" }
                                            code { class: "flashcard-row-answer", "{row.answer_preview}" }
                                            span { class: "flashcard-row-type", "{row.type_label}" }
                                            span { class: "flashcard-row-difficulty", "{row.difficulty_label}" }
                                        }
                                    }
                                }
                            } else {
                                p { class: "empty-state", "No flashcards yet." }
                            }
                        }
                        section { class: "quiz-history",
                            h3 { "History" }
                            if data.history.is_empty() {
                                p { class: "empty-state", "No sessions for this quiz yet." }
                            } else {
                                ul { class: "recent-list",
                                    for row in data.history.iter() {
                                        li { key: "{row.id}", class: "recent-row",
                                            span { class: "recent-mode", "{row.mode_label}" }
                                            span { class: "recent-date", "{row.started_str}" }
                                            span { class: "recent-status", "{row.status_label}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
