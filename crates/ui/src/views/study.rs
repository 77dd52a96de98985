use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::{QuizId, SessionMode};

use crate::components::{AnswerInput, FeedbackPanel, FlashcardView, ResultsPanel, Timeline};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AnswerInputKind, FeedbackVm, PromptVm, ResultVm, SessionIntent, SessionVm, TimelineItemVm,
    start_session,
};

/// Everything the study page renders, read out of the session in one pass.
#[derive(Clone, Debug, PartialEq)]
struct StudySnapshot {
    progress_label: String,
    score_label: String,
    prompt: Option<PromptVm>,
    input_kind: Option<AnswerInputKind>,
    feedback: Option<FeedbackVm>,
    can_reveal: bool,
    can_advance: bool,
    next_label: &'static str,
    timeline: Vec<TimelineItemVm>,
    is_complete: bool,
    needs_sync: bool,
    result: Option<ResultVm>,
    learn_summary: Option<String>,
}

impl StudySnapshot {
    fn from_vm(vm: &SessionVm) -> Self {
        Self {
            progress_label: vm.progress_label(),
            score_label: vm.score_label(),
            prompt: vm.prompt(),
            input_kind: vm.input_kind(),
            feedback: vm.feedback(),
            can_reveal: vm.can_reveal(),
            can_advance: vm.can_advance(),
            next_label: vm.next_label(),
            timeline: vm.timeline(),
            is_complete: vm.is_complete(),
            needs_sync: vm.needs_sync(),
            result: vm.result(),
            learn_summary: vm.learn_summary(),
        }
    }
}

fn mode_title(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::Learn => "Learn",
        SessionMode::Test => "Test",
    }
}

#[component]
pub fn StudyView(quiz_id: u64, mode: SessionMode) -> Element {
    let ctx = use_context::<AppContext>();
    let session_loop = ctx.session_loop();
    let mut vm = use_signal(|| None::<SessionVm>);
    let mut draft = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut action_error = use_signal(|| None::<ViewError>);

    let loop_for_start = session_loop.clone();
    // Switching from learn to test keeps this component mounted, so the
    // route params have to be tracked explicitly.
    let mut start = use_resource(use_reactive((&quiz_id, &mode), move |(quiz_id, mode)| {
        let session_loop = loop_for_start.clone();
        async move {
            let started = start_session(&session_loop, QuizId::new(quiz_id), mode).await?;
            vm.set(Some(started));
            draft.set(String::new());
            action_error.set(None);
            Ok::<(), ViewError>(())
        }
    }));
    let start_state = view_state_from_resource(&start);

    let dispatch = use_callback(move |intent: SessionIntent| {
        if busy() {
            return;
        }
        let Some(mut current) = vm.write().take() else {
            return;
        };
        busy.set(true);
        let clears_draft = matches!(
            intent,
            SessionIntent::Submit(_)
                | SessionIntent::DontKnow
                | SessionIntent::Next
                | SessionIntent::GoTo(_)
        );
        let session_loop = session_loop.clone();
        spawn(async move {
            let outcome = current.apply(&session_loop, intent).await;
            vm.set(Some(current));
            busy.set(false);
            match outcome {
                Ok(_) => {
                    action_error.set(None);
                    if clears_draft {
                        draft.set(String::new());
                    }
                }
                Err(err) => action_error.set(Some(err)),
            }
        });
    });

    let snapshot = vm.read().as_ref().map(StudySnapshot::from_vm);
    let error_message = action_error().map(ViewError::message);
    let title = mode_title(mode);
    let header_labels = snapshot
        .as_ref()
        .filter(|snap| !snap.is_complete)
        .map(|snap| (snap.progress_label.clone(), snap.score_label.clone()));

    let body = match (start_state, snapshot) {
        (ViewState::Idle, _) => rsx! {
            p { "Idle" }
        },
        (ViewState::Loading, _) => rsx! {
            p { "Starting session..." }
        },
        (ViewState::Error(ViewError::EmptyQuiz), _) => rsx! {
            p { class: "empty-state", "{ViewError::EmptyQuiz.message()}" }
            Link {
                class: "btn btn-primary",
                to: Route::QuizEditor { quiz_id },
                "Add flashcards"
            }
        },
        (ViewState::Error(err), _) => rsx! {
            p { class: "view-error", "{err.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| start.restart(),
                "Retry"
            }
        },
        // The session is checked out while an action is in flight.
        (ViewState::Ready(()), None) => rsx! {
            p { "Working..." }
        },
        (ViewState::Ready(()), Some(snap)) if snap.is_complete => rsx! {
            section { class: "study-complete",
                if let Some(result) = snap.result {
                    ResultsPanel { result }
                }
                if let Some(summary) = snap.learn_summary {
                    h3 { "Session complete" }
                    p { class: "learn-summary", "{summary}" }
                }
                if snap.needs_sync {
                    div { class: "sync-warning", role: "alert",
                        p { "Your results have not been saved to the server yet." }
                        button {
                            id: "study-retry-sync",
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch.call(SessionIntent::RetrySync),
                            "Retry save"
                        }
                    }
                }
                div { class: "study-actions",
                    button {
                        id: "study-again",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| start.restart(),
                        "Study again"
                    }
                    if !mode.is_test() {
                        Link {
                            class: "btn btn-secondary",
                            to: Route::Study { quiz_id, mode: SessionMode::Test },
                            "Take the test"
                        }
                    }
                    Link {
                        class: "btn btn-secondary",
                        to: Route::QuizDetail { quiz_id },
                        "Back to quiz"
                    }
                }
            }
        },
        (ViewState::Ready(()), Some(snap)) => {
            let presenting = snap.feedback.is_none();
            rsx! {
                Timeline {
                    items: snap.timeline,
                    on_select: move |index| dispatch.call(SessionIntent::GoTo(index)),
                }
                if let Some(prompt) = snap.prompt {
                    FlashcardView { prompt }
                }
                if presenting {
                    if let Some(kind) = snap.input_kind {
                        AnswerInput {
                            kind,
                            value: draft(),
                            disabled: busy(),
                            on_change: move |value| draft.set(value),
                            on_submit: move |raw| dispatch.call(SessionIntent::Submit(raw)),
                            on_dont_know: move |()| dispatch.call(SessionIntent::DontKnow),
                        }
                    }
                    if snap.can_reveal {
                        button {
                            id: "study-reveal",
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch.call(SessionIntent::Reveal),
                            "Show answer"
                        }
                    }
                }
                if let Some(feedback) = snap.feedback {
                    FeedbackPanel { feedback }
                }
                if snap.can_advance {
                    button {
                        id: "study-next",
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: move |_| dispatch.call(SessionIntent::Next),
                        "{snap.next_label}"
                    }
                }
            }
        }
    };

    rsx! {
        div { class: "page study-page",
            header { class: "view-header study-header",
                h2 { class: "view-title", "{title}" }
                if let Some((progress, score)) = header_labels {
                    span { class: "study-progress", "{progress}" }
                    span { class: "study-score", "{score}" }
                    button {
                        id: "study-end",
                        class: "btn btn-secondary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: move |_| dispatch.call(SessionIntent::End),
                        "End session"
                    }
                }
            }
            if let Some(message) = error_message {
                p { class: "view-error", role: "alert", "{message}" }
            }
            div { class: "view-divider" }
            {body}
        }
    }
}
