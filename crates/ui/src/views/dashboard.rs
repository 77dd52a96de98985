use dioxus::prelude::*;
use dioxus_router::Link;

use crate::components::StatCard;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();

    let resource = use_resource(move || {
        let stats = stats.clone();
        async move {
            let dashboard = stats.dashboard().await.map_err(ViewError::from)?;
            Ok::<DashboardVm, ViewError>(map_dashboard(&dashboard))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
                p { class: "view-subtitle", "Your study activity at a glance." }
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
                ViewState::Ready(vm) => rsx! {
                    section { class: "stat-grid",
                        for card in vm.stat_cards.iter().cloned() {
                            StatCard { key: "{card.label}", card }
                        }
                    }
                    section { class: "dashboard-activity",
                        h3 { "Last 7 days" }
                        div { class: "activity-bars",
                            for bar in vm.activity.iter() {
                                div {
                                    key: "{bar.day_label}",
                                    class: "activity-bar",
                                    title: "{bar.sessions} sessions",
                                    div {
                                        class: "activity-bar-fill",
                                        style: "height: {bar.height_pct}%",
                                    }
                                    span { class: "activity-bar-label", "{bar.day_label}" }
                                }
                            }
                        }
                    }
                    section { class: "dashboard-recent",
                        h3 { "Recent sessions" }
                        if vm.recent.is_empty() {
                            if vm.has_quizzes {
                                p { class: "empty-state",
                                    "No sessions yet. "
                                    Link { to: Route::Quizzes {}, "Pick a quiz" }
                                    " to start studying."
                                }
                            } else {
                                p { class: "empty-state",
                                    "No quizzes yet. "
                                    Link { to: Route::NewQuiz {}, "Create your first quiz" }
                                    "."
                                }
                            }
                        } else {
                            ul { class: "recent-list",
                                for row in vm.recent.iter() {
                                    li { key: "{row.id}", class: "recent-row",
                                        Link {
                                            to: Route::QuizDetail { quiz_id: row.quiz_id.value() },
                                            "{row.quiz_title}"
                                        }
                                        span { class: "recent-mode", "{row.mode_label}" }
                                        span { class: "recent-date", "{row.started_str}" }
                                        span { class: "recent-status", "{row.status_label}" }
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
