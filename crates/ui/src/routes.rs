use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use quiz_core::model::SessionMode;

use crate::context::AppContext;
use crate::views::{
    DashboardView, NewQuizView, QuizDetailView, QuizEditorView, QuizListView, StudyView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/quizzes", QuizListView)] Quizzes {},
        #[route("/quizzes/new", NewQuizView)] NewQuiz {},
        #[route("/quizzes/:quiz_id", QuizDetailView)] QuizDetail { quiz_id: u64 },
        #[route("/quizzes/:quiz_id/edit", QuizEditorView)] QuizEditor { quiz_id: u64 },
        #[route("/study/:quiz_id/:mode", StudyView)] Study { quiz_id: u64, mode: SessionMode },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let backend = ctx.backend_label().to_string();

    rsx! {
        nav { class: "sidebar",
            h1 { "Quizdeck" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Quizzes {}, "Quizzes" } }
                li { Link { to: Route::NewQuiz {}, "New quiz" } }
            }
            p { class: "sidebar-backend", "{backend}" }
        }
    }
}
