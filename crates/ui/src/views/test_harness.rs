use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use api::{Backend, InMemoryBackend};
use quiz_core::model::{QuizId, SessionMode};
use quiz_core::time::fixed_clock;
use services::{AppServices, QuizService, SessionLoopService, StatsService};

use crate::context::{UiApp, build_app_context};
use crate::views::{
    DashboardView, NewQuizView, QuizDetailView, QuizEditorView, QuizListView, StudyView,
};

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn backend_label(&self) -> String {
        "Test backend".to_string()
    }

    fn quizzes(&self) -> Arc<QuizService> {
        self.services.quizzes()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        self.services.session_loop()
    }

    fn stats(&self) -> Arc<StatsService> {
        self.services.stats()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Quizzes,
    QuizDetail,
    NewQuiz,
    QuizEditor,
    Study(SessionMode),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_id: u64,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[derive(Clone, Copy)]
struct HarnessTarget {
    view: ViewKind,
    quiz_id: u64,
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| HarnessTarget {
        view: props.view,
        quiz_id: props.quiz_id,
    });
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let HarnessTarget { view, quiz_id } = use_context::<HarnessTarget>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Quizzes => rsx! { QuizListView {} },
        ViewKind::QuizDetail => rsx! { QuizDetailView { quiz_id } },
        ViewKind::NewQuiz => rsx! { NewQuizView {} },
        ViewKind::QuizEditor => rsx! { QuizEditorView { quiz_id } },
        ViewKind::Study(mode) => rsx! { StudyView { quiz_id, mode } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub memory: InMemoryBackend,
    pub quiz_id: QuizId,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources settle before rendering.
    pub async fn render_settled(&mut self) -> String {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over an in-memory backend seeded with the demo quiz.
pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let memory = InMemoryBackend::new().with_clock(fixed_clock());
    let quiz_id = memory.seed_demo().await.expect("seed demo");
    let backend = Backend::from_shared(memory.clone());
    setup_view_harness_with_backend(view, &backend, memory, quiz_id)
}

/// Harness over a caller-built backend. `memory` stays reachable for setup
/// and assertions even when `backend` routes some calls elsewhere.
pub fn setup_view_harness_with_backend(
    view: ViewKind,
    backend: &Backend,
    memory: InMemoryBackend,
    quiz_id: QuizId,
) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: AppServices::new(fixed_clock(), backend, false),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_id: quiz_id.value(),
        },
    );
    ViewHarness {
        dom,
        memory,
        quiz_id,
    }
}
