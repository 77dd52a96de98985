mod dashboard;
mod quiz_editor;
mod quizzes;
mod state;
mod study;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use quiz_editor::{NewQuizView, QuizEditorView};
pub use quizzes::{QuizDetailView, QuizListView};
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::StudyView;
