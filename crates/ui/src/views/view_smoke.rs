use std::sync::Arc;

use api::{ApiError, Backend, InMemoryBackend, QuizRepository};
use quiz_core::model::{Quiz, QuizDraft, QuizId, SessionMode};
use quiz_core::time::fixed_clock;
use services::SessionLoopService;

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_backend};

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_stats_and_empty_history() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Average score"), "missing stat card in {html}");
    assert!(html.contains("Last 7 days"), "missing activity in {html}");
    assert!(html.contains("No sessions yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_lists_finished_test() {
    let mut harness = setup_view_harness(ViewKind::Dashboard).await;
    let session_loop = SessionLoopService::from_backend(
        fixed_clock(),
        &Backend::from_shared(harness.memory.clone()),
    );
    let mut session = session_loop
        .start_session(harness.quiz_id, SessionMode::Test)
        .await
        .expect("start");
    session_loop
        .submit_answer(&mut session, "mut")
        .await
        .expect("submit");
    session_loop.end_session(&mut session).await.expect("end");

    let html = harness.render_settled().await;
    assert!(html.contains("Rust Basics"), "missing quiz title in {html}");
    assert!(html.contains("25%"), "missing score in {html}");
    assert!(!html.contains("No sessions yet"), "stale empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_smoke_renders_cards() {
    let mut harness = setup_view_harness(ViewKind::Quizzes).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Rust Basics"), "missing quiz in {html}");
    assert!(html.contains("4 cards"), "missing card count in {html}");
    assert!(html.contains("quiz-search"), "missing search box in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_detail_smoke_renders_flashcards_and_study_links() {
    let mut harness = setup_view_harness(ViewKind::QuizDetail).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Mutable bindings"), "missing flashcard in {html}");
    assert!(html.contains("Learn"), "missing learn link in {html}");
    assert!(html.contains("Test"), "missing test link in {html}");
    assert!(
        html.contains("No sessions for this quiz yet"),
        "missing history in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_editor_smoke_renders_forms() {
    let mut harness = setup_view_harness(ViewKind::QuizEditor).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Edit quiz"), "missing heading in {html}");
    assert!(html.contains("Flashcards (4)"), "missing card list in {html}");
    assert!(html.contains("Add flashcard"), "missing card form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn new_quiz_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::NewQuiz).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Create quiz"), "missing submit in {html}");
    assert!(html.contains("quiz-title"), "missing title field in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_learn_mode_presents_first_card() {
    let mut harness = setup_view_harness(ViewKind::Study(SessionMode::Learn)).await;
    let html = harness.render_settled().await;
    assert!(html.contains("Card 1 of 4"), "missing progress in {html}");
    assert!(html.contains("Mutable bindings"), "missing prompt in {html}");
    assert!(html.contains("Show answer"), "missing reveal in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_test_mode_hides_reveal() {
    let mut harness = setup_view_harness(ViewKind::Study(SessionMode::Test)).await;
    let html = harness.render_settled().await;
    assert!(html.contains("0 answered"), "missing answered count in {html}");
    assert!(!html.contains("Show answer"), "reveal offered in test mode: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_smoke_empty_quiz_links_to_editor() {
    let memory = InMemoryBackend::new().with_clock(fixed_clock());
    let quiz = memory
        .create_quiz(&QuizDraft::titled("Empty"))
        .await
        .expect("create quiz");
    let backend = Backend::from_shared(memory.clone());
    let mut harness = setup_view_harness_with_backend(
        ViewKind::Study(SessionMode::Learn),
        &backend,
        memory,
        quiz.id,
    );
    let html = harness.render_settled().await;
    assert!(html.contains("no flashcards yet"), "missing empty message in {html}");
    assert!(html.contains("Add flashcards"), "missing editor link in {html}");
}

struct OfflineQuizzes;

#[async_trait::async_trait]
impl QuizRepository for OfflineQuizzes {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        Err(ApiError::Connection("refused".to_string()))
    }

    async fn get_quiz(&self, _id: QuizId) -> Result<Quiz, ApiError> {
        Err(ApiError::Connection("refused".to_string()))
    }

    async fn create_quiz(&self, _draft: &QuizDraft) -> Result<Quiz, ApiError> {
        Err(ApiError::Connection("refused".to_string()))
    }

    async fn update_quiz(&self, _id: QuizId, _draft: &QuizDraft) -> Result<Quiz, ApiError> {
        Err(ApiError::Connection("refused".to_string()))
    }

    async fn delete_quiz(&self, _id: QuizId) -> Result<(), ApiError> {
        Err(ApiError::Connection("refused".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_list_smoke_renders_offline_error() {
    let memory = InMemoryBackend::new().with_clock(fixed_clock());
    let backend = Backend {
        quizzes: Arc::new(OfflineQuizzes),
        ..Backend::from_shared(memory.clone())
    };
    let mut harness =
        setup_view_harness_with_backend(ViewKind::Quizzes, &backend, memory, QuizId::new(1));
    let html = harness.render_settled().await;
    assert!(
        html.contains("Could not reach the quiz server"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
