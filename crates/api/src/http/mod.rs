mod config;
mod wire;

use async_trait::async_trait;
use quiz_core::model::{
    AnswerEvaluation, Flashcard, FlashcardDraft, FlashcardId, Quiz, QuizDraft, QuizId, Session,
    SessionCompletion, SessionId, SessionMode, UserAnswer,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::repository::{ApiError, FlashcardRepository, QuizRepository, SessionRepository};

pub use config::{ApiConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use wire::{ErrorBody, StartSessionRequest, SubmitAnswerRequest};

/// REST adapter for the quiz backend.
///
/// Every call is a single request; there is no retry or caching layer.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `ApiError::InvalidConfig` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.config.endpoint(path)?;
        debug!(%method, %url, "backend request");
        let builder = self.client.request(method, url);
        Ok(match self.config.api_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = send(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = send(self.request(method, path)?.json(body)).await?;
        decode(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        send(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Connection(e.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(body);
    debug!(status = status.as_u16(), %message, "backend rejected request");
    Err(ApiError::from_status(status.as_u16(), message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Connection(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[async_trait]
impl QuizRepository for HttpBackend {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        self.get_json("quizzes").await
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        self.get_json(&format!("quizzes/{id}")).await
    }

    async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.send_json(Method::POST, "quizzes", draft).await
    }

    async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.send_json(Method::PUT, &format!("quizzes/{id}"), draft).await
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), ApiError> {
        self.delete(&format!("quizzes/{id}")).await
    }
}

#[async_trait]
impl FlashcardRepository for HttpBackend {
    async fn list_flashcards(&self, quiz_id: QuizId) -> Result<Vec<Flashcard>, ApiError> {
        self.get_json(&format!("quizzes/{quiz_id}/flashcards")).await
    }

    async fn create_flashcard(
        &self,
        quiz_id: QuizId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError> {
        self.send_json(Method::POST, &format!("quizzes/{quiz_id}/flashcards"), draft).await
    }

    async fn update_flashcard(
        &self,
        id: FlashcardId,
        draft: &FlashcardDraft,
    ) -> Result<Flashcard, ApiError> {
        self.send_json(Method::PUT, &format!("flashcards/{id}"), draft).await
    }

    async fn delete_flashcard(&self, id: FlashcardId) -> Result<(), ApiError> {
        self.delete(&format!("flashcards/{id}")).await
    }
}

#[async_trait]
impl SessionRepository for HttpBackend {
    #[instrument(skip(self), err)]
    async fn start_session(
        &self,
        quiz_id: QuizId,
        mode: SessionMode,
    ) -> Result<Session, ApiError> {
        self.send_json(Method::POST, "sessions", &StartSessionRequest { quiz_id, mode }).await
    }

    #[instrument(skip(self, answer), err)]
    async fn submit_answer(
        &self,
        session_id: SessionId,
        flashcard_id: FlashcardId,
        answer: &UserAnswer,
    ) -> Result<AnswerEvaluation, ApiError> {
        let body = SubmitAnswerRequest {
            flashcard_id,
            user_answer: answer.as_str(),
        };
        self.send_json(Method::POST, &format!("sessions/{session_id}/answers"), &body).await
    }

    #[instrument(skip(self), err)]
    async fn complete_session(
        &self,
        session_id: SessionId,
        completion: &SessionCompletion,
    ) -> Result<Session, ApiError> {
        self.send_json(
            Method::POST,
            &format!("sessions/{session_id}/complete"),
            completion,
        )
        .await
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, ApiError> {
        self.get_json(&format!("sessions/{id}")).await
    }

    async fn list_sessions(&self, quiz_id: Option<QuizId>) -> Result<Vec<Session>, ApiError> {
        match quiz_id {
            Some(id) => self.get_json(&format!("sessions?quiz_id={id}")).await,
            None => self.get_json("sessions").await,
        }
    }
}
