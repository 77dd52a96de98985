//! Request/response bodies that only exist on the wire.

use quiz_core::model::{FlashcardId, QuizId, SessionMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct StartSessionRequest {
    pub quiz_id: QuizId,
    pub mode: SessionMode,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitAnswerRequest<'a> {
    pub flashcard_id: FlashcardId,
    pub user_answer: &'a str,
}

/// Error payloads come as `{"message": ..}` or `{"error": ..}` depending on the route.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_prefers_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"quiz is archived","error":"x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("quiz is archived"));

        let body: ErrorBody = serde_json::from_str(r#"{"error":"bad mode"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("bad mode"));

        let body: ErrorBody = serde_json::from_str(r#"{"detail":"?"}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn submit_request_shape() {
        let body = SubmitAnswerRequest {
            flashcard_id: FlashcardId::new(4),
            user_answer: "mut",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"flashcard_id": 4, "user_answer": "mut"}));
    }
}
