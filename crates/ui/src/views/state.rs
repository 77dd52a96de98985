use dioxus::prelude::*;

use api::ApiError;
use services::{QuizServiceError, SessionError, StatsError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    NotFound,
    Offline,
    EmptyQuiz,
    InvalidAnswer,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::NotFound => "This quiz no longer exists.",
            ViewError::Offline => "Could not reach the quiz server. Check your connection.",
            ViewError::EmptyQuiz => "This quiz has no flashcards yet. Add some first.",
            ViewError::InvalidAnswer => "That answer does not fit this question.",
        }
    }

    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::NotFound => ViewError::NotFound,
            ApiError::Connection(_) => ViewError::Offline,
            _ => ViewError::Unknown,
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        tracing::warn!(error = %err, "session action failed");
        match err {
            SessionError::Empty => ViewError::EmptyQuiz,
            SessionError::Answer(_) => ViewError::InvalidAnswer,
            SessionError::Api(api) => ViewError::from_api(&api),
            _ => ViewError::Unknown,
        }
    }
}

impl From<QuizServiceError> for ViewError {
    fn from(err: QuizServiceError) -> Self {
        tracing::warn!(error = %err, "quiz request failed");
        match err {
            QuizServiceError::Api(api) => ViewError::from_api(&api),
            _ => ViewError::Unknown,
        }
    }
}

impl From<StatsError> for ViewError {
    fn from(err: StatsError) -> Self {
        tracing::warn!(error = %err, "stats request failed");
        match err {
            StatsError::Api(api) => ViewError::from_api(&api),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_user_facing_kinds() {
        assert_eq!(ViewError::from(SessionError::Empty), ViewError::EmptyQuiz);
        assert_eq!(
            ViewError::from(SessionError::Api(ApiError::Connection("refused".into()))),
            ViewError::Offline
        );
        assert_eq!(
            ViewError::from(QuizServiceError::Api(ApiError::NotFound)),
            ViewError::NotFound
        );
        assert_eq!(
            ViewError::from(StatsError::Api(ApiError::Unauthorized)),
            ViewError::Unknown
        );
    }
}
