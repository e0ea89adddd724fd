// src/error.rs
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Validation failures reported by the stores. None of them leave a partial
/// record behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Poll question cannot be empty")]
    EmptyPollQuestion,

    #[error("Poll needs at least two non-empty options (got {found})")]
    NotEnoughOptions { found: usize },

    #[error("Poll not found: {0}")]
    PollNotFound(String),

    #[error("Option {option_id} does not belong to poll {poll_id}")]
    InvalidOption { poll_id: String, option_id: String },

    #[error("Form title cannot be empty")]
    EmptyFormTitle,

    #[error("Form needs at least one question")]
    NoQuestions,

    #[error("Question {position} has no text")]
    EmptyQuestionText { position: usize },

    #[error("Single-choice question \"{question}\" needs at least one non-empty option")]
    MissingChoices { question: String },

    #[error("Question id {0} is used more than once")]
    DuplicateQuestionId(String),

    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Required question \"{question}\" was not answered")]
    UnansweredQuestion { question_id: String, question: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::PollNotFound(_) | StoreError::FormNotFound(_))
    }
}

/// Error returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Malformed payload: {0}")]
    Json(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Store(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Json(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_map_to_404() {
        let response = ApiError::from(StoreError::FormNotFound("form-9".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::from(StoreError::PollNotFound("poll-9".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_map_to_400() {
        let response = ApiError::from(StoreError::NotEnoughOptions { found: 1 }).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unanswered_question_names_the_question() {
        let err = StoreError::UnansweredQuestion {
            question_id: "q-1".into(),
            question: "What is your name?".into(),
        };
        assert_eq!(
            err.to_string(),
            "Required question \"What is your name?\" was not answered"
        );
    }
}
