use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::model::ModelError;

/// Failures of a `/chat` request, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The request itself is unusable (400).
    #[error("{0}")]
    Validation(String),

    /// The server is missing something it needs, like the model credential (500).
    #[error("{0}")]
    Configuration(String),

    /// The model provider call failed (500).
    #[error("Error generating response: {0}")]
    Upstream(String),
}

impl From<ModelError> for ChatError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unavailable(msg) => ChatError::Configuration(msg),
            ModelError::Generation(msg) => ChatError::Upstream(msg),
        }
    }
}

impl ResponseError for ChatError {
    fn status_code(&self) -> StatusCode {
        match self {
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::Configuration(_) | ChatError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}
