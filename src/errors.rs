// src/errors.rs
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PictoscopeError {
    #[error("Redis error: {0}")]
    Redis(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<redis::RedisError> for PictoscopeError {
    fn from(err: redis::RedisError) -> Self {
        PictoscopeError::Redis(err.to_string())
    }
}

impl From<serde_json::Error> for PictoscopeError {
    fn from(err: serde_json::Error) -> Self {
        PictoscopeError::Serialization(err.to_string())
    }
}

impl ResponseError for PictoscopeError {
    fn status_code(&self) -> StatusCode {
        match self {
            PictoscopeError::Redis(_)
            | PictoscopeError::Serialization(_)
            | PictoscopeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PictoscopeError::Validation(_) => StatusCode::BAD_REQUEST,
            PictoscopeError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let label = match self {
            PictoscopeError::Redis(_) => "Database error",
            PictoscopeError::Serialization(_) => "Data processing error",
            PictoscopeError::Validation(_) => "Validation error",
            PictoscopeError::Config(_) => "Configuration error",
            PictoscopeError::NotFound(_) => "Not found",
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": label,
            "message": self.to_string()
        }))
    }
}
