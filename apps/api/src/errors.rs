use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Profile extraction produced an undecodable or incomplete payload.
    #[error("Invalid resume data: {0}")]
    Parse(String),

    /// Job-search payload undecodable after both extraction attempts, or invalid.
    #[error("Invalid job listings: {0}")]
    Discovery(String),

    /// A text-generation call failed.
    #[error("Text generation failed: {0}")]
    Generation(String),

    /// Network or API-level fault talking to the model service.
    #[error("Model service error: {0}")]
    Transport(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Parse(_) => {
                tracing::warn!("{self}");
                (StatusCode::UNPROCESSABLE_ENTITY, "PARSE_ERROR", self.to_string())
            }
            AppError::Discovery(_) => {
                tracing::warn!("{self}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DISCOVERY_ERROR",
                    self.to_string(),
                )
            }
            AppError::Generation(_) => {
                tracing::warn!("{self}");
                (StatusCode::BAD_GATEWAY, "GENERATION_ERROR", self.to_string())
            }
            AppError::Transport(e) => {
                tracing::error!("Model service error: {e}");
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
