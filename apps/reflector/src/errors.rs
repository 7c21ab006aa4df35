use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::notion::NotionError;

/// Run-level error type. Each variant names the step that failed so the invoker
/// can tell "fetched but generation failed" apart from an empty database.
/// Implements `IntoResponse` so the trigger handler can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    Fetch(NotionError),

    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("Write-back failed: {0}")]
    WriteBack(NotionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps a failure of the fetch step. An empty result set stays a `NotFound`.
    pub fn from_fetch(err: NotionError) -> Self {
        match err {
            NotionError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Fetch(other),
        }
    }

    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NO_ENTRY"),
            AppError::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED"),
            AppError::Generation(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
            AppError::WriteBack(_) => (StatusCode::BAD_GATEWAY, "WRITE_FAILED"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Step failures are logged by the runner.
        let message = match &self {
            AppError::NotFound(msg) => msg.clone(),
            AppError::Fetch(_) => "Could not read the latest journal entry".to_string(),
            AppError::Generation(_) => {
                "The reflection service did not respond successfully".to_string()
            }
            AppError::WriteBack(_) => "The reflection could not be saved".to_string(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
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
