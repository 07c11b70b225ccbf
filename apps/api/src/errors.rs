use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// None of these are retried anywhere — every pipeline failure propagates
/// straight to the handler and out to the front end, which must show the raw
/// diagnostic (content correctness cannot be verified mechanically).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required input field is absent (e.g. a content block with no markup
    /// fragment). Detected before any LLM call is made.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A selected identifier has no corresponding catalog entry — a contract
    /// violation between selector output and catalog state.
    #[error("Missing content block: {0}")]
    MissingBlock(String),

    /// The selection response could not be interpreted as a JSON array of
    /// block identifiers even after fence stripping. Carries the raw model
    /// output for diagnosis.
    #[error("Unparsable selection response: {raw}")]
    UnparsableSelection { raw: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingField(msg) => (StatusCode::BAD_REQUEST, "MISSING_FIELD", msg.clone()),
            AppError::MissingBlock(key) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_BLOCK",
                format!("Selected block '{key}' does not exist in the catalog"),
            ),
            AppError::UnparsableSelection { raw } => {
                tracing::error!("Unparsable selection response: {raw}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UNPARSABLE_SELECTION",
                    format!("Selection response was not a valid key list. Raw output:\n{raw}"),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    format!("Generation call failed: {msg}"),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A file system error occurred".to_string(),
                )
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
