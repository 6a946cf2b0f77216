#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::ranking::extractor::RankingParseError;

/// Application-level error taxonomy.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here retries: transport/provider/extraction/validation failures
/// propagate to the caller, which owns retry policy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required credential or setting absent. Also fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing or malformed caller input. Caller-correctable.
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport or provider failure from the generation client.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The reply was received but no valid ranking could be built from it.
    #[error(transparent)]
    Reply(#[from] RankingParseError),

    /// Persistence failure. Occurs after a valid result was computed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Wire envelope: `{ "error": ..., "detail": ... }`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match &self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "configuration error".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Input(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid input".to_string(),
                Some(msg.clone()),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "not found".to_string(),
                Some(msg.clone()),
            ),
            AppError::Llm(LlmError::Transport(e)) => {
                tracing::error!("Generation provider unreachable: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "generation provider unreachable".to_string(),
                    None,
                )
            }
            AppError::Llm(LlmError::Provider { status, message }) => {
                tracing::error!("Generation provider returned {status}: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "generation provider error".to_string(),
                    Some(format!("provider status {status}")),
                )
            }
            AppError::Llm(LlmError::EmptyReply) => (
                StatusCode::BAD_GATEWAY,
                "generation provider returned an empty reply".to_string(),
                None,
            ),
            // The raw reply is operator-only diagnostics: it goes to the log,
            // never into the response body.
            AppError::Reply(RankingParseError::Extraction { reason, raw }) => {
                tracing::warn!(
                    "Model reply rejected ({reason}); raw reply: {}",
                    truncate_for_log(raw)
                );
                (
                    StatusCode::BAD_GATEWAY,
                    "unusable model reply".to_string(),
                    Some(reason.clone()),
                )
            }
            AppError::Reply(RankingParseError::Validation(msg)) => {
                tracing::warn!("Model reply failed validation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "invalid model reply".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage error".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { error, detail })).into_response()
    }
}

fn truncate_for_log(text: &str) -> String {
    const MAX_CHARS: usize = 600;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{head}… [truncated]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_passes_short_text_through() {
        assert_eq!(truncate_for_log("short reply"), "short reply");
    }

    #[test]
    fn test_truncate_caps_long_text() {
        let long = "x".repeat(2000);
        let out = truncate_for_log(&long);
        assert!(out.len() < long.len());
        assert!(out.ends_with("[truncated]"));
    }

    #[test]
    fn test_error_body_omits_absent_detail() {
        let body = ErrorBody {
            error: "storage error".to_string(),
            detail: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"storage error"}"#);
    }
}
