// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the `/chat` HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Why a backend call did not produce a usable reply.
///
/// The widget controller treats every variant as the same "unreachable"
/// outcome; the variant only ends up in logs.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered with status {status}")]
    Status { status: u16 },
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Transport(_) => "transport",
            BackendError::Status { .. } => "status",
            BackendError::Malformed(_) => "malformed",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} is not a valid http(s) url: {value:?}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("{key} is not a valid socket address: {value:?}")]
    InvalidAddr { key: &'static str, value: String },
}
