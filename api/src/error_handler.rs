use ai_llm_service::AiLlmError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chat_relay::{RelayError, UpstreamError};
use rag_store::RagError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Retrieval failed")]
    Retrieval(#[from] RagError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Relay(RelayError::InvalidInput) => StatusCode::BAD_REQUEST,
            AppError::Relay(RelayError::Upstream(UpstreamError::Status { status, .. })) => *status,
            AppError::Relay(RelayError::Upstream(UpstreamError::Timeout(_))) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Relay(RelayError::Upstream(UpstreamError::Transport(_))) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Relay(RelayError::Internal(_))
            | AppError::Retrieval(_)
            | AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// `(error, details)` pair written to the response body.
    fn body(&self) -> ErrorBody {
        match self {
            AppError::Relay(RelayError::InvalidInput) => ErrorBody::new(self.to_string(), None),
            AppError::Relay(RelayError::Upstream(UpstreamError::Status { body, .. })) => {
                ErrorBody::new(self.to_string(), Some(body.clone()))
            }
            AppError::Relay(RelayError::Upstream(e)) => ErrorBody::new(self.to_string(), Some(e.to_string())),
            AppError::Relay(RelayError::Internal(details)) => {
                ErrorBody::new("Failed to process message".into(), Some(details.clone()))
            }
            AppError::Retrieval(e) => ErrorBody::new(self.to_string(), Some(e.to_string())),
            AppError::BadRequest(details) => {
                ErrorBody::new("Invalid request body".into(), Some(details.clone()))
            }
            AppError::Config(_) | AppError::Bind(_) | AppError::Server(_) => {
                ErrorBody::new("Internal server error".into(), Some(self.to_string()))
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ErrorBody {
    fn new(error: String, details: Option<String>) -> Self {
        Self { error, details }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        }
        (status, Json(self.body())).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        AppError::Config(err.to_string())
    }
}
