//! Typed errors for the chat relay.

use std::time::Duration;

use ai_llm_service::{AiLlmError, ProviderError, ProviderErrorKind};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that end a relay request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// `message` missing, not a string, or empty. No outbound call was made.
    #[error("Message is required")]
    InvalidInput,

    /// The completion provider failed; the request cannot be answered.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Anything else (undecodable provider payload, client setup, ...).
    #[error("{0}")]
    Internal(String),
}

/// Completion-stage failure as seen by the caller.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Provider answered with a non-2xx status; `body` is the raw error text.
    #[error("OpenRouter API error: {status}")]
    Status { status: StatusCode, body: String },

    #[error("OpenRouter API error: request timed out after {0:?}")]
    Timeout(Duration),

    #[error("OpenRouter API error: {0}")]
    Transport(String),
}

/// Context-stage failure. Never crosses the relay boundary: it is logged and
/// replaced by the fallback context.
#[derive(Debug, Error)]
pub enum ContextUnavailable {
    #[error("RAG backend request timed out after {0:?}")]
    Timeout(Duration),

    #[error("RAG backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("RAG backend responded with status: {0}")]
    Status(StatusCode),

    #[error("RAG backend returned an unreadable payload: {0}")]
    Decode(String),
}

impl From<AiLlmError> for RelayError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(http),
                ..
            }) => UpstreamError::Status {
                status: http.status,
                body: http.body,
            }
            .into(),
            AiLlmError::Timeout(after) => UpstreamError::Timeout(after).into(),
            AiLlmError::HttpTransport(e) => UpstreamError::Transport(e.to_string()).into(),
            other => RelayError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{HttpError, Provider};

    use super::*;

    #[test]
    fn status_error_message_includes_code_and_reason() {
        let err = UpstreamError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "slow down".into(),
        };
        assert_eq!(err.to_string(), "OpenRouter API error: 429 Too Many Requests");
    }

    #[test]
    fn provider_http_status_maps_to_upstream() {
        let err: RelayError = AiLlmError::from(ProviderError::new(
            Provider::OpenRouter,
            ProviderErrorKind::HttpStatus(HttpError {
                status: StatusCode::UNAUTHORIZED,
                url: "https://openrouter.ai/api/v1/chat/completions".into(),
                body: "{\"error\":\"No auth credentials found\"}".into(),
            }),
        ))
        .into();

        match err {
            RelayError::Upstream(UpstreamError::Status { status, body }) => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(body, "{\"error\":\"No auth credentials found\"}");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn decode_and_timeout_mapping() {
        let decode: RelayError = AiLlmError::from(ProviderError::new(
            Provider::OpenRouter,
            ProviderErrorKind::Decode("bad json".into()),
        ))
        .into();
        assert!(matches!(decode, RelayError::Internal(_)));

        let timeout: RelayError = AiLlmError::Timeout(Duration::from_secs(60)).into();
        assert!(matches!(
            timeout,
            RelayError::Upstream(UpstreamError::Timeout(d)) if d == Duration::from_secs(60)
        ));
    }
}
