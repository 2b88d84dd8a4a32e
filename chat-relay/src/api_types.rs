//! Request-scoped values passed between the relay stages.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::{error::RelayError, prompt::FALLBACK_CONTEXT};

/// A validated user question.
///
/// The only way to build one is through [`ChatRequest::new`] or
/// [`ChatRequest::from_json`], so `message` is always a non-empty string.
///
/// # Example
/// ```
/// use chat_relay::ChatRequest;
/// let req = ChatRequest::new("What is inheritance law?").unwrap();
/// assert_eq!(req.message(), "What is inheritance law?");
/// assert!(ChatRequest::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Result<Self, RelayError> {
        let message = message.into();
        if message.is_empty() {
            return Err(RelayError::InvalidInput);
        }
        Ok(Self { message })
    }

    /// Extracts `message` from a decoded JSON body.
    ///
    /// # Errors
    /// [`RelayError::InvalidInput`] when the field is missing, not a string, or empty.
    pub fn from_json(body: &Value) -> Result<Self, RelayError> {
        match body.get("message") {
            Some(Value::String(s)) => Self::new(s.as_str()),
            _ => Err(RelayError::InvalidInput),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Context returned by the retrieval collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetrievalResult {
    pub context: String,
    pub sources: Vec<String>,
}

impl RetrievalResult {
    /// Substitute used when retrieval fails: fixed context, no sources.
    pub fn fallback() -> Self {
        Self {
            context: FALLBACK_CONTEXT.to_string(),
            sources: Vec::new(),
        }
    }

    /// Lenient extraction: a missing or mistyped `context` becomes `""`, a
    /// missing `sources` becomes `[]`, and non-string sources are skipped.
    pub fn from_payload(payload: &Value) -> Self {
        let context = payload
            .get("context")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let sources = payload
            .get("sources")
            .and_then(Value::as_array)
            .map(|arr| {
                arr.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { context, sources }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

/// Exactly one system message followed by exactly one user message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompletionPrompt {
    messages: [PromptMessage; 2],
}

impl CompletionPrompt {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: [
                PromptMessage {
                    role: Role::System,
                    content: system.into(),
                },
                PromptMessage {
                    role: Role::User,
                    content: user.into(),
                },
            ],
        }
    }

    pub fn system(&self) -> &PromptMessage {
        &self.messages[0]
    }

    pub fn user(&self) -> &PromptMessage {
        &self.messages[1]
    }

    pub fn messages(&self) -> &[PromptMessage] {
        &self.messages
    }
}

/// Successful relay outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatReply {
    pub message: String,
    pub sources: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ChatReply {
    /// ISO-8601 UTC with milliseconds, e.g. `2025-01-31T09:15:02.120Z`.
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
