use chat_relay::ChatReply;
use serde::Serialize;

/// Success body of `POST /api/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub sources: Vec<String>,
    /// ISO-8601 UTC, millisecond precision, `Z` suffix.
    pub timestamp: String,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        let timestamp = reply.timestamp_iso();
        Self {
            message: reply.message,
            sources: reply.sources,
            timestamp,
        }
    }
}
