use serde::Deserialize;

/// Request payload for `POST /rag`.
#[derive(Debug, Deserialize)]
pub struct RagSearchRequest {
    pub query: String,
}
