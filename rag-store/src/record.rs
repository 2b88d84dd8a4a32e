//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single retrieval hit: score plus the payload fields the context uses.
#[derive(Clone, Debug, PartialEq)]
pub struct RagHit {
    pub score: f32,
    /// `text` payload field, the snippet body.
    pub text: Option<String>,
    /// `url` payload field, where the snippet came from.
    pub url: Option<String>,
}

impl RagHit {
    /// Builds a hit from a `(score, payload)` pair; non-string fields are ignored.
    pub fn from_payload(score: f32, payload: &Value) -> Self {
        let field = |k: &str| payload.get(k).and_then(Value::as_str).map(str::to_string);
        Self {
            score,
            text: field("text"),
            url: field("url"),
        }
    }
}

/// Response body of the retrieval endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalContext {
    pub context: String,
    pub sources: Vec<String>,
    pub matches_found: usize,
}
