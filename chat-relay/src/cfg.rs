//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use ai_llm_service::{
    AiLlmError,
    error_handler::{env_opt, env_opt_u64, validate_http_endpoint, validate_nonzero_u64},
};

pub const DEFAULT_RAG_URL: &str = "http://localhost:8000/rag";
const DEFAULT_RAG_TIMEOUT_SECS: u64 = 10;

/// Where the retrieval collaborator lives and how long to wait for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelayConfig {
    /// `RAG_URL`, full URL of the retrieval endpoint.
    pub rag_url: String,
    /// `RAG_TIMEOUT_SECS`, deadline for the context stage.
    pub rag_timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            rag_url: DEFAULT_RAG_URL.to_string(),
            rag_timeout: Duration::from_secs(DEFAULT_RAG_TIMEOUT_SECS),
        }
    }
}

impl RelayConfig {
    /// Build from environment variables with defaults.
    ///
    /// # Errors
    /// Config errors for a non-http `RAG_URL` or a non-numeric or zero `RAG_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let rag_url = env_opt("RAG_URL").unwrap_or_else(|| DEFAULT_RAG_URL.to_string());
        validate_http_endpoint("RAG_URL", &rag_url)?;
        let secs = env_opt_u64("RAG_TIMEOUT_SECS")?.unwrap_or(DEFAULT_RAG_TIMEOUT_SECS);
        validate_nonzero_u64("RAG_TIMEOUT_SECS", secs)?;

        Ok(Self {
            rag_url,
            rag_timeout: Duration::from_secs(secs),
        })
    }
}
