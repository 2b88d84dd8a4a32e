//! Default LLM configs loaded strictly from environment variables.
//!
//! Two roles are needed by the workspace:
//!
//! - **Completion** → OpenRouter chat model answering legal questions
//! - **Embedding**  → Ollama embedding model used by the retrieval store
//!
//! # Environment variables
//!
//! OpenRouter:
//! - `OPENROUTER_API_KEY` = bearer credential (mandatory, no default)
//! - `OPENROUTER_URL`     = API base (default `https://openrouter.ai/api/v1`)
//! - `OPENROUTER_REFERER` = `HTTP-Referer` header (default `http://localhost:3000`)
//! - `OPENROUTER_TITLE`   = `X-Title` header (default `Legal Assistant`)
//! - `LLM_TIMEOUT_SECS`   = request timeout (default 60)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `EMBEDDING_MODEL`             = embedding model (default `nomic-embed-text`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_u64, must_env, validate_http_endpoint,
        validate_nonzero_u64, validate_range_f32,
    },
};

/// Completion model served through OpenRouter.
pub const COMPLETION_MODEL: &str = "deepcogito/cogito-v2-preview-llama-405b";

/// Output budget for a single answer.
pub const COMPLETION_MAX_TOKENS: u32 = 1000;

/// Sampling temperature for completions.
pub const COMPLETION_TEMPERATURE: f32 = 0.3;

pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_REFERER: &str = "http://localhost:3000";
pub const DEFAULT_TITLE: &str = "Legal Assistant";
pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Constructs the OpenRouter completion config.
///
/// # Errors
///
/// - [`ConfigError::MissingVar`] if `OPENROUTER_API_KEY` is unset or blank
/// - [`ConfigError::InvalidFormat`] if `OPENROUTER_URL` has no http/https scheme
/// - [`ConfigError::InvalidNumber`] if `LLM_TIMEOUT_SECS` is not a number
pub fn config_openrouter_completion() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("OPENROUTER_API_KEY")?;
    let endpoint = env_opt("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_OPENROUTER_URL.into());
    validate_http_endpoint("OPENROUTER_URL", &endpoint)?;
    validate_range_f32("temperature", COMPLETION_TEMPERATURE, 0.0, 2.0)?;

    let timeout_secs = env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_COMPLETION_TIMEOUT_SECS);
    validate_nonzero_u64("LLM_TIMEOUT_SECS", timeout_secs)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::OpenRouter,
        model: COMPLETION_MODEL.into(),
        endpoint,
        api_key: Some(api_key),
        max_tokens: Some(COMPLETION_MAX_TOKENS),
        temperature: Some(COMPLETION_TEMPERATURE),
        timeout_secs: Some(timeout_secs),
        referer: Some(env_opt("OPENROUTER_REFERER").unwrap_or_else(|| DEFAULT_REFERER.into())),
        title: Some(env_opt("OPENROUTER_TITLE").unwrap_or_else(|| DEFAULT_TITLE.into())),
    })
}

/// Resolves the Ollama endpoint strictly from environment.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env_opt("OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = env_opt("OLLAMA_PORT") {
        port.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{}", port.trim()));
    }
    Err(AiLlmError::Config(ConfigError::MissingVar(
        "OLLAMA_URL or OLLAMA_PORT",
    )))
}

/// Constructs a config for the Ollama **embedding** model.
///
/// # Defaults
/// - `model = nomic-embed-text`
/// - `timeout_secs = Some(30)`
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = ollama_endpoint()?;
    let model = env_opt("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.into());

    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model,
        endpoint,
        api_key: None,
        max_tokens: None,
        temperature: None,
        timeout_secs: Some(DEFAULT_EMBEDDING_TIMEOUT_SECS),
        referer: None,
        title: None,
    })
}
