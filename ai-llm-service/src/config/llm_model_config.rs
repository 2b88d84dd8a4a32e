use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: which backend serves the model.
/// - `model`: model identifier (e.g. `"deepcogito/cogito-v2-preview-llama-405b"`).
/// - `endpoint`: API base URL; service paths are appended to it.
/// - `api_key`: bearer credential, required for OpenRouter.
/// - `max_tokens`: generation budget (completions only).
/// - `temperature`: sampling temperature (completions only).
/// - `timeout_secs`: per-request timeout.
/// - `referer` / `title`: caller identification headers sent to OpenRouter
///   (`HTTP-Referer`, `X-Title`).
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::OpenRouter,
///     model: "deepcogito/cogito-v2-preview-llama-405b".to_string(),
///     endpoint: "https://openrouter.ai/api/v1".to_string(),
///     api_key: Some("sk-or-...".to_string()),
///     max_tokens: Some(1000),
///     temperature: Some(0.3),
///     timeout_secs: Some(60),
///     referer: Some("http://localhost:3000".to_string()),
///     title: Some("Legal Assistant".to_string()),
/// };
/// assert_eq!(cfg.max_tokens, Some(1000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,

    pub model: String,

    pub endpoint: String,

    pub api_key: Option<String>,

    pub max_tokens: Option<u32>,

    pub temperature: Option<f32>,

    pub timeout_secs: Option<u64>,

    /// Value for the `HTTP-Referer` header.
    pub referer: Option<String>,

    /// Value for the `X-Title` header.
    pub title: Option<String>,
}
