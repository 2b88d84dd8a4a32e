/// Backend used for a given [`LlmModelConfig`](crate::LlmModelConfig).
///
/// - `OpenRouter` serves chat completions (OpenAI-compatible API, bearer auth).
/// - `Ollama` serves embeddings for the retrieval store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Hosted OpenRouter API.
    OpenRouter,
    /// Local Ollama runtime.
    Ollama,
}
