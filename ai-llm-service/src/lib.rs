//! LLM provider clients shared by the relay and the retrieval server.
//!
//! - [`services::open_router_service::OpenRouterService`]: non-streaming chat
//!   completions against OpenRouter.
//! - [`services::ollama_service::OllamaService`]: embeddings against a local
//!   Ollama runtime.
//!
//! Configs are resolved strictly from environment variables through
//! [`config::default_config`]; every failure is reported as [`AiLlmError`].

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
    pub mod llm_provider;
}

pub mod services {
    pub mod ollama_service;
    pub mod open_router_service;
}

pub mod error_handler;
pub mod telemetry;

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError, HttpError, Provider, ProviderError, ProviderErrorKind};
pub use services::ollama_service::OllamaService;
pub use services::open_router_service::OpenRouterService;
