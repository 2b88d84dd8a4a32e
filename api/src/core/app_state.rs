use std::sync::Arc;

use ai_llm_service::{
    OllamaService, OpenRouterService,
    config::default_config::{config_ollama_embedding, config_openrouter_completion},
};
use chat_relay::{ChatRelay, HttpContextProvider, RelayConfig};
use rag_store::{EmbeddingsProvider, OllamaEmbedder, RagConfig, RagStore};
use tracing::info;

use crate::error_handler::AppError;

/// Shared state of the relay server.
#[derive(Clone)]
pub struct AppState {
    pub relay: ChatRelay,
}

impl AppState {
    pub fn new(relay: ChatRelay) -> Self {
        Self { relay }
    }

    /// Wires the OpenRouter client and the HTTP retrieval client from env.
    ///
    /// # Errors
    /// [`AppError::Config`] when `OPENROUTER_API_KEY` is missing or any
    /// variable is malformed.
    pub fn from_env() -> Result<Self, AppError> {
        let llm_cfg = config_openrouter_completion()?;
        let completion = OpenRouterService::new(llm_cfg)?;

        let relay_cfg = RelayConfig::from_env()?;
        let context = HttpContextProvider::from_config(&relay_cfg)
            .map_err(|e| AppError::Config(format!("retrieval client: {e}")))?;

        info!(
            model = completion.model(),
            rag_url = context.url(),
            rag_timeout_secs = relay_cfg.rag_timeout.as_secs(),
            "relay state ready"
        );

        Ok(Self::new(ChatRelay::new(
            Arc::new(context),
            Arc::new(completion),
        )))
    }
}

/// Shared state of the retrieval server.
#[derive(Clone)]
pub struct RagState {
    pub store: Arc<RagStore>,
    pub embedder: Arc<dyn EmbeddingsProvider>,
}

impl RagState {
    pub fn new(store: Arc<RagStore>, embedder: Arc<dyn EmbeddingsProvider>) -> Self {
        Self { store, embedder }
    }

    /// Builds the store and the Ollama embedder from env, then makes sure the
    /// collection exists.
    pub async fn from_env() -> Result<Self, AppError> {
        let cfg = RagConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;
        let svc = OllamaService::new(config_ollama_embedding()?)?;
        let embedder = OllamaEmbedder::new(Arc::new(svc), cfg.dim);

        let store = RagStore::new(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        store
            .ensure_collection()
            .await
            .map_err(|e| AppError::Config(e.to_string()))?;

        info!(
            collection = %store.config().collection,
            top_k = store.config().top_k,
            dim = embedder.dim(),
            "retrieval state ready"
        );

        Ok(Self::new(Arc::new(store), Arc::new(embedder)))
    }
}
