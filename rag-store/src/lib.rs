//! Retrieval of legal context over Qdrant.
//!
//! A query is embedded, the nearest snippets are fetched from one collection,
//! and their `text` payloads are joined into a single context string with the
//! `url` payloads returned as sources.

mod config;
mod embed;
mod errors;
mod qdrant_facade;
mod record;
mod retrieve;

pub use config::RagConfig;
pub use embed::{EmbeddingsProvider, ollama::OllamaEmbedder};
pub use errors::RagError;
pub use record::{LegalContext, RagHit};
pub use retrieve::{CONTEXT_SEPARATOR, assemble};

use tracing::{debug, trace};

/// High-level facade that wires configuration and Qdrant client.
pub struct RagStore {
    cfg: RagConfig,
    client: qdrant_facade::QdrantFacade,
}

impl RagStore {
    /// Constructs a new store from the given configuration.
    ///
    /// # Errors
    /// Returns `RagError::Config` on invalid config, `RagError::Qdrant` if the
    /// client cannot be built.
    pub fn new(cfg: RagConfig) -> Result<Self, RagError> {
        trace!(collection = %cfg.collection, "RagStore::new");
        let client = qdrant_facade::QdrantFacade::new(&cfg)?;
        Ok(Self { cfg, client })
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Creates the collection with the configured dimension if it is missing.
    pub async fn ensure_collection(&self) -> Result<(), RagError> {
        self.client.ensure_collection(self.cfg.dim).await
    }

    /// Top-k context for a textual query.
    ///
    /// # Errors
    /// Returns embedding errors or Qdrant failures.
    pub async fn legal_context(
        &self,
        query: &str,
        provider: &dyn EmbeddingsProvider,
    ) -> Result<LegalContext, RagError> {
        debug!(collection = %self.client.collection(), top_k = self.cfg.top_k, "RagStore::legal_context");
        retrieve::legal_context(&self.cfg, &self.client, query, provider).await
    }
}
