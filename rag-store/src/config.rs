//! Runtime and collection configuration.

use ai_llm_service::error_handler::{env_opt, env_opt_u64};

use crate::errors::RagError;

pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";
pub const DEFAULT_COLLECTION: &str = "kaanoon";
pub const DEFAULT_TOP_K: u64 = 5;
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Configuration for retrieval over a single Qdrant collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RagConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub qdrant_url: String,
    /// Optional API key for Qdrant Cloud.
    pub qdrant_api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Number of matches requested per query.
    pub top_k: u64,
    /// Vector dimensionality of the collection (cosine distance).
    pub dim: usize,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl RagConfig {
    /// Creates a sane default config for a given collection name and Qdrant endpoint.
    pub fn new_default(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            qdrant_url: url.into(),
            qdrant_api_key: None,
            collection: collection.into(),
            top_k: DEFAULT_TOP_K,
            dim: DEFAULT_EMBEDDING_DIM,
            exact_search: false,
        }
    }

    /// Reads `QDRANT_URL`, `QDRANT_API_KEY`, `QDRANT_COLLECTION`, `RAG_TOP_K`,
    /// `EMBEDDING_DIM` and `RAG_EXACT_SEARCH`, then validates.
    pub fn from_env() -> Result<Self, RagError> {
        let mut cfg = Self::new_default(
            env_opt("QDRANT_URL").unwrap_or_else(|| DEFAULT_QDRANT_URL.to_string()),
            env_opt("QDRANT_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
        );
        cfg.qdrant_api_key = env_opt("QDRANT_API_KEY");

        let num = |name: &'static str| env_opt_u64(name).map_err(|e| RagError::Config(e.to_string()));
        if let Some(k) = num("RAG_TOP_K")? {
            cfg.top_k = k;
        }
        if let Some(d) = num("EMBEDDING_DIM")? {
            cfg.dim = usize::try_from(d)
                .map_err(|_| RagError::Config(format!("EMBEDDING_DIM out of range: {d}")))?;
        }
        if let Some(raw) = env_opt("RAG_EXACT_SEARCH") {
            cfg.exact_search = parse_flag(&raw)
                .ok_or_else(|| RagError::Config(format!("RAG_EXACT_SEARCH is not a boolean: {raw}")))?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.qdrant_url.trim().is_empty() {
            return Err(RagError::Config("qdrant_url is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(RagError::Config("collection is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.dim == 0 {
            return Err(RagError::Config("dim must be > 0".into()));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
