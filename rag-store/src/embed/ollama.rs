//! Ollama embedding provider.

use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::OllamaService;
use tracing::warn;

use crate::{EmbeddingsProvider, RagError};

/// Embeds queries through [`OllamaService`] and enforces the collection dimension.
#[derive(Clone)]
pub struct OllamaEmbedder {
    svc: Arc<OllamaService>,
    dim: usize,
}

impl OllamaEmbedder {
    pub fn new(svc: Arc<OllamaService>, dim: usize) -> Self {
        Self { svc, dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl EmbeddingsProvider for OllamaEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, RagError>> + Send + 'a>> {
        Box::pin(async move {
            let v = self.svc.embeddings(text).await?;

            if v.len() != self.dim {
                warn!(got = v.len(), want = self.dim, "embedding dimension mismatch");
                return Err(RagError::VectorSizeMismatch {
                    got: v.len(),
                    want: self.dim,
                });
            }

            Ok(v)
        })
    }
}

#[cfg(test)]
mod tests {
    use ai_llm_service::{LlmModelConfig, LlmProvider};
    use axum::{Json, Router, routing::post};
    use serde_json::json;

    use super::*;

    async fn stub_ollama(dim: usize) -> String {
        let app = Router::new().route(
            "/api/embeddings",
            post(move || async move { Json(json!({ "embedding": vec![0.25_f32; dim] })) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn embedder(endpoint: String, dim: usize) -> OllamaEmbedder {
        let svc = OllamaService::new(LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "nomic-embed-text".into(),
            endpoint,
            api_key: None,
            max_tokens: None,
            temperature: None,
            timeout_secs: Some(5),
            referer: None,
            title: None,
        })
        .unwrap();
        OllamaEmbedder::new(Arc::new(svc), dim)
    }

    #[tokio::test]
    async fn returns_vector_of_expected_dimension() {
        let e = embedder(stub_ollama(8).await, 8);
        let v = e.embed("inheritance").await.unwrap();
        assert_eq!(v.len(), 8);
    }

    #[tokio::test]
    async fn dimension_mismatch_is_an_error() {
        let e = embedder(stub_ollama(4).await, 768);
        let err = e.embed("inheritance").await.unwrap_err();
        assert!(matches!(
            err,
            RagError::VectorSizeMismatch { got: 4, want: 768 }
        ));
    }
}
