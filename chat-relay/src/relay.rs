//! The relay itself: context stage, prompt assembly, completion stage.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::{
    api_types::{ChatReply, ChatRequest, RetrievalResult},
    error::RelayError,
    llm::CompletionProvider,
    prompt::{NO_RESPONSE_PLACEHOLDER, build_prompt},
    retrieve::ContextProvider,
};

/// Stateless orchestrator; clone freely and share across requests.
#[derive(Clone)]
pub struct ChatRelay {
    context: Arc<dyn ContextProvider>,
    completion: Arc<dyn CompletionProvider>,
}

impl ChatRelay {
    pub fn new(context: Arc<dyn ContextProvider>, completion: Arc<dyn CompletionProvider>) -> Self {
        Self {
            context,
            completion,
        }
    }

    /// Answers one question.
    ///
    /// Retrieval failures are absorbed (fallback context, no sources).
    /// Completion failures are returned as [`RelayError`].
    #[instrument(skip_all, fields(message_len = request.message().len()))]
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let retrieval = match self.context.fetch(request.message()).await {
            Ok(r) => {
                info!(
                    sources = r.sources.len(),
                    context_len = r.context.len(),
                    "RAG context received"
                );
                r
            }
            Err(err) => {
                warn!(error = %err, "RAG backend error; continuing without context");
                RetrievalResult::fallback()
            }
        };

        let prompt = build_prompt(&retrieval.context, request.message());

        info!("calling completion provider");
        let message = match self.completion.send(&prompt).await? {
            Some(text) => text,
            None => {
                warn!("completion returned no content; using placeholder");
                NO_RESPONSE_PLACEHOLDER.to_string()
            }
        };

        Ok(ChatReply {
            message,
            sources: retrieval.sources,
            timestamp: Utc::now(),
        })
    }
}
