//! Retrieval helpers: embed, search, assemble.

use tracing::{debug, trace};

use crate::config::RagConfig;
use crate::embed::EmbeddingsProvider;
use crate::errors::RagError;
use crate::qdrant_facade::QdrantFacade;
use crate::record::{LegalContext, RagHit};

/// Separator placed between snippet texts in the assembled context.
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Embeds `query`, searches the collection and assembles the context.
///
/// # Errors
/// Returns embedding/provider errors or Qdrant failures.
pub async fn legal_context(
    cfg: &RagConfig,
    client: &QdrantFacade,
    query: &str,
    provider: &dyn EmbeddingsProvider,
) -> Result<LegalContext, RagError> {
    trace!(top_k = cfg.top_k, query_len = query.len(), "retrieve::legal_context");

    let qv = provider.embed(query).await?;
    let hits = client
        .search(qv, cfg.top_k, /* with_payload = */ true, cfg.exact_search)
        .await?
        .into_iter()
        .map(|(score, payload)| RagHit::from_payload(score, &payload))
        .collect::<Vec<_>>();

    let out = assemble(&hits);
    debug!(
        matches = out.matches_found,
        top_score = ?hits.first().map(|h| h.score),
        sources = out.sources.len(),
        "retrieve::legal_context assembled"
    );
    Ok(out)
}

/// Joins hit texts with [`CONTEXT_SEPARATOR`] and collects their urls.
///
/// Hits without `text` contribute nothing to the context; hits without `url`
/// contribute no source. `matches_found` counts every hit.
pub fn assemble(hits: &[RagHit]) -> LegalContext {
    let parts: Vec<&str> = hits.iter().filter_map(|h| h.text.as_deref()).collect();
    let sources = hits.iter().filter_map(|h| h.url.clone()).collect();

    LegalContext {
        context: parts.join(CONTEXT_SEPARATOR),
        sources,
        matches_found: hits.len(),
    }
}
