//! POST /rag: legal context for a query.

use std::sync::Arc;

use axum::{Extension, Json, extract::State, extract::rejection::JsonRejection};
use rag_store::LegalContext;
use tracing::{debug, error};

use crate::{
    core::app_state::RagState, error_handler::AppResult,
    middleware_layer::request_id::RequestId, routes::rag::rag_search_request::RagSearchRequest,
};

pub async fn rag_search(
    State(state): State<Arc<RagState>>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RagSearchRequest>, JsonRejection>,
) -> AppResult<Json<LegalContext>> {
    let Json(p) = payload?;

    debug!(
        request_id = %request_id,
        query_len = p.query.len(),
        "rag_search: start"
    );

    let ctx = state
        .store
        .legal_context(&p.query, state.embedder.as_ref())
        .await
        .inspect_err(|err| {
            error!(request_id = %request_id, error = %err, "rag_search: retrieval failed");
        })?;

    debug!(
        request_id = %request_id,
        matches = ctx.matches_found,
        sources = ctx.sources.len(),
        "rag_search: success"
    );

    Ok(Json(ctx))
}
