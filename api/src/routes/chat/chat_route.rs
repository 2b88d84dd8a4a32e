//! POST /api/chat: relays a question through retrieval and completion.

use std::sync::Arc;

use axum::{Extension, Json, body::Bytes, extract::State};
use chat_relay::{ChatRequest, RelayError};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    core::app_state::AppState, error_handler::AppResult,
    middleware_layer::request_id::RequestId, routes::chat::chat_response::ChatResponse,
};

/// Handler: POST /api/chat
///
/// The body is read raw so that a non-JSON payload maps to the generic
/// processing failure (500) while a JSON body without a usable `message`
/// maps to 400.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:3000/api/chat \
///   -H 'content-type: application/json' \
///   -d '{"message":"What is inheritance law?"}'
/// ```
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<ChatResponse>> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(request_id = %request_id, error = %e, "chat: body is not JSON");
        RelayError::Internal(e.to_string())
    })?;

    let request = ChatRequest::from_json(&value).inspect_err(|_| {
        debug!(request_id = %request_id, "chat: missing or empty message");
    })?;

    info!(
        request_id = %request_id,
        message_len = request.message().len(),
        "chat: start"
    );

    let reply = state.relay.handle(&request).await?;

    info!(
        request_id = %request_id,
        sources = reply.sources.len(),
        answer_len = reply.message.len(),
        "chat: success"
    );

    Ok(Json(ChatResponse::from(reply)))
}
