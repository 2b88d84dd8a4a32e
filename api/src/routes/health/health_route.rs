use axum::Json;
use serde_json::{Value, json};

/// GET / on the relay server.
pub async fn relay_root() -> Json<Value> {
    Json(json!({ "message": "Legal assistant relay is running" }))
}

/// GET / on the retrieval server.
pub async fn rag_root() -> Json<Value> {
    Json(json!({ "message": "RAG API is running" }))
}

/// GET /health on both servers.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
