//! HTTP surface of the legal assistant.
//!
//! - [`router`]: relay server (`POST /api/chat`, `GET /`, `GET /health`)
//! - [`rag_router`]: retrieval server (`POST /rag`, `GET /`, `GET /health`)
//!
//! Both routers tag every response with `X-Request-Id`.

use std::sync::Arc;

use ai_llm_service::error_handler::env_opt;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

mod core {
    pub mod app_state;
}

mod error_handler;

mod middleware_layer {
    pub mod request_id;
}

mod routes {
    pub mod chat {
        pub mod chat_response;
        pub mod chat_route;
    }
    pub mod health {
        pub mod health_route;
    }
    pub mod rag {
        pub mod rag_search_request;
        pub mod rag_search_route;
    }
}

pub use crate::core::app_state::{AppState, RagState};
pub use error_handler::{AppError, AppResult};
pub use middleware_layer::request_id::{REQUEST_ID_HEADER, RequestId};

use crate::middleware_layer::request_id::request_id;
use crate::routes::{
    chat::chat_route::chat,
    health::health_route::{health, rag_root, relay_root},
    rag::rag_search_route::rag_search,
};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_RAG_ADDRESS: &str = "0.0.0.0:8000";

/// Router of the relay server.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(relay_root))
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .with_state(Arc::new(state))
        .layer(middleware::from_fn(request_id))
}

/// Router of the retrieval server.
pub fn rag_router(state: RagState) -> Router {
    Router::new()
        .route("/", get(rag_root))
        .route("/health", get(health))
        .route("/rag", post(rag_search))
        .with_state(Arc::new(state))
        .layer(middleware::from_fn(request_id))
}

/// Runs the relay server on `API_ADDRESS` until Ctrl+C.
pub async fn start() -> Result<(), AppError> {
    let addr = env_opt("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string());
    let state = AppState::from_env()?;
    serve(&addr, router(state)).await
}

/// Runs the retrieval server on `RAG_ADDRESS` until Ctrl+C.
pub async fn start_rag() -> Result<(), AppError> {
    let addr = env_opt("RAG_ADDRESS").unwrap_or_else(|| DEFAULT_RAG_ADDRESS.to_string());
    let state = RagState::from_env().await?;
    serve(&addr, rag_router(state)).await
}

async fn serve(addr: &str, app: Router) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr).await.map_err(AppError::Bind)?;
    info!(%addr, "listening");

    // Graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
