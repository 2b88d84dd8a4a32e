//! Context stage: ask the retrieval collaborator for legal context.

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{api_types::RetrievalResult, cfg::RelayConfig, error::ContextUnavailable};

/// Provider interface for the context stage.
///
/// Implementations report failures as [`ContextUnavailable`]; the relay decides
/// how to degrade.
pub trait ContextProvider: Send + Sync {
    fn fetch<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RetrievalResult, ContextUnavailable>> + Send + 'a>>;
}

/// `POST {rag_url}` with `{ "query": ... }`, expecting `{ context?, sources? }`.
#[derive(Clone, Debug)]
pub struct HttpContextProvider {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct RetrievalQuery<'a> {
    query: &'a str,
}

impl HttpContextProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
            timeout,
        })
    }

    pub fn from_config(cfg: &RelayConfig) -> Result<Self, reqwest::Error> {
        Self::new(cfg.rag_url.clone(), cfg.rag_timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post_query(&self, query: &str) -> Result<RetrievalResult, ContextUnavailable> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                ContextUnavailable::Timeout(self.timeout)
            } else {
                ContextUnavailable::Transport(e)
            }
        };

        debug!(url = %self.url, query_len = query.len(), "POST retrieval query");
        let resp = self
            .http
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .json(&RetrievalQuery { query })
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ContextUnavailable::Status(status));
        }

        let bytes = resp.bytes().await.map_err(classify)?;
        let payload: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ContextUnavailable::Decode(e.to_string()))?;
        if payload.is_null() {
            return Err(ContextUnavailable::Decode("payload is null".into()));
        }

        Ok(RetrievalResult::from_payload(&payload))
    }
}

impl ContextProvider for HttpContextProvider {
    fn fetch<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RetrievalResult, ContextUnavailable>> + Send + 'a>> {
        Box::pin(self.post_query(query))
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, routing::post};
    use serde_json::json;

    use super::*;

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/rag")
    }

    fn provider(url: String) -> HttpContextProvider {
        HttpContextProvider::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn returns_context_and_sources() {
        let app = Router::new().route(
            "/rag",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({ "query": "What is inheritance law?" }));
                Json(json!({
                    "context": "Hindu Succession Act excerpt...",
                    "sources": ["Hindu Succession Act, 1956"],
                    "matches_found": 1
                }))
            }),
        );
        let p = provider(spawn(app).await);

        let r = p.fetch("What is inheritance law?").await.unwrap();
        assert_eq!(r.context, "Hindu Succession Act excerpt...");
        assert_eq!(r.sources, vec!["Hindu Succession Act, 1956"]);
    }

    #[tokio::test]
    async fn missing_sources_is_empty_list() {
        let app = Router::new().route(
            "/rag",
            post(|| async { Json(json!({ "context": "ctx" })) }),
        );
        let r = provider(spawn(app).await).fetch("q").await.unwrap();
        assert_eq!(r.context, "ctx");
        assert!(r.sources.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let app = Router::new().route(
            "/rag",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "index offline") }),
        );
        let err = provider(spawn(app).await).fetch("q").await.unwrap_err();
        assert!(matches!(
            err,
            ContextUnavailable::Status(StatusCode::INTERNAL_SERVER_ERROR)
        ));
    }

    #[tokio::test]
    async fn non_json_payload_is_unavailable() {
        let app = Router::new().route("/rag", post(|| async { "not json" }));
        let err = provider(spawn(app).await).fetch("q").await.unwrap_err();
        assert!(matches!(err, ContextUnavailable::Decode(_)));
    }

    #[tokio::test]
    async fn null_payload_is_unavailable() {
        let app = Router::new().route("/rag", post(|| async { Json(Value::Null) }));
        let err = provider(spawn(app).await).fetch("q").await.unwrap_err();
        assert!(matches!(err, ContextUnavailable::Decode(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = provider(format!("http://{addr}/rag"))
            .fetch("hello")
            .await
            .unwrap_err();
        assert!(matches!(err, ContextUnavailable::Transport(_)));
    }

    #[tokio::test]
    async fn slow_backend_times_out() {
        let app = Router::new().route(
            "/rag",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "context": "late" }))
            }),
        );
        let p = HttpContextProvider::new(spawn(app).await, Duration::from_millis(200)).unwrap();
        let err = p.fetch("q").await.unwrap_err();
        assert!(matches!(err, ContextUnavailable::Timeout(_)));
    }
}
