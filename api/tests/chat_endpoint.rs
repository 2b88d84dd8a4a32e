use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use api::{AppState, REQUEST_ID_HEADER, router};
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use chat_relay::{
    ChatRelay, CompletionPrompt, CompletionProvider, ContextProvider, ContextUnavailable,
    FALLBACK_CONTEXT, RelayError, RetrievalResult, UpstreamError,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Default)]
struct Calls {
    context: AtomicUsize,
    completion: AtomicUsize,
    prompts: Mutex<Vec<CompletionPrompt>>,
}

struct StubContext {
    calls: Arc<Calls>,
    result: Option<RetrievalResult>,
}

impl ContextProvider for StubContext {
    fn fetch<'a>(
        &'a self,
        _query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<RetrievalResult, ContextUnavailable>> + Send + 'a>> {
        self.calls.context.fetch_add(1, Ordering::SeqCst);
        let out = self
            .result
            .clone()
            .ok_or(ContextUnavailable::Timeout(Duration::from_secs(10)));
        Box::pin(async move { out })
    }
}

enum Answer {
    Text(&'static str),
    Status(StatusCode, &'static str),
}

struct StubCompletion {
    calls: Arc<Calls>,
    answer: Answer,
}

impl CompletionProvider for StubCompletion {
    fn send<'a>(
        &'a self,
        prompt: &'a CompletionPrompt,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, RelayError>> + Send + 'a>> {
        self.calls.completion.fetch_add(1, Ordering::SeqCst);
        self.calls.prompts.lock().unwrap().push(prompt.clone());
        let out = match &self.answer {
            Answer::Text(t) => Ok(Some(t.to_string())),
            Answer::Status(status, body) => Err(UpstreamError::Status {
                status: *status,
                body: body.to_string(),
            }
            .into()),
        };
        Box::pin(async move { out })
    }
}

fn app(context: Option<RetrievalResult>, answer: Answer) -> (axum::Router, Arc<Calls>) {
    let calls = Arc::new(Calls::default());
    let relay = ChatRelay::new(
        Arc::new(StubContext {
            calls: calls.clone(),
            result: context,
        }),
        Arc::new(StubCompletion {
            calls: calls.clone(),
            answer,
        }),
    );
    (router(AppState::new(relay)), calls)
}

fn hsa() -> Option<RetrievalResult> {
    Some(RetrievalResult {
        context: "Hindu Succession Act excerpt...".into(),
        sources: vec!["Hindu Succession Act, 1956".into()],
    })
}

fn post_chat(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn answers_with_context_sources_and_timestamp() {
    let (app, calls) = app(hsa(), Answer::Text("Heirs are..."));

    let res = app
        .oneshot(post_chat(r#"{"message":"What is inheritance law?"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    assert_eq!(body["message"], "Heirs are...");
    assert_eq!(body["sources"], json!(["Hindu Succession Act, 1956"]));

    let ts = body["timestamp"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    // millisecond precision: "...:SS.mmmZ"
    assert_eq!(ts.rsplit('.').next().map(str::len), Some(4));

    assert_eq!(calls.context.load(Ordering::SeqCst), 1);
    assert_eq!(calls.completion.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retrieval_down_still_answers_without_sources() {
    let (app, calls) = app(None, Answer::Text("General guidance"));

    let res = app
        .oneshot(post_chat(r#"{"message":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    assert_eq!(body["message"], "General guidance");
    assert_eq!(body["sources"], json!([]));

    let prompts = calls.prompts.lock().unwrap();
    assert!(prompts[0].system().content.ends_with(FALLBACK_CONTEXT));
}

#[tokio::test]
async fn empty_message_is_rejected_without_outbound_calls() {
    let (app, calls) = app(hsa(), Answer::Text("unused"));

    let res = app.oneshot(post_chat(r#"{"message":""}"#)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({ "error": "Message is required" }));

    assert_eq!(calls.context.load(Ordering::SeqCst), 0);
    assert_eq!(calls.completion.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_or_non_string_message_is_rejected() {
    for body in [r#"{}"#, r#"{"message":42}"#, r#"{"message":null}"#] {
        let (app, calls) = app(hsa(), Answer::Text("unused"));
        let res = app.oneshot(post_chat(body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(calls.context.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn upstream_rate_limit_is_relayed() {
    let (app, _) = app(
        hsa(),
        Answer::Status(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
    );

    let res = app
        .oneshot(post_chat(r#"{"message":"What is inheritance law?"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        json_body(res).await,
        json!({
            "error": "OpenRouter API error: 429 Too Many Requests",
            "details": "Rate limit exceeded"
        })
    );
}

#[tokio::test]
async fn non_json_body_is_a_processing_failure() {
    let (app, calls) = app(hsa(), Answer::Text("unused"));

    let res = app.oneshot(post_chat("not json")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(res).await;
    assert_eq!(body["error"], "Failed to process message");
    assert!(body["details"].is_string());
    assert_eq!(calls.context.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let (app, _) = app(hsa(), Answer::Text("ok"));

    let mut req = post_chat(r#"{"message":"q"}"#);
    req.headers_mut()
        .insert(REQUEST_ID_HEADER, "client-123".parse().unwrap());
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()[REQUEST_ID_HEADER], "client-123");

    let res = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = res.headers()[REQUEST_ID_HEADER].to_str().unwrap().to_string();
    assert!(id.starts_with("req-"));
    assert_eq!(json_body(res).await, json!({ "status": "healthy" }));
}

#[tokio::test]
async fn root_reports_running() {
    let (app, _) = app(hsa(), Answer::Text("ok"));
    let res = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        json!({ "message": "Legal assistant relay is running" })
    );
}
