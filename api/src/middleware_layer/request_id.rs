use std::sync::atomic::{AtomicU64, Ordering};

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

static SEQ: AtomicU64 = AtomicU64::new(0);

/// Request id visible to handlers through `Extension<RequestId>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Echoes a non-empty incoming `X-Request-Id` or assigns a fresh one, then
/// runs the request inside a span carrying it and sets it on the response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let incoming = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| v.to_str().is_ok_and(|s| !s.trim().is_empty()))
        .cloned();

    let (id, header) = match incoming {
        Some(h) => (h.to_str().unwrap_or_default().to_string(), Some(h)),
        None => {
            let id = generate();
            let header = HeaderValue::from_str(&id).ok();
            (id, header)
        }
    };

    req.extensions_mut().insert(RequestId(id.clone()));
    let span = info_span!(
        "http",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let mut res = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| info!(status = res.status().as_u16(), "response"));

    if let Some(h) = header {
        res.headers_mut().insert(REQUEST_ID_HEADER, h);
    }
    res
}

fn generate() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("req-{nanos}-{seq}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = generate();
        let b = generate();
        assert!(a.starts_with("req-"));
        assert_ne!(a, b);
        assert!(HeaderValue::from_str(&a).is_ok());
    }
}
