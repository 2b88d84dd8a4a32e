//! OpenRouter service for non-streaming chat completions.
//!
//! Endpoint is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/chat/completions
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenRouter`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! A non-2xx response is returned as [`ProviderErrorKind::HttpStatus`] with the
//! upstream body kept verbatim. A 2xx response whose `choices[0].message.content`
//! is absent yields `Ok(None)`; deciding what to show instead is up to the caller.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Thin client for the OpenRouter chat-completions API.
///
/// Keeps a preconfigured `reqwest::Client` with timeout and default headers
/// (bearer auth, `HTTP-Referer`, `X-Title`).
#[derive(Debug)]
pub struct OpenRouterService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    timeout: Duration,
}

impl OpenRouterService {
    /// Creates a new [`OpenRouterService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not OpenRouter
    /// - `MissingApiKey` if `cfg.api_key` is `None`
    /// - `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::OpenRouter {
            return Err(
                ProviderError::new(Provider::OpenRouter, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(Provider::OpenRouter, ProviderErrorKind::MissingApiKey)
        })?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::OpenRouter,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header_value(&format!("Bearer {api_key}"), "API key")?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(referer) = &cfg.referer {
            headers.insert("HTTP-Referer", header_value(referer, "HTTP-Referer")?);
        }
        if let Some(title) = &cfg.title {
            headers.insert("X-Title", header_value(title, "X-Title")?);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/chat/completions", endpoint.trim_end_matches('/'));

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = timeout.as_secs(),
            "OpenRouterService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            timeout,
        })
    }

    /// Model identifier this client sends with every request.
    pub fn model(&self) -> &str {
        &self.cfg.model
    }

    /// Performs a single non-streaming chat completion with a `(system, user)` pair.
    ///
    /// Returns the first choice's content, or `None` when the provider answered
    /// 2xx without usable content.
    ///
    /// # Errors
    /// - `HttpStatus` for non-2xx responses (status + verbatim body)
    /// - [`AiLlmError::Timeout`] when the configured timeout elapses
    /// - [`AiLlmError::HttpTransport`] for other client/network failures
    /// - `Decode` if a 2xx body is not the expected JSON
    #[instrument(skip_all, fields(model = %self.cfg.model))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, system, user);

        debug!(
            user_len = user.len(),
            system_len = system.len(),
            "POST {}", self.url_chat
        );

        let resp = self
            .client
            .post(&self.url_chat)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AiLlmError::from_transport(e, self.timeout))?;

        if !status.is_success() {
            error!(
                %status,
                url = %self.url_chat,
                snippet = %make_snippet(&text),
                latency_ms = started.elapsed().as_millis(),
                "OpenRouter /chat/completions returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::OpenRouter,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url: self.url_chat.clone(),
                    body: text,
                }),
            )
            .into());
        }

        let out: Value = serde_json::from_str(&text).map_err(|e| {
            error!(
                error = %e,
                latency_ms = started.elapsed().as_millis(),
                "failed to decode /chat/completions response"
            );
            ProviderError::new(
                Provider::OpenRouter,
                ProviderErrorKind::Decode(format!(
                    "response body is not JSON: {e}"
                )),
            )
        })?;

        let content = first_content(&out);

        info!(
            latency_ms = started.elapsed().as_millis(),
            has_content = content.is_some(),
            "chat completion completed"
        );

        Ok(content)
    }
}

fn header_value(value: &str, what: &str) -> Result<header::HeaderValue, AiLlmError> {
    header::HeaderValue::from_str(value).map_err(|e| {
        ProviderError::new(
            Provider::OpenRouter,
            ProviderErrorKind::Decode(format!("invalid {what} header: {e}")),
        )
        .into()
    })
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, system: &'a str, user: &'a str) -> Self {
        Self {
            model: &cfg.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Pulls `choices[0].message.content` out of a decoded body.
///
/// Any other shape (missing levels, non-string or empty content) is `None`.
fn first_content(body: &Value) -> Option<String> {
    body.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}
