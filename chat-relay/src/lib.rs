//! Chat relay: retrieval-augmented legal Q&A over a hosted completion model.
//!
//! Public entry point: [`ChatRelay::handle`]. For each request it
//! 1. fetches legal context for the raw message (best effort; failures degrade
//!    to a fixed fallback context),
//! 2. builds a `system` + `user` prompt,
//! 3. sends it to the completion provider (failures are fatal for the request),
//! 4. returns the answer with the retrieval sources and a timestamp.
//!
//! Both collaborators sit behind traits ([`ContextProvider`],
//! [`CompletionProvider`]) so they can be swapped for fakes in tests.

mod api_types;
mod cfg;
mod error;
mod llm;
mod prompt;
mod relay;
mod retrieve;

pub use api_types::{ChatReply, ChatRequest, CompletionPrompt, PromptMessage, RetrievalResult, Role};
pub use cfg::RelayConfig;
pub use error::{ContextUnavailable, RelayError, UpstreamError};
pub use llm::CompletionProvider;
pub use prompt::{FALLBACK_CONTEXT, NO_RESPONSE_PLACEHOLDER, build_prompt};
pub use relay::ChatRelay;
pub use retrieve::{ContextProvider, HttpContextProvider};
