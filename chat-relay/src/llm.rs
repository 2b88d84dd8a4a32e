//! Completion stage capability.

use std::{future::Future, pin::Pin};

use ai_llm_service::OpenRouterService;

use crate::{api_types::CompletionPrompt, error::RelayError};

/// Sends an assembled prompt to a completion model.
///
/// Returns `Ok(None)` when the model answered without usable content; the
/// relay substitutes a placeholder in that case.
pub trait CompletionProvider: Send + Sync {
    fn send<'a>(
        &'a self,
        prompt: &'a CompletionPrompt,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, RelayError>> + Send + 'a>>;
}

impl CompletionProvider for OpenRouterService {
    fn send<'a>(
        &'a self,
        prompt: &'a CompletionPrompt,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, RelayError>> + Send + 'a>> {
        Box::pin(async move {
            self.complete(&prompt.system().content, &prompt.user().content)
                .await
                .map_err(RelayError::from)
        })
    }
}
