//! Prompt builder: one system message (instructions + optional context) and
//! the user's message verbatim.

use crate::api_types::CompletionPrompt;

/// Context substituted when the retrieval stage fails.
pub const FALLBACK_CONTEXT: &str =
    "No legal context available. Please provide general legal guidance based on your knowledge.";

/// Answer returned when the provider replies without content.
pub const NO_RESPONSE_PLACEHOLDER: &str = "Sorry, I couldn't generate a response.";

const PERSONA: &str = "You are a knowledgeable and helpful Indian legal assistant. ";

const WITH_CONTEXT: &str = "Use the following context from Indian case law to answer the user. \
Reference the information, but do not make anything up.\n\n";

const WITHOUT_CONTEXT: &str =
    "Provide general legal guidance based on your knowledge of Indian law.";

/// Builds the two-message prompt for a question.
///
/// # Example
/// ```
/// use chat_relay::{Role, build_prompt};
/// let p = build_prompt("", "What is a will?");
/// assert_eq!(p.system().role, Role::System);
/// assert!(p.system().content.ends_with("knowledge of Indian law."));
/// assert_eq!(p.user().content, "What is a will?");
/// ```
pub fn build_prompt(context: &str, message: &str) -> CompletionPrompt {
    let mut system = String::with_capacity(PERSONA.len() + WITH_CONTEXT.len() + context.len());
    system.push_str(PERSONA);
    if context.is_empty() {
        system.push_str(WITHOUT_CONTEXT);
    } else {
        system.push_str(WITH_CONTEXT);
        system.push_str(context);
    }
    CompletionPrompt::new(system, message)
}
