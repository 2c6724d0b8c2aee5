// src/services/assistant.rs
use crate::services::provider::{CompletionProvider, ProviderError};

/// Persona and guardrails sent ahead of every user message.
pub const SYSTEM_PROMPT: &str = "\
You are a professional AI health assistant for a smart healthcare platform. \
Provide helpful, accurate, and compassionate health guidance, and always remind \
users that your advice is for informational purposes only. Encourage consulting \
a healthcare professional for serious concerns, explain medical terms in simple \
language, and never diagnose specific conditions. If a situation sounds like an \
emergency, advise calling emergency services immediately.

Guidelines:
- Keep responses concise but informative, under 200 words
- Be professional yet warm and caring
- Use at most one or two emojis per response
- Focus on general health education and wellness guidance";

/// Returned when the provider answers with empty text.
pub const EMPTY_REPLY: &str =
    "I'm here to help with your health questions. Could you please provide more \
     details about your concern?";

pub fn build_prompt(message: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser message: {message}")
}

/// One-shot completion for a user message. Empty provider output is replaced
/// by a prompt for more detail; errors are left to the caller, which decides
/// between a canned advisory and a sanitized error response.
pub async fn generate_reply(
    provider: &dyn CompletionProvider,
    message: &str,
) -> Result<String, ProviderError> {
    let text = provider.generate(&build_prompt(message)).await?;
    if text.trim().is_empty() {
        Ok(EMPTY_REPLY.to_string())
    } else {
        Ok(text)
    }
}
