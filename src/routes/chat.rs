// src/routes/chat.rs
use axum::{Json, extract::State};
use serde_json::Value;

use crate::error::AppError;
use crate::message::ChatResponse;
use crate::services::{assistant, fallback};
use crate::state::SharedState;

/// POST /api/chat. Forwards a user message to the generative provider, or
/// answers from the keyword table when the provider is unconfigured or down.
///
/// The body is taken as a raw JSON value so a missing or non-string
/// `message` yields the fixed validation body instead of a framework
/// rejection.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = match payload.get("message").and_then(Value::as_str) {
        Some(m) if !m.trim().is_empty() => m.trim().to_string(),
        _ => {
            return Err(AppError::Validation(
                "Message is required and must be a string".to_string(),
            ));
        }
    };

    state.metrics.record_route("chat").await;

    // No credential: never attempt the live call. A keyword match is still a
    // useful answer; anything else is a configuration error.
    let Some(provider) = state.provider.as_ref() else {
        tracing::warn!("provider credential missing, trying keyword fallback");
        return match fallback::match_topic(&message) {
            Some(topic) => {
                state.metrics.record_fallback(topic).await;
                state.metrics.record_outcome("fallback").await;
                Ok(Json(ChatResponse {
                    response: format!("{}{}", fallback::advice(topic), fallback::CONFIG_DISCLAIMER),
                }))
            }
            None => {
                state.metrics.record_outcome("error").await;
                Err(AppError::Configuration)
            }
        };
    };

    match assistant::generate_reply(provider.as_ref(), &message).await {
        Ok(text) => {
            state.metrics.record_outcome("ok").await;
            Ok(Json(ChatResponse { response: text }))
        }
        Err(err) => {
            tracing::error!(error = %err, "provider call failed");
            if let Some(topic) = fallback::match_topic(&message) {
                state.metrics.record_fallback(topic).await;
                state.metrics.record_outcome("fallback").await;
                Ok(Json(ChatResponse {
                    response: format!("{}{}", fallback::advice(topic), fallback::OUTAGE_DISCLAIMER),
                }))
            } else {
                state.metrics.record_outcome("error").await;
                if err.is_credential_error() {
                    Err(AppError::Configuration)
                } else {
                    Err(AppError::Provider)
                }
            }
        }
    }
}
