// src/widget.rs
//
// Conversation state machine backing the floating chat widget. The widget
// owns its message list for the lifetime of the session; nothing is
// persisted. One request may be in flight at a time, and a failed request
// is answered locally from the shared keyword table.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;

use crate::message::{ChatMessage, ChatResponse, Sender};
use crate::services::fallback;

pub const GREETING: &str = "Hello! I'm your AI health assistant. How can I help you today?";

/// Appended to locally generated replies when the backend was unreachable.
pub const OFFLINE_DISCLAIMER: &str =
    "\n\nNote: I couldn't reach the assistant service just now, so this is general \
     guidance only.";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned status {0}")]
    Status(u16),
}

/// How the widget talks to the chat endpoint. Swappable so tests can script
/// successes and failures.
#[async_trait]
pub trait ChatTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

/// reqwest-backed transport posting to the chat endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        let body: ChatResponse = resp.json().await?;
        Ok(body.response)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetStatus {
    Idle,
    Sending,
}

pub struct ChatWidget<T> {
    transport: T,
    messages: Vec<ChatMessage>,
    status: WidgetStatus,
}

impl<T: ChatTransport> ChatWidget<T> {
    pub fn new(transport: T) -> Self {
        let mut widget = Self {
            transport,
            messages: Vec::new(),
            status: WidgetStatus::Idle,
        };
        widget.push(Sender::Bot, GREETING.to_string());
        widget
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn status(&self) -> WidgetStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == WidgetStatus::Sending
    }

    /// First half of a send: record the user message and enter `Sending`.
    /// Returns the text to put on the wire, or `None` when the input is
    /// empty or another request is already in flight.
    pub fn begin_send(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.status == WidgetStatus::Sending {
            return None;
        }
        self.push(Sender::User, text.to_string());
        self.status = WidgetStatus::Sending;
        Some(text.to_string())
    }

    /// Second half: record the bot reply and return to `Idle`. A transport
    /// failure is answered from the shared keyword table instead.
    pub fn complete_send(&mut self, original: &str, result: Result<String, TransportError>) {
        let reply = match result {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(error = %err, "chat request failed, answering locally");
                local_reply(original)
            }
        };
        self.push(Sender::Bot, reply);
        self.status = WidgetStatus::Idle;
    }

    /// Full round trip through the transport. Returns false when the input
    /// was rejected.
    pub async fn send(&mut self, input: &str) -> bool {
        let Some(text) = self.begin_send(input) else {
            return false;
        };
        let result = self.transport.send(&text).await;
        self.complete_send(&text, result);
        true
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.messages.push(ChatMessage {
            text,
            sender,
            timestamp: Utc::now(),
        });
    }
}

fn local_reply(message: &str) -> String {
    let advice = fallback::match_topic(message)
        .map(fallback::advice)
        .unwrap_or(fallback::GENERAL_ADVICE);
    format!("{advice}{OFFLINE_DISCLAIMER}")
}
