use async_trait::async_trait;

use healthbot_backend::message::Sender;
use healthbot_backend::services::fallback::{self, Topic};
use healthbot_backend::widget::{
    ChatTransport, ChatWidget, GREETING, OFFLINE_DISCLAIMER, TransportError, WidgetStatus,
};

struct EchoTransport;

#[async_trait]
impl ChatTransport for EchoTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        Ok(format!("You said: {message}"))
    }
}

struct DownTransport;

#[async_trait]
impl ChatTransport for DownTransport {
    async fn send(&self, _message: &str) -> Result<String, TransportError> {
        Err(TransportError::Status(500))
    }
}

#[tokio::test]
async fn widget_opens_with_the_greeting() {
    let widget = ChatWidget::new(EchoTransport);
    assert_eq!(widget.messages().len(), 1);
    assert_eq!(widget.messages()[0].sender, Sender::Bot);
    assert_eq!(widget.messages()[0].text, GREETING);
    assert_eq!(widget.status(), WidgetStatus::Idle);
}

#[tokio::test]
async fn successful_send_appends_user_then_bot() {
    let mut widget = ChatWidget::new(EchoTransport);
    assert!(widget.send("  hello there  ").await);

    let messages = widget.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "hello there");
    assert_eq!(messages[2].sender, Sender::Bot);
    assert_eq!(messages[2].text, "You said: hello there");
    assert!(messages[1].timestamp <= messages[2].timestamp);
    assert_eq!(widget.status(), WidgetStatus::Idle);
}

#[tokio::test]
async fn transport_failure_answers_from_the_keyword_table() {
    let mut widget = ChatWidget::new(DownTransport);
    assert!(widget.send("I have a fever").await);

    let bot = widget.messages().last().unwrap();
    assert_eq!(bot.sender, Sender::Bot);
    assert!(bot.text.starts_with(fallback::advice(Topic::Fever)));
    assert!(bot.text.ends_with(OFFLINE_DISCLAIMER));
    assert_eq!(widget.status(), WidgetStatus::Idle);
}

#[tokio::test]
async fn transport_failure_without_keyword_uses_general_advice() {
    let mut widget = ChatWidget::new(DownTransport);
    assert!(widget.send("I feel weird").await);

    let bot = widget.messages().last().unwrap();
    assert!(bot.text.starts_with(fallback::GENERAL_ADVICE));
    assert!(bot.text.ends_with(OFFLINE_DISCLAIMER));
}

#[tokio::test]
async fn empty_input_is_ignored() {
    let mut widget = ChatWidget::new(EchoTransport);
    assert!(!widget.send("   ").await);
    assert_eq!(widget.messages().len(), 1);
    assert_eq!(widget.status(), WidgetStatus::Idle);
}

#[tokio::test]
async fn only_one_request_may_be_in_flight() {
    let mut widget = ChatWidget::new(EchoTransport);

    let first = widget.begin_send("headache").unwrap();
    assert_eq!(widget.status(), WidgetStatus::Sending);
    assert!(widget.is_sending());

    // A second send while one is pending is rejected outright.
    assert!(widget.begin_send("fever").is_none());
    assert_eq!(widget.messages().len(), 2);

    widget.complete_send(&first, Ok("Rest and hydrate.".to_string()));
    assert_eq!(widget.status(), WidgetStatus::Idle);
    assert_eq!(widget.messages().len(), 3);

    // Back to idle, sends are accepted again.
    assert!(widget.begin_send("fever").is_some());
}
