//! Chat gateway API types.

use serde::{Deserialize, Serialize};

/// Event delivered by the gateway's receive endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingEvent {
    pub chat_id: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub timestamp: i64,
}

/// Outgoing message request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub bot_id: String,
    pub chat_id: String,
    pub text: String,
}

/// Text message handed to command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Chat or group the message arrived in; replies go back here.
    pub chat_id: String,
    /// The raw message text.
    pub text: String,
    pub sender: Option<String>,
    pub timestamp: i64,
}

impl InboundMessage {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            sender: None,
            timestamp: 0,
        }
    }

    /// Extract a text message from a gateway event.
    pub fn from_event(event: &IncomingEvent) -> Option<Self> {
        let text = event.text.clone()?;

        Some(Self {
            chat_id: event.chat_id.clone(),
            text,
            sender: event.sender.clone(),
            timestamp: event.timestamp,
        })
    }
}
