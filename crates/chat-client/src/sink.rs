//! Outbound side of the transport.

use crate::error::ChatError;
use async_trait::async_trait;

/// Anything that can deliver a text line to a chat.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), ChatError>;
}
