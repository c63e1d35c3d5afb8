//! Chat gateway HTTP client.

use crate::error::ChatError;
use crate::sink::MessageSink;
use crate::types::*;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use urlencoding::encode;

/// Chat gateway REST API client.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    bot_id: String,
}

impl ChatClient {
    /// Create a new chat gateway client.
    pub fn new(base_url: impl Into<String>, bot_id: impl Into<String>) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bot_id: bot_id.into(),
        })
    }

    /// Get the account id the bot runs as.
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    /// Check if the gateway is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Receive pending events.
    #[instrument(skip(self))]
    pub async fn receive(&self) -> Result<Vec<IncomingEvent>, ChatError> {
        let response = self
            .client
            .get(format!(
                "{}/v1/receive/{}",
                self.base_url,
                encode(&self.bot_id)
            ))
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ChatError::Api(msg));
        }

        let body = response.text().await?;
        let events: Vec<IncomingEvent> = serde_json::from_str(&body)?;
        debug!("Received {} events", events.len());
        Ok(events)
    }

    /// Send a text message to a chat.
    #[instrument(skip(self, text))]
    pub async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), ChatError> {
        let request = SendMessageRequest {
            bot_id: self.bot_id.clone(),
            chat_id: chat_id.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/v1/send", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            warn!("Send failed: {}", msg);
            return Err(ChatError::SendFailed(msg));
        }

        debug!("Sent message to {}", chat_id);
        Ok(())
    }
}

#[async_trait]
impl MessageSink for ChatClient {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), ChatError> {
        self.send_text(chat_id, text).await
    }
}
