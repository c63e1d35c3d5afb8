//! Message receiver with polling.

use crate::client::ChatClient;
use crate::types::*;
use std::time::Duration;
use tokio::time::sleep;
use tokio_stream::Stream;
use tracing::{debug, error};

/// Message receiver that polls the gateway for new messages.
pub struct MessageReceiver {
    client: ChatClient,
    poll_interval: Duration,
}

impl MessageReceiver {
    /// Create a new message receiver.
    pub fn new(client: ChatClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }

    /// Start receiving messages as an async stream.
    pub fn stream(self) -> impl Stream<Item = InboundMessage> {
        async_stream::stream! {
            loop {
                match self.client.receive().await {
                    Ok(events) => {
                        for event in events {
                            if let Some(message) = InboundMessage::from_event(&event) {
                                debug!("Received: {} in {}",
                                    message.text.chars().take(50).collect::<String>(),
                                    message.chat_id
                                );
                                yield message;
                            }
                        }
                    }
                    Err(e) => {
                        error!("Receive error: {}", e);
                        // Back off on error
                        sleep(Duration::from_secs(5)).await;
                        continue;
                    }
                }

                sleep(self.poll_interval).await;
            }
        }
    }
}
