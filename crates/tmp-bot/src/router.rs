//! Message routing to command handlers.

use crate::commands::{CommandHandler, HelpHandler, HistoryHandler, LookupHandler, LookupPattern};
use crate::error::AppResult;
use crate::format::ResultFormatter;
use chat_client::{InboundMessage, MessageSink};
use chrono::FixedOffset;
use query_ledger::QueryLedger;
use std::sync::Arc;
use tmp_client::AccountLookup;
use tracing::debug;

/// Settings for the standard handler set.
#[derive(Debug, Clone, Copy)]
pub struct RouterSettings {
    pub recent_limit: usize,
    pub utc_offset: FixedOffset,
    pub record_provider_failures: bool,
}

/// Ordered list of handlers; the first one that matches handles the message.
pub struct Router {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Router {
    pub fn new(handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { handlers }
    }

    /// Help, then history, then lookup.
    pub fn standard(
        provider: Arc<dyn AccountLookup>,
        ledger: QueryLedger,
        settings: RouterSettings,
    ) -> AppResult<Self> {
        let handlers: Vec<Box<dyn CommandHandler>> = vec![
            Box::new(HelpHandler::new()),
            Box::new(HistoryHandler::new(ledger.clone(), settings.recent_limit)),
            Box::new(LookupHandler::new(
                LookupPattern::defaults()?,
                provider,
                ledger,
                ResultFormatter::new(settings.utc_offset),
                settings.record_provider_failures,
            )),
        ];

        Ok(Self::new(handlers))
    }

    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// Route one message. Returns the name of the handler that ran, or
    /// `None` when the message is ordinary chat and nothing was sent.
    pub async fn route(
        &self,
        message: &InboundMessage,
        sink: &dyn MessageSink,
    ) -> AppResult<Option<&str>> {
        let text = message.text.trim();

        let Some(handler) = self.handlers.iter().find(|h| h.matches(text)) else {
            return Ok(None);
        };

        debug!("Routing message in {} to {}", message.chat_id, handler.name());
        handler.execute(message, text, sink).await?;
        Ok(Some(handler.name()))
    }
}
