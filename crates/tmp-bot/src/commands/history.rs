//! History command - lists recent lookups.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use async_trait::async_trait;
use chat_client::{InboundMessage, MessageSink};
use query_ledger::QueryLedger;

const HISTORY_TRIGGER: &str = "#历史查询";
const HISTORY_KEYWORD: &str = "历史查询";

pub struct HistoryHandler {
    ledger: QueryLedger,
    recent_limit: usize,
}

impl HistoryHandler {
    pub fn new(ledger: QueryLedger, recent_limit: usize) -> Self {
        Self {
            ledger,
            recent_limit,
        }
    }
}

#[async_trait]
impl CommandHandler for HistoryHandler {
    fn name(&self) -> &str {
        "history"
    }

    fn matches(&self, text: &str) -> bool {
        text == HISTORY_TRIGGER || text.contains(HISTORY_KEYWORD)
    }

    async fn execute(
        &self,
        message: &InboundMessage,
        _text: &str,
        sink: &dyn MessageSink,
    ) -> AppResult<()> {
        let view = self.ledger.recent_view(self.recent_limit).await;
        sink.send(&message.chat_id, &view).await?;
        Ok(())
    }
}
