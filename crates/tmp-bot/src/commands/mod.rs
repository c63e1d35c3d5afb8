//! Bot command handlers.

mod help;
mod history;
mod lookup;

pub use help::{HelpHandler, HELP_TEXT};
pub use history::HistoryHandler;
pub use lookup::{
    LookupHandler, LookupPattern, LOOKUP_FAILED_TEXT, MISSING_USERNAME_TEXT,
};

use crate::error::AppResult;
use async_trait::async_trait;
use chat_client::{InboundMessage, MessageSink};

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name (e.g., "help", "history").
    fn name(&self) -> &str;

    /// Check if this handler claims the trimmed message text.
    fn matches(&self, text: &str) -> bool;

    /// Execute the command, sending every reply line through `sink`.
    async fn execute(
        &self,
        message: &InboundMessage,
        text: &str,
        sink: &dyn MessageSink,
    ) -> AppResult<()>;
}
