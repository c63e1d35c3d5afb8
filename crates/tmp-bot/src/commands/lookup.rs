//! Lookup command - resolves a TMP username and replies with the account.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::format::ResultFormatter;
use async_trait::async_trait;
use chat_client::{InboundMessage, MessageSink};
use query_ledger::QueryLedger;
use regex::Regex;
use std::sync::Arc;
use tmp_client::AccountLookup;
use tracing::{error, info, instrument};

pub const MISSING_USERNAME_TEXT: &str = "❌ 请输入要查询的TMP用户名";
pub const LOOKUP_FAILED_TEXT: &str = "❌ 查询过程中发生错误，请稍后重试";

/// One accepted spelling of the lookup command.
pub struct LookupPattern {
    name: &'static str,
    regex: Regex,
}

impl LookupPattern {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// Trimmed username if the whole text matches; empty when the prefix
    /// was given without one.
    pub fn capture(&self, text: &str) -> Option<String> {
        let captures = self.regex.captures(text)?;
        Some(
            captures
                .get(1)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
        )
    }

    /// The command spellings in priority order.
    ///
    /// The explicit prefixes accept a missing username so the user can be
    /// told to supply one. The mention form needs text after the keyword,
    /// and its greedy lead means the last keyword occurrence wins.
    pub fn defaults() -> Result<Vec<Self>, regex::Error> {
        Ok(vec![
            Self::new("hash", r"^#查询TMP(?:\s+(.*))?$")?,
            Self::new("plain", r"^查询TMP(?:\s+(.*))?$")?,
            Self::new("slash", r"^/查询TMP(?:\s+(.*))?$")?,
            Self::new("mention", r"^.*查询TMP\s+(.+)$")?,
        ])
    }
}

pub struct LookupHandler {
    patterns: Vec<LookupPattern>,
    provider: Arc<dyn AccountLookup>,
    ledger: QueryLedger,
    formatter: ResultFormatter,
    record_provider_failures: bool,
}

impl LookupHandler {
    pub fn new(
        patterns: Vec<LookupPattern>,
        provider: Arc<dyn AccountLookup>,
        ledger: QueryLedger,
        formatter: ResultFormatter,
        record_provider_failures: bool,
    ) -> Self {
        Self {
            patterns,
            provider,
            ledger,
            formatter,
            record_provider_failures,
        }
    }

    /// Username from the first pattern matching the text, in priority order.
    pub fn parse(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| pattern.capture(text))
    }
}

#[async_trait]
impl CommandHandler for LookupHandler {
    fn name(&self) -> &str {
        "lookup"
    }

    fn matches(&self, text: &str) -> bool {
        self.parse(text).is_some()
    }

    #[instrument(skip(self, message, sink), fields(chat_id = %message.chat_id))]
    async fn execute(
        &self,
        message: &InboundMessage,
        text: &str,
        sink: &dyn MessageSink,
    ) -> AppResult<()> {
        let Some(username) = self.parse(text) else {
            return Ok(());
        };

        if username.is_empty() {
            sink.send(&message.chat_id, MISSING_USERNAME_TEXT).await?;
            return Ok(());
        }

        sink.send(
            &message.chat_id,
            &format!("🔍 正在查询TMP用户 \"{}\"，请稍候...", username),
        )
        .await?;

        match self.provider.lookup(&username).await {
            Ok(outcome) => {
                self.ledger.record(&username, outcome.is_found()).await;
                info!(
                    "Lookup for {} via {} (found={})",
                    username,
                    self.provider.name(),
                    outcome.is_found()
                );
                sink.send(&message.chat_id, &self.formatter.format(&outcome))
                    .await?;
            }
            Err(e) => {
                error!("Lookup for {} via {} failed: {}", username, self.provider.name(), e);
                if self.record_provider_failures {
                    self.ledger.record(&username, false).await;
                }
                sink.send(&message.chat_id, LOOKUP_FAILED_TEXT).await?;
            }
        }

        Ok(())
    }
}
