//! Common test utilities for integration tests.

use async_trait::async_trait;
use chat_client::{ChatError, MessageSink};
use chrono::FixedOffset;
use query_ledger::QueryLedger;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tmp_bot::{Router, RouterSettings};
use tmp_client::{AccountLookup, MockLookup};

/// Sink that remembers everything sent, in order.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts sent so far.
    pub fn texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), ChatError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Sink that rejects every send.
pub struct FailingSink;

#[async_trait]
impl MessageSink for FailingSink {
    async fn send(&self, _chat_id: &str, _text: &str) -> Result<(), ChatError> {
        Err(ChatError::SendFailed("gateway down".into()))
    }
}

pub fn cst() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

pub fn settings(record_provider_failures: bool) -> RouterSettings {
    RouterSettings {
        recent_limit: 10,
        utc_offset: cst(),
        record_provider_failures,
    }
}

/// Sample mock accounts with a short miss delay.
pub fn sample_provider() -> Arc<dyn AccountLookup> {
    Arc::new(MockLookup::sample(Duration::from_millis(20)).unwrap())
}

/// Router over the sample accounts and a fresh ledger.
pub fn test_router() -> (Router, QueryLedger) {
    let ledger = QueryLedger::new(100, cst());
    let router = Router::standard(sample_provider(), ledger.clone(), settings(false)).unwrap();
    (router, ledger)
}
