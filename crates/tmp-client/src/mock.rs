//! In-memory account data source.

use crate::error::LookupError;
use crate::provider::AccountLookup;
use crate::types::{AccountRecord, LookupOutcome};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

const SAMPLE_ACCOUNTS: &str = include_str!("../fixtures/accounts.json");

/// Fixed set of accounts keyed by lower-cased username.
///
/// Hits return immediately. Misses wait `miss_delay` first, which stands in
/// for the round-trip a real service would take to say "no such user".
pub struct MockLookup {
    accounts: HashMap<String, AccountRecord>,
    miss_delay: Duration,
}

impl MockLookup {
    pub fn new(
        accounts: impl IntoIterator<Item = (String, AccountRecord)>,
        miss_delay: Duration,
    ) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|(name, record)| (name.to_lowercase(), record))
            .collect();

        Self {
            accounts,
            miss_delay,
        }
    }

    /// Load accounts from a JSON object of `username -> account`.
    pub fn from_json(json: &str, miss_delay: Duration) -> Result<Self, LookupError> {
        let accounts: HashMap<String, AccountRecord> = serde_json::from_str(json)?;
        Ok(Self::new(accounts, miss_delay))
    }

    /// Load accounts from a JSON fixture file.
    pub fn from_file(path: impl AsRef<Path>, miss_delay: Duration) -> Result<Self, LookupError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let lookup = Self::from_json(&json, miss_delay)?;
        info!(
            "Loaded {} mock accounts from {}",
            lookup.len(),
            path.as_ref().display()
        );
        Ok(lookup)
    }

    /// The built-in demo accounts.
    pub fn sample(miss_delay: Duration) -> Result<Self, LookupError> {
        Self::from_json(SAMPLE_ACCOUNTS, miss_delay)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountLookup for MockLookup {
    fn name(&self) -> &str {
        "mock"
    }

    async fn lookup(&self, username: &str) -> Result<LookupOutcome, LookupError> {
        if let Some(record) = self.accounts.get(&username.to_lowercase()) {
            debug!("Mock hit for {}", username);
            return Ok(LookupOutcome::Found(record.clone()));
        }

        sleep(self.miss_delay).await;
        debug!("Mock miss for {}", username);
        Ok(LookupOutcome::not_found())
    }
}
