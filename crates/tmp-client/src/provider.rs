//! Lookup capability shared by every account data source.

use crate::error::LookupError;
use crate::types::LookupOutcome;
use async_trait::async_trait;

/// Something that can resolve a username into an account.
///
/// `Ok(LookupOutcome::NotFound(..))` is a normal answer; `Err` means the
/// data source itself could not be reached or understood.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    async fn lookup(&self, username: &str) -> Result<LookupOutcome, LookupError>;
}
