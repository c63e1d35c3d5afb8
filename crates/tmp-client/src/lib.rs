//! TruckersMP account lookup: data model, lookup capability and backends.

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::AccountServiceClient;
pub use error::LookupError;
pub use mock::MockLookup;
pub use provider::AccountLookup;
pub use types::*;
