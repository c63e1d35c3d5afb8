//! Account service types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason reported when no account matches the requested username.
pub const NOT_FOUND_REASON: &str = "未找到该用户，请检查用户名是否正确";

/// Presence of an account at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnlineState {
    Online,
    #[default]
    #[serde(other)]
    Offline,
}

/// Game platform identity linked to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformIdentity {
    #[serde(rename = "steamId")]
    pub external_id: String,
    #[serde(rename = "steamName")]
    pub display_name: String,
}

/// Virtual trucking company membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vtc {
    pub id: u64,
    pub name: String,
    pub tag: String,
}

/// A moderation action against an account, current or historical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecord {
    pub active: bool,
    pub reason: String,
    pub expire_time: DateTime<Utc>,
}

/// Account as returned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub join_date: DateTime<Utc>,
    #[serde(flatten)]
    pub platform: PlatformIdentity,
    #[serde(default)]
    pub online_state: OnlineState,
    pub online_time: String,
    #[serde(default)]
    pub vtc: Option<Vtc>,
    #[serde(default)]
    pub bans: Vec<BanRecord>,
}

impl AccountRecord {
    /// The ban currently in force: the first active entry, if any.
    pub fn current_ban(&self) -> Option<&BanRecord> {
        self.bans.iter().find(|ban| ban.active)
    }
}

/// Result of a lookup that reached the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(AccountRecord),
    NotFound(String),
}

impl LookupOutcome {
    /// Standard not-found outcome.
    pub fn not_found() -> Self {
        LookupOutcome::NotFound(NOT_FOUND_REASON.into())
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}
