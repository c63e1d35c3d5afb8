//! Query log entry type.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One lookup attempt. Never mutated once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    /// Username exactly as the caller typed it.
    pub username: String,
    pub success: bool,
    pub recorded_at: DateTime<Utc>,
    /// `recorded_at` rendered in zh-CN style at capture time.
    pub timestamp: String,
}

impl QueryLogEntry {
    pub fn new(username: impl Into<String>, success: bool, utc_offset: FixedOffset) -> Self {
        let recorded_at = Utc::now();
        Self {
            username: username.into(),
            success,
            recorded_at,
            timestamp: zh_cn_datetime(&recorded_at, utc_offset),
        }
    }
}

/// `2024/1/5 08:03:09` style timestamp in the given offset.
pub fn zh_cn_datetime(at: &DateTime<Utc>, utc_offset: FixedOffset) -> String {
    at.with_timezone(&utc_offset)
        .format("%Y/%-m/%-d %H:%M:%S")
        .to_string()
}
