//! Bounded in-memory query log.

use crate::types::QueryLogEntry;
use chrono::FixedOffset;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Text shown when nothing has been queried yet.
pub const EMPTY_HISTORY: &str = "📝 暂无查询历史";

/// Default size of the recent-history window.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

struct LedgerState {
    entries: VecDeque<QueryLogEntry>,
    total_recorded: u64,
}

/// Append-only log of lookup attempts.
///
/// Entries are kept in insertion order, which is chronological order.
/// Once `capacity` entries are held the oldest is evicted on each append.
/// Clones share the same log.
#[derive(Clone)]
pub struct QueryLedger {
    state: Arc<RwLock<LedgerState>>,
    capacity: usize,
    utc_offset: FixedOffset,
}

impl QueryLedger {
    /// Create an empty ledger. A zero capacity is raised to one.
    pub fn new(capacity: usize, utc_offset: FixedOffset) -> Self {
        let capacity = capacity.max(1);

        info!(
            "Query ledger initialized (capacity={}, offset={})",
            capacity, utc_offset
        );

        Self {
            state: Arc::new(RwLock::new(LedgerState {
                entries: VecDeque::with_capacity(capacity),
                total_recorded: 0,
            })),
            capacity,
            utc_offset,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an entry stamped with the current time.
    pub async fn record(&self, username: &str, success: bool) {
        let mut state = self.state.write().await;
        // Stamp under the lock so log order is timestamp order.
        let entry = QueryLogEntry::new(username, success, self.utc_offset);
        if state.entries.len() == self.capacity {
            state.entries.pop_front();
        }
        state.entries.push_back(entry);
        state.total_recorded += 1;

        debug!(
            "Recorded query for {} (success={}, retained={})",
            username,
            success,
            state.entries.len()
        );
    }

    /// Snapshot of the last `limit` entries, oldest first.
    pub async fn recent(&self, limit: usize) -> Vec<QueryLogEntry> {
        let state = self.state.read().await;
        let skip = state.entries.len().saturating_sub(limit);
        state.entries.iter().skip(skip).cloned().collect()
    }

    /// Numbered listing of the last `limit` entries.
    pub async fn recent_view(&self, limit: usize) -> String {
        render_history(&self.recent(limit).await)
    }

    /// Number of entries currently retained.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }

    /// Number of appends since creation, including evicted entries.
    pub async fn total_recorded(&self) -> u64 {
        self.state.read().await.total_recorded
    }
}

/// Render entries as the history reply.
pub fn render_history(entries: &[QueryLogEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY.into();
    }

    let mut response = format!("📋 **查询历史记录** (最近{}条)\n\n", entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let status = if entry.success { "✅" } else { "❌" };
        response.push_str(&format!(
            "{}. {} {} ({})\n",
            index + 1,
            status,
            entry.username,
            entry.timestamp
        ));
    }
    response
}
