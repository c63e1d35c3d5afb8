//! In-memory log of account lookups.
//!
//! Nothing is persisted; the log lives as long as the process and keeps a
//! bounded number of the most recent entries.

mod ledger;
mod types;

pub use ledger::{render_history, QueryLedger, DEFAULT_RECENT_LIMIT, EMPTY_HISTORY};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};

    fn cst() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn test_zh_cn_datetime() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 3, 9).unwrap();
        assert_eq!(zh_cn_datetime(&at, cst()), "2024/1/5 08:03:09");
    }

    #[test]
    fn test_zh_cn_datetime_crosses_midnight() {
        let at = Utc.with_ymd_and_hms(2023, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(zh_cn_datetime(&at, cst()), "2024/1/1 04:00:00");
    }

    #[test]
    fn test_entry_keeps_username_as_typed() {
        let entry = QueryLogEntry::new("YY10871", true, cst());
        assert_eq!(entry.username, "YY10871");
        assert!(entry.success);
        assert_eq!(entry.timestamp, zh_cn_datetime(&entry.recorded_at, cst()));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = QueryLogEntry::new("trucker001", false, cst());
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"username\":\"trucker001\""));
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"recorded_at\""));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_history(&[]), EMPTY_HISTORY);
    }

    #[test]
    fn test_render_numbering_and_glyphs() {
        let mut ok = QueryLogEntry::new("yy10871", true, cst());
        ok.timestamp = "2024/1/5 08:03:09".into();
        let mut miss = QueryLogEntry::new("ghost", false, cst());
        miss.timestamp = "2024/1/5 08:04:00".into();

        let view = render_history(&[ok, miss]);
        assert_eq!(
            view,
            "📋 **查询历史记录** (最近2条)\n\n\
             1. ✅ yy10871 (2024/1/5 08:03:09)\n\
             2. ❌ ghost (2024/1/5 08:04:00)\n"
        );
    }

    #[tokio::test]
    async fn test_empty_ledger_view() {
        let ledger = QueryLedger::new(100, cst());
        assert!(ledger.is_empty().await);
        assert_eq!(ledger.recent_view(DEFAULT_RECENT_LIMIT).await, EMPTY_HISTORY);
    }

    #[tokio::test]
    async fn test_record_appends_one_entry() {
        let ledger = QueryLedger::new(100, cst());

        ledger.record("yy10871", true).await;
        assert_eq!(ledger.len().await, 1);

        ledger.record("yy10871", true).await;
        assert_eq!(ledger.len().await, 2);
        assert_eq!(ledger.total_recorded().await, 2);
    }

    #[tokio::test]
    async fn test_recent_window_keeps_last_ten_in_order() {
        let ledger = QueryLedger::new(100, cst());
        for i in 1..=12 {
            ledger.record(&format!("user{}", i), i % 2 == 0).await;
        }

        let recent = ledger.recent(DEFAULT_RECENT_LIMIT).await;
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].username, "user3");
        assert_eq!(recent[9].username, "user12");

        let view = ledger.recent_view(DEFAULT_RECENT_LIMIT).await;
        assert!(view.starts_with("📋 **查询历史记录** (最近10条)"));
        assert!(view.contains("1. ❌ user3 ("));
        assert!(view.contains("10. ✅ user12 ("));
        assert!(!view.contains("user2 "));
    }

    #[tokio::test]
    async fn test_recent_view_does_not_mutate() {
        let ledger = QueryLedger::new(100, cst());
        ledger.record("yy10871", true).await;

        let first = ledger.recent_view(DEFAULT_RECENT_LIMIT).await;
        let second = ledger.recent_view(DEFAULT_RECENT_LIMIT).await;

        assert_eq!(first, second);
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let ledger = QueryLedger::new(3, cst());
        for i in 1..=5 {
            ledger.record(&format!("user{}", i), true).await;
        }

        assert_eq!(ledger.len().await, 3);
        assert_eq!(ledger.total_recorded().await, 5);

        let recent = ledger.recent(10).await;
        assert_eq!(recent[0].username, "user3");
        assert_eq!(recent[2].username, "user5");
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised() {
        let ledger = QueryLedger::new(0, cst());
        assert_eq!(ledger.capacity(), 1);

        ledger.record("a", true).await;
        ledger.record("b", true).await;
        assert_eq!(ledger.recent(10).await[0].username, "b");
    }

    #[tokio::test]
    async fn test_clones_share_log() {
        let ledger = QueryLedger::new(10, cst());
        let other = ledger.clone();

        other.record("yy10871", true).await;
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_records_are_not_lost() {
        let ledger = QueryLedger::new(1000, cst());

        let tasks = (0..50).map(|i| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.record(&format!("user{}", i), true).await })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap();
        }

        assert_eq!(ledger.len().await, 50);
        assert_eq!(ledger.total_recorded().await, 50);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_records_stay_chronological() {
        let ledger = QueryLedger::new(4000, cst());

        let tasks = (0..4000).map(|i| {
            let ledger = ledger.clone();
            tokio::spawn(async move { ledger.record(&format!("user{}", i), i % 3 != 0).await })
        });
        for result in futures::future::join_all(tasks).await {
            result.unwrap();
        }

        let entries = ledger.recent(4000).await;
        assert_eq!(entries.len(), 4000);
        let inversions = entries
            .windows(2)
            .filter(|pair| pair[1].recorded_at < pair[0].recorded_at)
            .count();
        assert_eq!(inversions, 0);
    }
}
