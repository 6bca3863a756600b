//! Financial ledger outbox
//!
//! ```text
//! OrdersManager (after commit)
//!   └─ LedgerService::submit() → mpsc → LedgerWorker → LedgerSink
//!                                                       ├─ MemoryLedger
//!                                                       └─ JournalLedger (ledger.jsonl)
//! ```
//!
//! Best-effort: nothing here can fail an order operation. Drops and sink
//! failures are counted in [`LedgerStats`].

mod service;
mod sinks;
mod worker;

pub use service::{LedgerCounters, LedgerService, LedgerStats};
pub use sinks::{JournalLedger, MemoryLedger};
pub use worker::LedgerWorker;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ledger rejected entry: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::lookup::LedgerSink;
    use rust_decimal::Decimal;
    use shared::models::{LedgerCategory, LedgerDirection, LedgerEntry};
    use shared::order::PaymentMethod;
    use std::sync::Arc;

    fn entry(id: &str) -> LedgerEntry {
        LedgerEntry {
            entry_id: id.to_string(),
            direction: LedgerDirection::Credit,
            category: LedgerCategory::OrderPayment,
            amount: Decimal::from(500),
            method: PaymentMethod::Cash,
            description: "Payment for ORD".to_string(),
            related_entity: "order-1".to_string(),
            performed_by: "tester".to_string(),
            timestamp: 0,
        }
    }

    struct RejectingSink;

    impl LedgerSink for RejectingSink {
        fn record(&self, _entry: &LedgerEntry) -> Result<(), LedgerError> {
            Err(LedgerError::Rejected("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_worker_drains_into_sink() {
        let (service, rx) = LedgerService::new(8);
        let sink = Arc::new(MemoryLedger::new());
        let worker = LedgerWorker::new(sink.clone(), service.counters());

        service.submit(entry("e1"));
        service.submit(entry("e2"));
        let counters = service.counters();
        drop(service);
        worker.run(rx).await;

        let ids: Vec<_> = sink.entries().into_iter().map(|e| e.entry_id).collect();
        assert_eq!(ids, vec!["e1", "e2"]);
        let stats = counters.snapshot();
        assert_eq!(stats.submitted, 2);
        assert_eq!(stats.recorded, 2);
        assert_eq!(stats.dropped, 0);
    }

    #[test]
    fn test_full_queue_counts_drops() {
        let (service, _rx) = LedgerService::new(1);
        service.submit(entry("e1"));
        service.submit(entry("e2"));

        let stats = service.stats();
        assert_eq!(stats.submitted, 1);
        assert_eq!(stats.dropped, 1);
    }

    #[test]
    fn test_closed_queue_counts_drops() {
        let (service, rx) = LedgerService::new(4);
        drop(rx);
        service.submit(entry("e1"));
        assert_eq!(service.stats().dropped, 1);
    }

    #[tokio::test]
    async fn test_sink_failures_are_counted() {
        let (service, rx) = LedgerService::new(4);
        let worker = LedgerWorker::new(Arc::new(RejectingSink), service.counters());

        service.submit(entry("e1"));
        let counters = service.counters();
        drop(service);
        worker.run(rx).await;

        let stats = counters.snapshot();
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.recorded, 0);
    }

    #[test]
    fn test_journal_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let journal = JournalLedger::open(dir.path().join("ledger.jsonl")).unwrap();
        journal.record(&entry("e1")).unwrap();
        journal.record(&entry("e2")).unwrap();

        let content = std::fs::read_to_string(journal.path()).unwrap();
        let lines: Vec<LedgerEntry> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].entry_id, "e2");
        assert_eq!(lines[0].category, LedgerCategory::OrderPayment);
    }
}
