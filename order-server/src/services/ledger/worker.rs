//! Ledger background worker
//!
//! Drains the outbox into a sink. Exits when every sender is dropped.

use super::service::LedgerCounters;
use crate::services::lookup::LedgerSink;
use shared::models::LedgerEntry;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct LedgerWorker {
    sink: Arc<dyn LedgerSink>,
    counters: Arc<LedgerCounters>,
}

impl LedgerWorker {
    pub fn new(sink: Arc<dyn LedgerSink>, counters: Arc<LedgerCounters>) -> Self {
        Self { sink, counters }
    }

    /// Run until the channel closes
    pub async fn run(self, mut rx: mpsc::Receiver<LedgerEntry>) {
        tracing::info!("Ledger worker started");

        while let Some(entry) = rx.recv().await {
            match self.sink.record(&entry) {
                Ok(()) => {
                    self.counters.mark_recorded();
                    tracing::debug!(
                        entry_id = %entry.entry_id,
                        category = ?entry.category,
                        amount = %entry.amount,
                        "Ledger entry recorded"
                    );
                }
                Err(e) => {
                    self.counters.mark_failed();
                    tracing::warn!(
                        entry_id = %entry.entry_id,
                        order_id = %entry.related_entity,
                        error = %e,
                        "Failed to record ledger entry"
                    );
                }
            }
        }

        tracing::info!("Ledger channel closed, worker stopping");
    }
}
