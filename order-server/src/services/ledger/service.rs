//! Ledger outbox
//!
//! `LedgerService` hands entries to a bounded mpsc channel and returns
//! immediately. Settlement never waits on the ledger: a full or closed
//! queue is counted as `dropped` and logged for reconciliation.

use serde::Serialize;
use shared::models::LedgerEntry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Outbox counters
#[derive(Debug, Default)]
pub struct LedgerCounters {
    submitted: AtomicU64,
    recorded: AtomicU64,
    dropped: AtomicU64,
    failed: AtomicU64,
}

impl LedgerCounters {
    pub(super) fn mark_recorded(&self) {
        self.recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub(super) fn mark_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LedgerStats {
        LedgerStats {
            submitted: self.submitted.load(Ordering::Relaxed),
            recorded: self.recorded.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Reconciliation view of the outbox
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LedgerStats {
    /// Entries accepted into the queue
    pub submitted: u64,
    /// Entries the sink confirmed
    pub recorded: u64,
    /// Entries rejected because the queue was full or closed
    pub dropped: u64,
    /// Entries the sink refused
    pub failed: u64,
}

#[derive(Debug, Clone)]
pub struct LedgerService {
    tx: mpsc::Sender<LedgerEntry>,
    counters: Arc<LedgerCounters>,
}

impl LedgerService {
    /// Create the outbox; the receiver goes to a [`super::LedgerWorker`]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<LedgerEntry>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let service = Self {
            tx,
            counters: Arc::new(LedgerCounters::default()),
        };
        (service, rx)
    }

    /// Queue an entry without blocking
    pub fn submit(&self, entry: LedgerEntry) {
        match self.tx.try_send(entry) {
            Ok(()) => {
                self.counters.submitted.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(entry)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    entry_id = %entry.entry_id,
                    order_id = %entry.related_entity,
                    amount = %entry.amount,
                    "Ledger queue full, entry dropped"
                );
            }
            Err(TrySendError::Closed(entry)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    entry_id = %entry.entry_id,
                    order_id = %entry.related_entity,
                    amount = %entry.amount,
                    "Ledger worker gone, entry dropped"
                );
            }
        }
    }

    pub fn counters(&self) -> Arc<LedgerCounters> {
        self.counters.clone()
    }

    pub fn stats(&self) -> LedgerStats {
        self.counters.snapshot()
    }
}
