//! Collaborator contracts consumed by the order engine
//!
//! The engine is synchronous and runs inside one redb write transaction,
//! so every lookup here is a plain blocking call.

use shared::models::{CatalogItem, Customer, InventoryHistoryEntry, LedgerEntry, ReferenceRates};

use super::ledger::LedgerError;

pub trait CustomerLookup: Send + Sync {
    fn by_id(&self, id: &str) -> Option<Customer>;
}

pub trait CatalogLookup: Send + Sync {
    fn by_id(&self, id: &str) -> Option<CatalogItem>;

    /// Decrement stock, returning the new balance (`None` if the record is gone)
    fn decrement_stock(&self, id: &str, quantity: i32) -> Option<i32>;

    fn append_history(&self, entry: InventoryHistoryEntry);
}

pub trait ReferenceRateLookup: Send + Sync {
    /// Latest published rate table, if any
    fn latest(&self) -> Option<ReferenceRates>;
}

/// Append-only financial log
pub trait LedgerSink: Send + Sync {
    fn record(&self, entry: &LedgerEntry) -> Result<(), LedgerError>;
}
