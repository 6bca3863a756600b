//! Reference data models the order engine reads or writes through collaborators

pub mod catalog;
pub mod customer;
pub mod ledger;
pub mod rate;

pub use catalog::{CatalogItem, InventoryHistoryEntry, InventoryReason};
pub use customer::{Customer, CustomerSnapshot};
pub use ledger::{LedgerCategory, LedgerDirection, LedgerEntry};
pub use rate::{PurityBucket, ReferenceRates};
