//! Order engine
//!
//! - **manager**: OrdersManager, runs actions in redb transactions and applies effects
//! - **actions**: one `CommandHandler` per order operation
//! - **settlement**: totals, payment status and the status state machine
//! - **invoice**: invoice synthesis at delivery
//! - **queries**: listing, dashboard metrics and delivery alerts
//! - **storage**: redb persistence for orders, invoices and counters
//!
//! # Architecture
//!
//! ```text
//! HTTP handler → OrdersManager → Action → Storage (redb, one write txn)
//!                      ↓ after commit
//!          LedgerService outbox / CatalogLookup stock
//! ```

pub mod actions;
pub mod invoice;
pub mod manager;
pub mod money;
pub mod queries;
pub mod settlement;
pub mod storage;
pub mod traits;

// Re-exports
pub use manager::{ManagerResult, OrdersManager};
pub use storage::{OrderStorage, StorageError};
pub use traits::{Collaborators, CommandMetadata, Numbering, OrderError};
