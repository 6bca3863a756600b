//! Service layer - collaborators of the order engine
//!
//! - [`CatalogService`] - catalog records and stock movements
//! - [`CustomerDirectory`] - customer master data
//! - [`RateBoard`] - published reference rates
//! - [`ledger`] - best-effort financial ledger outbox
//! - [`SeedData`] - startup seed for the in-memory services

pub mod catalog_service;
pub mod customer_directory;
pub mod ledger;
pub mod lookup;
pub mod rate_board;
pub mod seed;

pub use catalog_service::CatalogService;
pub use customer_directory::CustomerDirectory;
pub use ledger::{JournalLedger, LedgerService, LedgerStats, LedgerWorker, MemoryLedger};
pub use lookup::{CatalogLookup, CustomerLookup, LedgerSink, ReferenceRateLookup};
pub use rate_board::RateBoard;
pub use seed::SeedData;
