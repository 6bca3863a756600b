//! Command handling contracts
//!
//! Every order operation is an action implementing [`CommandHandler`]. It runs
//! against a [`CommandContext`] bound to one redb write transaction and
//! returns its result; anything that touches another resource (ledger,
//! catalog stock) is queued as an [`Effect`] and applied by the manager only
//! after the transaction commits.

use super::storage::{INVOICE_NUMBER_COUNTER, ORDER_NUMBER_COUNTER, OrderStorage, StorageError};
use crate::services::{CatalogLookup, CustomerLookup, ReferenceRateLookup};
use crate::utils::time::now_millis;
use chrono_tz::Tz;
use redb::WriteTransaction;
use shared::error::{ErrorCode, ErrorKind};
use shared::models::{CatalogItem, Customer, LedgerEntry, ReferenceRates};
use shared::order::{Invoice, Order};
use std::sync::Arc;
use thiserror::Error;

/// Engine errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order item not found: {0}")]
    ItemNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Catalog item not found: {0}")]
    CatalogItemNotFound(String),

    #[error("Invoice not found for order: {0}")]
    InvoiceNotFound(String),

    #[error("{message}")]
    InvalidInput { code: ErrorCode, message: String },

    #[error("Order balance already settled: {0}")]
    AlreadySettled(String),

    #[error("{message}")]
    IllegalTransition { code: ErrorCode, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl OrderError {
    pub fn invalid(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            message: message.into(),
        }
    }

    pub fn illegal(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::IllegalTransition {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            OrderError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            OrderError::ItemNotFound(_) => ErrorCode::OrderItemNotFound,
            OrderError::CustomerNotFound(_) => ErrorCode::CustomerNotFound,
            OrderError::CatalogItemNotFound(_) => ErrorCode::CatalogItemNotFound,
            OrderError::InvoiceNotFound(_) => ErrorCode::InvoiceNotFound,
            OrderError::InvalidInput { code, .. } => *code,
            OrderError::AlreadySettled(_) => ErrorCode::OrderAlreadySettled,
            OrderError::IllegalTransition { code, .. } => *code,
            OrderError::Storage(_) => ErrorCode::DatabaseError,
            OrderError::Unexpected(_) => ErrorCode::InternalError,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::OrderNotFound(_)
            | OrderError::ItemNotFound(_)
            | OrderError::CustomerNotFound(_)
            | OrderError::CatalogItemNotFound(_)
            | OrderError::InvoiceNotFound(_) => ErrorKind::NotFound,
            OrderError::InvalidInput { .. } => ErrorKind::InvalidInput,
            OrderError::AlreadySettled(_) => ErrorKind::AlreadySettled,
            OrderError::IllegalTransition { .. } => ErrorKind::IllegalTransition,
            OrderError::Storage(_) | OrderError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Who performed a command, and when
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub operator_name: String,
    /// Millis
    pub timestamp: i64,
}

impl CommandMetadata {
    pub fn new(operator_name: impl Into<String>) -> Self {
        Self {
            operator_name: operator_name.into(),
            timestamp: now_millis(),
        }
    }
}

/// Work deferred until after commit
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Ledger(LedgerEntry),
    DecrementStock {
        catalog_id: String,
        quantity: i32,
        order_id: String,
        order_number: String,
    },
}

/// Read-side collaborators an action may consult
#[derive(Clone)]
pub struct Collaborators {
    pub customers: Arc<dyn CustomerLookup>,
    pub catalog: Arc<dyn CatalogLookup>,
    pub rates: Arc<dyn ReferenceRateLookup>,
}

/// Numbering settings
#[derive(Debug, Clone)]
pub struct Numbering {
    pub order_prefix: String,
    pub invoice_prefix: String,
    pub tz: Tz,
}

impl Default for Numbering {
    fn default() -> Self {
        Self {
            order_prefix: "ORD".to_string(),
            invoice_prefix: "INV".to_string(),
            tz: chrono_tz::Asia::Kolkata,
        }
    }
}

/// Execution context of one command
pub struct CommandContext<'a> {
    txn: &'a WriteTransaction,
    storage: &'a OrderStorage,
    services: &'a Collaborators,
    numbering: &'a Numbering,
    /// Rate table, fetched at most once per command
    rates: Option<Option<ReferenceRates>>,
    effects: Vec<Effect>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        txn: &'a WriteTransaction,
        storage: &'a OrderStorage,
        services: &'a Collaborators,
        numbering: &'a Numbering,
    ) -> Self {
        Self {
            txn,
            storage,
            services,
            numbering,
            rates: None,
            effects: Vec::new(),
        }
    }

    /// Load an order or fail with NotFound
    pub fn load_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.storage
            .load_order(self.txn, order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    pub fn save_order(&self, order: &Order) -> Result<(), OrderError> {
        Ok(self.storage.store_order(self.txn, order)?)
    }

    pub fn save_invoice(&self, invoice: &Invoice) -> Result<(), OrderError> {
        Ok(self.storage.store_invoice(self.txn, invoice)?)
    }

    pub fn customer(&self, customer_id: &str) -> Result<Customer, OrderError> {
        self.services
            .customers
            .by_id(customer_id)
            .ok_or_else(|| OrderError::CustomerNotFound(customer_id.to_string()))
    }

    /// Catalog record, `None` if it no longer exists
    pub fn catalog_item(&self, catalog_id: &str) -> Option<CatalogItem> {
        self.services.catalog.by_id(catalog_id)
    }

    /// Latest reference rates; the first call fetches, later calls reuse
    pub fn rates(&mut self) -> Option<ReferenceRates> {
        if self.rates.is_none() {
            let latest = self.services.rates.latest();
            if latest.is_none() {
                tracing::warn!("No reference rates published, rate resolution degrades to overrides");
            }
            self.rates = Some(latest);
        }
        self.rates.clone().flatten()
    }

    pub fn next_order_number(&self, timestamp: i64) -> Result<String, OrderError> {
        let count = self.storage.next_counter(self.txn, ORDER_NUMBER_COUNTER)?;
        Ok(self.format_number(&self.numbering.order_prefix, timestamp, count))
    }

    pub fn next_invoice_number(&self, timestamp: i64) -> Result<String, OrderError> {
        let count = self.storage.next_counter(self.txn, INVOICE_NUMBER_COUNTER)?;
        Ok(self.format_number(&self.numbering.invoice_prefix, timestamp, count))
    }

    fn format_number(&self, prefix: &str, timestamp: i64, count: u64) -> String {
        let date_str = chrono::DateTime::from_timestamp_millis(timestamp)
            .unwrap_or_default()
            .with_timezone(&self.numbering.tz)
            .format("%Y%m%d")
            .to_string();
        format!("{}{}{}", prefix, date_str, 10000 + count)
    }

    pub fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }
}

/// One order operation
pub trait CommandHandler {
    type Output;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Self::Output, OrderError>;
}
