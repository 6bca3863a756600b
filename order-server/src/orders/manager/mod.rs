//! OrdersManager - command execution and read-side queries
//!
//! # Command Flow
//!
//! ```text
//! execute(action)
//!     ├─ 1. Begin write transaction (redb admits one writer)
//!     ├─ 2. Create CommandContext
//!     ├─ 3. Run the action: validate, mutate, persist, queue effects
//!     ├─ 4. Commit transaction (any error before this rolls back)
//!     ├─ 5. Apply effects: ledger outbox, catalog stock
//!     └─ 6. Return the action's output
//! ```
//!
//! Effects never fail the command. A ledger entry that cannot be queued is
//! counted as dropped; a catalog record that vanished is logged and skipped.

mod error;
pub use error::*;

use super::actions::{
    AddPaymentAction, CreateOrderAction, DeliverOrderAction, ModifyItemAction, RemoveItemAction,
    UpdateStatusAction,
};
use super::queries::{dashboard_metrics, delivery_alerts, filter_orders};
use super::storage::{OrderStorage, StorageError};
use super::traits::{
    Collaborators, CommandContext, CommandHandler, CommandMetadata, Effect, Numbering, OrderError,
};
use crate::services::LedgerService;
use crate::utils::time::now_millis;
use shared::models::{InventoryHistoryEntry, InventoryReason};
use shared::order::{
    CreateOrderRequest, DashboardMetrics, DeliverRequest, DeliveryResult, Invoice, ItemPatch,
    Order, OrderQuery, OrderStatus, PaymentInput,
};
use std::path::Path;

/// Default horizon for delivery alerts
pub const DEFAULT_ALERT_HOURS: i64 = 24;

/// OrdersManager for command processing
pub struct OrdersManager {
    storage: OrderStorage,
    services: Collaborators,
    ledger: LedgerService,
    numbering: Numbering,
    /// Delivery alert horizon in hours
    alert_hours: i64,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("storage", &"<OrderStorage>")
            .field("numbering", &self.numbering)
            .field("alert_hours", &self.alert_hours)
            .finish()
    }
}

impl OrdersManager {
    /// Create a new OrdersManager with the given database path
    pub fn new(
        db_path: impl AsRef<Path>,
        services: Collaborators,
        ledger: LedgerService,
        numbering: Numbering,
    ) -> ManagerResult<Self> {
        let storage = OrderStorage::open(db_path)?;
        tracing::info!(tz = %numbering.tz, "OrdersManager started");
        Ok(Self {
            storage,
            services,
            ledger,
            numbering,
            alert_hours: DEFAULT_ALERT_HOURS,
        })
    }

    /// Create an OrdersManager with existing storage (for testing)
    #[cfg(test)]
    pub fn with_storage(storage: OrderStorage, services: Collaborators, ledger: LedgerService) -> Self {
        Self {
            storage,
            services,
            ledger,
            numbering: Numbering::default(),
            alert_hours: DEFAULT_ALERT_HOURS,
        }
    }

    /// Set the delivery alert horizon
    pub fn set_alert_hours(&mut self, hours: i64) {
        self.alert_hours = hours;
    }

    pub fn storage(&self) -> &OrderStorage {
        &self.storage
    }

    // ========== Commands ==========

    pub fn create_order(
        &self,
        request: CreateOrderRequest,
        metadata: &CommandMetadata,
    ) -> ManagerResult<Order> {
        self.execute(&CreateOrderAction { request }, metadata)
    }

    pub fn add_payment(
        &self,
        order_id: &str,
        payment: PaymentInput,
        metadata: &CommandMetadata,
    ) -> ManagerResult<Order> {
        let action = AddPaymentAction {
            order_id: order_id.to_string(),
            payment,
        };
        self.execute(&action, metadata)
    }

    pub fn update_item(
        &self,
        order_id: &str,
        item_id: &str,
        patch: ItemPatch,
        metadata: &CommandMetadata,
    ) -> ManagerResult<Order> {
        let action = ModifyItemAction {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
            patch,
        };
        self.execute(&action, metadata)
    }

    pub fn delete_item(
        &self,
        order_id: &str,
        item_id: &str,
        metadata: &CommandMetadata,
    ) -> ManagerResult<Order> {
        let action = RemoveItemAction {
            order_id: order_id.to_string(),
            item_id: item_id.to_string(),
        };
        self.execute(&action, metadata)
    }

    pub fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        metadata: &CommandMetadata,
    ) -> ManagerResult<Order> {
        let action = UpdateStatusAction {
            order_id: order_id.to_string(),
            status,
        };
        self.execute(&action, metadata)
    }

    pub fn deliver_order(
        &self,
        order_id: &str,
        request: DeliverRequest,
        metadata: &CommandMetadata,
    ) -> ManagerResult<DeliveryResult> {
        let action = DeliverOrderAction {
            order_id: order_id.to_string(),
            request,
        };
        self.execute(&action, metadata)
    }

    /// Run one action in its own transaction, then apply its effects
    fn execute<A: CommandHandler>(
        &self,
        action: &A,
        metadata: &CommandMetadata,
    ) -> ManagerResult<A::Output> {
        let txn = self.storage.begin_write()?;
        let mut ctx = CommandContext::new(&txn, &self.storage, &self.services, &self.numbering);

        let output = match action.execute(&mut ctx, metadata) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(error = %e, kind = %e.kind(), "Command rejected, rolling back");
                return Err(e);
            }
        };
        let effects = ctx.into_effects();

        txn.commit().map_err(StorageError::from)?;

        self.apply_effects(effects, metadata.timestamp);
        Ok(output)
    }

    fn apply_effects(&self, effects: Vec<Effect>, timestamp: i64) {
        for effect in effects {
            match effect {
                Effect::Ledger(entry) => self.ledger.submit(entry),
                Effect::DecrementStock {
                    catalog_id,
                    quantity,
                    order_id,
                    order_number,
                } => {
                    let Some(balance) = self.services.catalog.decrement_stock(&catalog_id, quantity)
                    else {
                        tracing::warn!(
                            catalog_id = %catalog_id,
                            order_id = %order_id,
                            "Catalog record missing, stock decrement skipped"
                        );
                        continue;
                    };
                    self.services.catalog.append_history(InventoryHistoryEntry {
                        catalog_id,
                        change: -quantity,
                        balance,
                        reason: InventoryReason::OrderDelivery,
                        reference_id: order_id,
                        reference_label: order_number,
                        timestamp,
                    });
                }
            }
        }
    }

    // ========== Queries ==========

    pub fn get_order(&self, order_id: &str) -> ManagerResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))
    }

    pub fn list_orders(&self, query: &OrderQuery) -> ManagerResult<Vec<Order>> {
        Ok(filter_orders(self.storage.get_all_orders()?, query))
    }

    /// Invoice produced when the order was delivered
    pub fn get_invoice(&self, order_id: &str) -> ManagerResult<Invoice> {
        // NotFound for an unknown order, InvoiceNotFound for an undelivered one
        self.get_order(order_id)?;
        self.storage
            .get_invoice_for_order(order_id)?
            .ok_or_else(|| OrderError::InvoiceNotFound(order_id.to_string()))
    }

    pub fn dashboard(&self) -> ManagerResult<DashboardMetrics> {
        let orders = self.storage.get_all_orders()?;
        Ok(dashboard_metrics(
            &orders,
            now_millis(),
            self.numbering.tz,
            self.alert_hours,
        ))
    }

    pub fn delivery_alerts(&self) -> ManagerResult<Vec<Order>> {
        Ok(delivery_alerts(
            self.storage.get_all_orders()?,
            now_millis(),
            self.alert_hours,
        ))
    }
}

#[cfg(test)]
mod tests;
