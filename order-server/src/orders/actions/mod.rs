//! Command action implementations
//!
//! Each action implements the `CommandHandler` trait and handles
//! one specific order operation.

mod add_payment;
mod create_order;
mod deliver_order;
mod modify_item;
mod remove_item;
mod update_status;

pub use add_payment::AddPaymentAction;
pub use create_order::CreateOrderAction;
pub use deliver_order::DeliverOrderAction;
pub use modify_item::ModifyItemAction;
pub use remove_item::RemoveItemAction;
pub use update_status::UpdateStatusAction;

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixtures for running single actions against an in-memory store

    use crate::orders::storage::{OrderStorage, StorageError};
    use crate::orders::traits::{
        Collaborators, CommandContext, CommandHandler, CommandMetadata, Effect, Numbering,
        OrderError,
    };
    use crate::services::{CatalogService, CustomerDirectory, RateBoard};
    use rust_decimal::Decimal;
    use shared::models::{CatalogItem, Customer, CustomerSnapshot, ReferenceRates};
    use shared::order::{
        CatalogRef, CustomSpec, ItemSource, Order, OrderItem, OrderStatus, PaymentKind,
        PaymentMethod, PaymentRecord, PaymentStatus, PricingOverrides,
    };
    use std::sync::Arc;

    pub const NOW: i64 = 1_767_297_600_000;

    pub fn ring() -> CatalogItem {
        CatalogItem {
            id: "cat-ring".to_string(),
            name: "Ring".to_string(),
            sku: "RG-01".to_string(),
            purity: Some("22K".to_string()),
            gross_weight: Decimal::from(10),
            making_charge_per_gram: Decimal::from(5),
            fixed_making_charge: Decimal::from(100),
            wastage_percent: Decimal::from(2),
            purchase_price: None,
            stock_quantity: 10,
        }
    }

    pub fn customer() -> Customer {
        Customer {
            id: "cust-1".to_string(),
            name: "Meera Iyer".to_string(),
            phone: "9845012345".to_string(),
            email: None,
            address: None,
        }
    }

    pub fn rates() -> ReferenceRates {
        ReferenceRates {
            rate_18k: Decimal::from(80),
            rate_22k: Decimal::from(100),
            rate_24k: Decimal::from(110),
            updated_at: NOW,
        }
    }

    pub fn custom_item(item_id: &str, price: i64, quantity: i32) -> OrderItem {
        OrderItem {
            item_id: item_id.to_string(),
            source: ItemSource::Custom(CustomSpec {
                name: "Temple Necklace".to_string(),
                target_weight: Some("20 g".to_string()),
                ..Default::default()
            }),
            quantity,
            price: Decimal::from(price),
            weight: None,
            purity: Some("22K".to_string()),
            overrides: PricingOverrides::default(),
            note: None,
        }
    }

    fn base_order(order_id: &str, items: Vec<OrderItem>) -> Order {
        let total: Decimal = items.iter().map(|i| i.line_amount()).sum();
        Order {
            order_id: order_id.to_string(),
            order_number: format!("ORD{}", order_id),
            customer: CustomerSnapshot::from(&customer()),
            items,
            total_amount: total,
            advance_amount: Decimal::ZERO,
            remaining_amount: total,
            expected_delivery_date: None,
            actual_delivery_date: None,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            payments: Vec::new(),
            is_delivered: false,
            inventory_applied: false,
            notes: None,
            invoice_id: None,
            created_at: NOW,
            updated_at: NOW,
        }
    }

    /// Order with one custom item `item-1` and an optional cash advance
    pub fn custom_order(order_id: &str, price: i64, quantity: i32, advance: i64) -> Order {
        let mut order = base_order(order_id, vec![custom_item("item-1", price, quantity)]);
        if advance > 0 {
            let advance = Decimal::from(advance);
            order.payments.push(PaymentRecord {
                payment_id: "pay-advance".to_string(),
                amount: advance,
                method: PaymentMethod::Cash,
                kind: PaymentKind::Advance,
                note: None,
                timestamp: NOW,
            });
            order.advance_amount = advance;
            order.remaining_amount = (order.total_amount - advance).max(Decimal::ZERO);
            order.payment_status = if order.remaining_amount.is_zero() {
                PaymentStatus::FullPaid
            } else {
                PaymentStatus::AdvancePaid
            };
        }
        order
    }

    /// Order with `quantity` catalog rings as item `item-1`, priced at 999 each
    pub fn catalog_order(order_id: &str, quantity: i32) -> Order {
        let ring = ring();
        let item = OrderItem {
            item_id: "item-1".to_string(),
            source: ItemSource::Catalog(CatalogRef {
                catalog_id: ring.id.clone(),
                name: ring.name.clone(),
                sku: ring.sku.clone(),
                purity: ring.purity.clone(),
                gross_weight: ring.gross_weight,
            }),
            quantity,
            price: Decimal::from(999),
            weight: None,
            purity: None,
            overrides: PricingOverrides::default(),
            note: None,
        };
        base_order(order_id, vec![item])
    }

    pub struct TestHarness {
        pub storage: OrderStorage,
        pub catalog: Arc<CatalogService>,
        pub customers: Arc<CustomerDirectory>,
        pub rates: Arc<RateBoard>,
        services: Collaborators,
        numbering: Numbering,
    }

    impl TestHarness {
        pub fn new() -> Self {
            let storage = OrderStorage::open_in_memory().unwrap();
            let catalog = Arc::new(CatalogService::with_items([ring()]));
            let customers = Arc::new(CustomerDirectory::with_customers([customer()]));
            let rates = Arc::new(RateBoard::new(Some(rates())));
            let services = Collaborators {
                customers: customers.clone(),
                catalog: catalog.clone(),
                rates: rates.clone(),
            };
            Self {
                storage,
                catalog,
                customers,
                rates,
                services,
                numbering: Numbering::default(),
            }
        }

        pub fn insert(&self, order: Order) {
            let txn = self.storage.begin_write().unwrap();
            self.storage.store_order(&txn, &order).unwrap();
            txn.commit().unwrap();
        }

        pub fn get(&self, order_id: &str) -> Order {
            self.storage.get_order(order_id).unwrap().unwrap()
        }

        /// Execute and commit on success; a failed action rolls back
        pub fn run<A: CommandHandler>(
            &self,
            action: &A,
        ) -> Result<(A::Output, Vec<Effect>), OrderError> {
            let txn = self.storage.begin_write()?;
            let mut ctx = CommandContext::new(&txn, &self.storage, &self.services, &self.numbering);
            let metadata = CommandMetadata {
                operator_name: "tester".to_string(),
                timestamp: NOW,
            };
            let output = action.execute(&mut ctx, &metadata)?;
            let effects = ctx.into_effects();
            txn.commit().map_err(StorageError::from)?;
            Ok((output, effects))
        }
    }
}
