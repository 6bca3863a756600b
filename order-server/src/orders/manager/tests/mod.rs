use super::*;
use crate::services::{CatalogLookup, CatalogService, CustomerDirectory, RateBoard};
use rust_decimal::Decimal;
use shared::models::{CatalogItem, Customer, LedgerCategory, LedgerEntry, ReferenceRates};
use shared::order::{OrderItemInput, PaymentKind, PaymentMethod, PaymentStatus, PricingOverrides};
use std::sync::Arc;
use tokio::sync::mpsc;

struct TestEnv {
    manager: OrdersManager,
    catalog: Arc<CatalogService>,
    rates: Arc<RateBoard>,
    ledger: LedgerService,
    ledger_rx: mpsc::Receiver<LedgerEntry>,
}

impl TestEnv {
    /// Everything the ledger outbox has received so far
    fn drain_ledger(&mut self) -> Vec<LedgerEntry> {
        let mut entries = Vec::new();
        while let Ok(entry) = self.ledger_rx.try_recv() {
            entries.push(entry);
        }
        entries
    }

    fn stock(&self, catalog_id: &str) -> i32 {
        self.catalog.by_id(catalog_id).unwrap().stock_quantity
    }
}

fn d(v: i64) -> Decimal {
    Decimal::from(v)
}

fn ring() -> CatalogItem {
    CatalogItem {
        id: "cat-ring".to_string(),
        name: "Solitaire Ring".to_string(),
        sku: "RG-01".to_string(),
        purity: Some("22K".to_string()),
        gross_weight: d(10),
        making_charge_per_gram: d(5),
        fixed_making_charge: d(100),
        wastage_percent: d(2),
        purchase_price: Some(d(90)),
        stock_quantity: 10,
    }
}

fn chain() -> CatalogItem {
    CatalogItem {
        id: "cat-chain".to_string(),
        name: "Rope Chain".to_string(),
        sku: "CH-07".to_string(),
        purity: Some("18K".to_string()),
        gross_weight: Decimal::new(125, 1),
        making_charge_per_gram: d(8),
        fixed_making_charge: d(0),
        wastage_percent: d(3),
        purchase_price: None,
        stock_quantity: 4,
    }
}

fn reference_rates() -> ReferenceRates {
    ReferenceRates {
        rate_18k: d(80),
        rate_22k: d(100),
        rate_24k: d(110),
        updated_at: 0,
    }
}

fn create_test_env() -> TestEnv {
    let storage = OrderStorage::open_in_memory().unwrap();
    let catalog = Arc::new(CatalogService::with_items([ring(), chain()]));
    let customers = Arc::new(CustomerDirectory::with_customers([Customer {
        id: "cust-1".to_string(),
        name: "Meera Iyer".to_string(),
        phone: "9845012345".to_string(),
        email: Some("meera@example.com".to_string()),
        address: None,
    }]));
    let rates = Arc::new(RateBoard::new(Some(reference_rates())));
    let services = Collaborators {
        customers,
        catalog: catalog.clone(),
        rates: rates.clone(),
    };
    let (ledger, ledger_rx) = LedgerService::new(64);
    let manager = OrdersManager::with_storage(storage, services, ledger.clone());
    TestEnv {
        manager,
        catalog,
        rates,
        ledger,
        ledger_rx,
    }
}

fn create_test_manager() -> OrdersManager {
    create_test_env().manager
}

fn meta() -> CommandMetadata {
    CommandMetadata::new("Test Operator")
}

fn custom_input(name: &str, price: i64, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        is_custom: true,
        name: Some(name.to_string()),
        quantity,
        price: Some(d(price)),
        purity: Some("22K".to_string()),
        target_weight: Some("20 g".to_string()),
        ..Default::default()
    }
}

fn catalog_input(catalog_id: &str, quantity: i32) -> OrderItemInput {
    OrderItemInput {
        catalog_id: Some(catalog_id.to_string()),
        quantity,
        ..Default::default()
    }
}

fn create_request(items: Vec<OrderItemInput>, advance: i64) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: "cust-1".to_string(),
        items,
        advance_amount: (advance > 0).then(|| d(advance)),
        expected_delivery_date: None,
        notes: None,
        payment_method: Some(PaymentMethod::Cash),
    }
}

fn payment(amount: i64, method: PaymentMethod) -> PaymentInput {
    PaymentInput {
        amount: d(amount),
        method,
        note: None,
    }
}

/// Totals invariants every stored order must satisfy
fn assert_invariants(order: &Order) {
    let total: Decimal = order.items.iter().map(|i| i.price * Decimal::from(i.quantity)).sum();
    let paid: Decimal = order.payments.iter().map(|p| p.amount).sum();
    assert_eq!(order.total_amount, total, "total mismatch on {}", order.order_number);
    assert_eq!(
        order.remaining_amount,
        (total - paid).max(Decimal::ZERO),
        "remaining mismatch on {}",
        order.order_number
    );
    assert!(!order.items.is_empty());
}

mod test_boundary;
mod test_flows;
