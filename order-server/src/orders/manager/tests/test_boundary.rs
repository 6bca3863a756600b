use super::*;
use shared::error::{ErrorCode, ErrorKind};
use std::thread;


fn delivered_order(env: &TestEnv) -> Order {
    let order = env
        .manager
        .create_order(
            create_request(vec![custom_input("Kasu Mala", 1000, 1), custom_input("Jhumka", 400, 1)], 0),
            &meta(),
        )
        .unwrap();
    env.manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap()
        .order
}


#[test]
fn test_delivered_order_rejects_item_mutation() {
    let env = create_test_env();
    let order = delivered_order(&env);
    let item_id = order.items[0].item_id.clone();

    let patch = ItemPatch {
        quantity: Some(2),
        ..Default::default()
    };
    let err = env
        .manager
        .update_item(&order.order_id, &item_id, patch, &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);

    let err = env
        .manager
        .delete_item(&order.order_id, &item_id, &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);

    assert_eq!(env.manager.get_order(&order.order_id).unwrap(), order);
}


#[test]
fn test_delivered_status_is_final() {
    let env = create_test_env();
    let order = delivered_order(&env);

    for status in OrderStatus::ALL {
        let err = env
            .manager
            .update_status(&order.order_id, status, &meta())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalTransition, "to {}", status);
    }
}


#[test]
fn test_delivered_via_status_update_is_rejected() {
    let manager = create_test_manager();
    let order = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 0), &meta())
        .unwrap();

    let err = manager
        .update_status(&order.order_id, OrderStatus::Delivered, &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderIllegalTransition);
    assert!(manager.get_invoice(&order.order_id).is_err());
}


#[test]
fn test_cancelled_order_rejects_everything() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(
            create_request(vec![catalog_input("cat-ring", 2), custom_input("Vanki", 900, 1)], 100),
            &meta(),
        )
        .unwrap();
    let order = env
        .manager
        .update_status(&order.order_id, OrderStatus::Cancelled, &meta())
        .unwrap();
    let item_id = order.items[0].item_id.clone();

    let err = env
        .manager
        .add_payment(&order.order_id, payment(100, PaymentMethod::Cash), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderCancelled);

    let err = env
        .manager
        .update_item(&order.order_id, &item_id, ItemPatch::default(), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderCancelled);

    let err = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderCancelled);

    // No refund, no restock
    assert_eq!(env.stock("cat-ring"), 10);
    assert_eq!(env.manager.get_order(&order.order_id).unwrap().payments.len(), 1);
}


#[test]
fn test_last_item_cannot_be_deleted() {
    let manager = create_test_manager();
    let order = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 0), &meta())
        .unwrap();

    let err = manager
        .delete_item(&order.order_id, &order.items[0].item_id, &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.code(), ErrorCode::OrderLastItem);
    assert_eq!(manager.get_order(&order.order_id).unwrap().items.len(), 1);
}


#[test]
fn test_payment_on_settled_order() {
    let mut env = create_test_env();
    let order = env
        .manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 900), &meta())
        .unwrap();
    assert_eq!(order.payment_status, PaymentStatus::FullPaid);
    env.drain_ledger();

    let err = env
        .manager
        .add_payment(&order.order_id, payment(1, PaymentMethod::Cash), &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadySettled);
    assert!(env.drain_ledger().is_empty());
}


#[test]
fn test_not_found_kinds() {
    let manager = create_test_manager();

    let err = manager.get_order("missing").unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderNotFound);

    let err = manager
        .add_payment("missing", payment(10, PaymentMethod::Cash), &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let mut request = create_request(vec![custom_input("Vanki", 900, 1)], 0);
    request.customer_id = "cust-404".to_string();
    let err = manager.create_order(request, &meta()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::CustomerNotFound);

    let err = manager
        .create_order(create_request(vec![catalog_input("cat-404", 1)], 0), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CatalogItemNotFound);

    let order = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 0), &meta())
        .unwrap();
    let err = manager
        .delete_item(&order.order_id, "item-404", &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderItemNotFound);

    let err = manager.get_invoice(&order.order_id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvoiceNotFound);
}


#[test]
fn test_rejected_commands_leave_no_trace() {
    let mut env = create_test_env();

    let err = env
        .manager
        .create_order(create_request(vec![], 500), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderEmpty);

    let malformed = OrderItemInput {
        name: Some("Loose".to_string()),
        quantity: 1,
        ..Default::default()
    };
    let err = env
        .manager
        .create_order(create_request(vec![malformed], 500), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderItemMalformed);
    assert!(env.manager.list_orders(&OrderQuery::default()).unwrap().is_empty());

    // An invalid delivery adjustment rolls back the final payment too
    let order = env
        .manager
        .create_order(create_request(vec![catalog_input("cat-ring", 1)], 0), &meta())
        .unwrap();
    let request = DeliverRequest {
        final_payment: Some(payment(100, PaymentMethod::Cash)),
        tax: Some(d(-5)),
        discount: None,
    };
    let err = env
        .manager
        .deliver_order(&order.order_id, request, &meta())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let stored = env.manager.get_order(&order.order_id).unwrap();
    assert_eq!(stored, order);
    assert_eq!(env.stock("cat-ring"), 10);
    assert!(env.drain_ledger().is_empty());
}


#[test]
fn test_invalid_amounts() {
    let manager = create_test_manager();
    let order = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 0), &meta())
        .unwrap();

    for amount in [0, -10, 100_000_001] {
        let err = manager
            .add_payment(&order.order_id, payment(amount, PaymentMethod::Cash), &meta())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PaymentInvalidAmount, "amount {}", amount);
    }

    let err = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 0)], 0), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValueOutOfRange);
}


#[test]
fn test_full_ledger_queue_does_not_block_settlement() {
    let storage = OrderStorage::open_in_memory().unwrap();
    let env = create_test_env();
    let (ledger, _rx) = LedgerService::new(1);
    let services = Collaborators {
        customers: Arc::new(CustomerDirectory::with_customers([Customer {
            id: "cust-1".to_string(),
            name: "Meera Iyer".to_string(),
            phone: "9845012345".to_string(),
            email: None,
            address: None,
        }])),
        catalog: env.catalog.clone(),
        rates: env.rates.clone(),
    };
    let manager = OrdersManager::with_storage(storage, services, ledger.clone());

    let order = manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 100), &meta())
        .unwrap();
    let order = manager
        .add_payment(&order.order_id, payment(100, PaymentMethod::Cash), &meta())
        .unwrap();
    assert_eq!(order.remaining_amount, d(700));

    let stats = ledger.stats();
    assert_eq!(stats.submitted, 1);
    assert_eq!(stats.dropped, 1);
}


#[test]
fn test_closed_ledger_is_counted() {
    let mut env = create_test_env();
    env.ledger_rx.close();

    env.manager
        .create_order(create_request(vec![custom_input("Vanki", 900, 1)], 100), &meta())
        .unwrap();
    assert_eq!(env.ledger.stats().dropped, 1);
}


#[test]
fn test_concurrent_payments_on_one_order() {
    let env = create_test_env();
    let manager = Arc::new(env.manager);
    let order = manager
        .create_order(create_request(vec![custom_input("Kasu Mala", 1000, 10)], 0), &meta())
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = manager.clone();
            let order_id = order.order_id.clone();
            thread::spawn(move || {
                manager
                    .add_payment(&order_id, payment(500, PaymentMethod::Cash), &meta())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let order = manager.get_order(&order.order_id).unwrap();
    assert_eq!(order.payments.len(), 8);
    assert_eq!(order.remaining_amount, d(6000));
    assert_invariants(&order);
}


#[test]
fn test_concurrent_deliveries_share_catalog_stock() {
    let env = create_test_env();
    let catalog = env.catalog.clone();
    let manager = Arc::new(env.manager);

    let order_ids: Vec<_> = (0..3)
        .map(|_| {
            manager
                .create_order(create_request(vec![catalog_input("cat-ring", 3)], 0), &meta())
                .unwrap()
                .order_id
        })
        .collect();

    let handles: Vec<_> = order_ids
        .into_iter()
        .map(|order_id| {
            let manager = manager.clone();
            thread::spawn(move || {
                manager
                    .deliver_order(&order_id, DeliverRequest::default(), &meta())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(catalog.by_id("cat-ring").unwrap().stock_quantity, 1);
    assert_eq!(catalog.history("cat-ring").len(), 3);
}
