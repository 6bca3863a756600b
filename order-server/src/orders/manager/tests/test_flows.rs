use super::*;
use crate::orders::invoice::synthesize_line;
use shared::error::ErrorCode;
use shared::order::InvoiceStatus;


#[test]
fn test_delivery_decrements_stock_once() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(create_request(vec![catalog_input("cat-ring", 3)], 0), &meta())
        .unwrap();
    assert_eq!(env.stock("cat-ring"), 10);

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(result.order.status, OrderStatus::Delivered);
    assert!(result.order.inventory_applied);
    assert_eq!(env.stock("cat-ring"), 7);

    let history = env.catalog.history("cat-ring");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].change, -3);
    assert_eq!(history[0].balance, 7);
    assert_eq!(history[0].reference_id, order.order_id);
    assert_eq!(history[0].reference_label, order.order_number);

    // A second delivery is rejected and leaves the stock alone
    let err = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderAlreadyDelivered);
    assert_eq!(env.stock("cat-ring"), 7);
    assert_eq!(env.catalog.history("cat-ring").len(), 1);
}


#[test]
fn test_full_lifecycle_with_final_payment() {
    let mut env = create_test_env();
    let order = env
        .manager
        .create_order(
            create_request(
                vec![catalog_input("cat-chain", 1), custom_input("Kasu Mala", 1000, 2)],
                1000,
            ),
            &meta(),
        )
        .unwrap();
    // Chain: 12.5 g × 80 = 1000, making 8 × 12.5 = 100, wastage 3% = 30
    assert_eq!(order.items[0].price, d(1130));
    assert_eq!(order.total_amount, d(3130));

    let order = env
        .manager
        .add_payment(&order.order_id, payment(1000, PaymentMethod::Card), &meta())
        .unwrap();
    assert_eq!(order.remaining_amount, d(1130));

    let request = DeliverRequest {
        final_payment: Some(payment(1130, PaymentMethod::Transfer)),
        tax: Some(d(94)),
        discount: None,
    };
    let DeliveryResult { order, invoice } = env
        .manager
        .deliver_order(&order.order_id, request, &meta())
        .unwrap();

    assert_eq!(order.payment_status, PaymentStatus::FullPaid);
    assert_eq!(order.remaining_amount, Decimal::ZERO);
    assert_eq!(order.payments.last().unwrap().kind, PaymentKind::Final);
    assert!(order.actual_delivery_date.is_some());
    assert_invariants(&order);

    assert_eq!(invoice.lines.len(), 2);
    assert_eq!(invoice.paid_amount, d(3130));
    assert_eq!(invoice.due_amount, Decimal::ZERO);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.payment_mode, "MIXED");
    assert_eq!(invoice.total, invoice.subtotal + d(94));
    assert_eq!(env.stock("cat-chain"), 3);

    let categories: Vec<_> = env.drain_ledger().into_iter().map(|e| e.category).collect();
    assert_eq!(
        categories,
        vec![
            LedgerCategory::OrderAdvance,
            LedgerCategory::OrderPayment,
            LedgerCategory::OrderFinalSettlement,
        ]
    );

    let stored = env.manager.get_invoice(&order.order_id).unwrap();
    assert_eq!(stored.invoice_id, invoice.invoice_id);
    assert_eq!(order.invoice_id.as_deref(), Some(invoice.invoice_id.as_str()));
}


#[test]
fn test_invoice_lines_round_trip_from_stored_items() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(
            create_request(
                vec![
                    catalog_input("cat-ring", 2),
                    catalog_input("cat-chain", 1),
                    custom_input("Vanki", 1500, 1),
                ],
                0,
            ),
            &meta(),
        )
        .unwrap();

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();

    let stored_order = env.manager.get_order(&order.order_id).unwrap();
    let stored_invoice = env.manager.get_invoice(&order.order_id).unwrap();
    assert_eq!(stored_invoice, result.invoice);

    let rates = stored_invoice.rates.clone();
    for (item, line) in stored_order.items.iter().zip(&stored_invoice.lines) {
        let catalog = item.catalog_id().and_then(|id| env.catalog.by_id(id));
        let again = synthesize_line(item, catalog.as_ref(), rates.as_ref());
        assert_eq!(again.subtotal, line.subtotal, "line {}", line.description);
    }
}


#[test]
fn test_delivery_uses_applied_rate_over_new_reference() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(create_request(vec![catalog_input("cat-ring", 1)], 0), &meta())
        .unwrap();

    // The market moves after the order was taken
    env.rates.publish(ReferenceRates {
        rate_22k: d(200),
        ..reference_rates()
    });

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    let line = &result.invoice.lines[0];
    assert_eq!(line.rate, d(100));
    assert_eq!(line.subtotal, d(1170));
    assert_eq!(line.purchase_rate, d(90));
    assert_eq!(result.invoice.rates.as_ref().unwrap().rate_22k, d(200));
}


#[test]
fn test_recalculation_and_delivery_agree_on_rate() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(create_request(vec![catalog_input("cat-ring", 1)], 0), &meta())
        .unwrap();
    let item_id = order.items[0].item_id.clone();
    assert_eq!(order.items[0].overrides.applied_rate, Some(d(100)));

    env.rates.publish(ReferenceRates {
        rate_22k: d(200),
        ..reference_rates()
    });

    let patch = ItemPatch {
        recalculate: true,
        ..Default::default()
    };
    let order = env
        .manager
        .update_item(&order.order_id, &item_id, patch, &meta())
        .unwrap();
    assert_eq!(order.items[0].overrides.applied_rate, Some(d(100)));
    assert_eq!(order.items[0].price, d(1170));

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(result.invoice.lines[0].rate, d(100));
    assert_eq!(result.invoice.lines[0].subtotal, order.items[0].price);
}


#[test]
fn test_manual_rate_wins_at_delivery() {
    let env = create_test_env();
    let input = OrderItemInput {
        overrides: PricingOverrides {
            manual_rate: Some(d(50)),
            applied_rate: Some(d(40)),
            ..Default::default()
        },
        ..catalog_input("cat-ring", 1)
    };
    let order = env
        .manager
        .create_order(create_request(vec![input], 0), &meta())
        .unwrap();
    // 10 g × 50 + 150 + 2% of 500
    assert_eq!(order.items[0].price, d(660));

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(result.invoice.lines[0].rate, d(50));
}


#[test]
fn test_delivery_tolerates_removed_catalog_record() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(
            create_request(vec![catalog_input("cat-ring", 1), custom_input("Vanki", 1500, 1)], 0),
            &meta(),
        )
        .unwrap();
    env.catalog.remove("cat-ring");

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(result.order.status, OrderStatus::Delivered);
    assert_eq!(result.invoice.lines[0].subtotal, Decimal::ZERO);
    assert_eq!(result.invoice.lines[0].purchase_rate, Decimal::ZERO);
    // 20 g × 100 for the custom line
    assert_eq!(result.invoice.lines[1].subtotal, d(2000));
    assert!(env.catalog.history("cat-ring").is_empty());
}


#[test]
fn test_delivery_with_outstanding_due() {
    let env = create_test_env();
    let order = env
        .manager
        .create_order(create_request(vec![custom_input("Kasu Mala", 1000, 2)], 500), &meta())
        .unwrap();

    let result = env
        .manager
        .deliver_order(&order.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(result.order.payment_status, PaymentStatus::PartiallyPaid);
    assert_eq!(result.invoice.paid_amount, d(500));
    assert_eq!(result.invoice.due_amount, d(1500));
    assert_eq!(result.invoice.status, InvoiceStatus::Partial);
    assert_eq!(result.invoice.payment_mode, "CASH");
}


#[test]
fn test_delivery_alerts_include_new_due_orders() {
    let manager = create_test_manager();
    let now = crate::utils::time::now_millis();
    let hour = 60 * 60 * 1000;

    let mut soon = create_request(vec![custom_input("Kasu Mala", 1000, 1)], 0);
    soon.expected_delivery_date = Some(now + 3 * hour);
    let soon = manager.create_order(soon, &meta()).unwrap();

    let mut later = create_request(vec![custom_input("Jhumka", 400, 1)], 0);
    later.expected_delivery_date = Some(now + 72 * hour);
    manager.create_order(later, &meta()).unwrap();

    let mut overdue = create_request(vec![custom_input("Vanki", 900, 1)], 0);
    overdue.expected_delivery_date = Some(now - hour);
    let overdue = manager.create_order(overdue, &meta()).unwrap();

    let alerts: Vec<_> = manager
        .delivery_alerts()
        .unwrap()
        .into_iter()
        .map(|o| o.order_id)
        .collect();
    assert_eq!(alerts, vec![overdue.order_id.clone(), soon.order_id.clone()]);

    let metrics = manager.dashboard().unwrap();
    assert_eq!(metrics.overdue_count, 1);
    assert_eq!(metrics.near_delivery_count, 1);

    manager
        .deliver_order(&overdue.order_id, DeliverRequest::default(), &meta())
        .unwrap();
    assert_eq!(manager.delivery_alerts().unwrap().len(), 1);
}
