//! Settlement state machine
//!
//! Totals and payment status are always re-derived from the full item and
//! payment lists, never adjusted by deltas:
//!
//! ```text
//! total     = Σ(price × quantity)
//! remaining = max(0, total − Σ payments)
//! ```
//!
//! Order status lifecycle:
//!
//! ```text
//! PENDING ─┬─> PARTIALLY_PAID ─┐
//!          ├─> READY ──────────┼─> DELIVERED (deliverOrder only, terminal)
//!          └───────────────────┴─> CANCELLED (terminal)
//! ```

use super::money::non_negative;
use super::traits::OrderError;
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{LedgerCategory, LedgerDirection, LedgerEntry};
use shared::order::{Order, OrderStatus, PaymentRecord, PaymentStatus};

/// Recompute `total_amount` and `remaining_amount` from items and payments
pub fn recompute_totals(order: &mut Order) {
    order.total_amount = order.items.iter().map(|i| i.line_amount()).sum();
    order.remaining_amount = non_negative(order.total_amount - order.paid_total());
}

/// Status after item edits: settled, something paid, or nothing paid
pub fn derive_payment_status(order: &Order) -> PaymentStatus {
    if order.remaining_amount <= Decimal::ZERO {
        PaymentStatus::FullPaid
    } else if !order.payments.is_empty() {
        PaymentStatus::AdvancePaid
    } else {
        PaymentStatus::Unpaid
    }
}

/// Status right after creation
pub fn initial_payment_status(total: Decimal, advance: Decimal) -> PaymentStatus {
    if advance > Decimal::ZERO && advance >= total {
        PaymentStatus::FullPaid
    } else if advance > Decimal::ZERO {
        PaymentStatus::AdvancePaid
    } else {
        PaymentStatus::Unpaid
    }
}

/// Status after a payment or at delivery
pub fn payment_status_after_payment(order: &Order) -> PaymentStatus {
    if order.remaining_amount <= Decimal::ZERO {
        PaymentStatus::FullPaid
    } else {
        PaymentStatus::PartiallyPaid
    }
}

/// Items and payments are frozen once an order is delivered or cancelled
pub fn ensure_open(order: &Order) -> Result<(), OrderError> {
    match order.status {
        OrderStatus::Delivered => Err(OrderError::illegal(
            ErrorCode::OrderAlreadyDelivered,
            format!("Order {} has already been delivered", order.order_number),
        )),
        OrderStatus::Cancelled => Err(OrderError::illegal(
            ErrorCode::OrderCancelled,
            format!("Order {} has been cancelled", order.order_number),
        )),
        _ => Ok(()),
    }
}

/// Generic status updates: terminal states are final and DELIVERED is
/// reserved for delivery
pub fn ensure_status_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
    if to == OrderStatus::Delivered {
        return Err(OrderError::illegal(
            ErrorCode::OrderIllegalTransition,
            "DELIVERED can only be reached by delivering the order",
        ));
    }
    if from.is_terminal() {
        return Err(OrderError::illegal(
            ErrorCode::OrderIllegalTransition,
            format!("Cannot change status from {} to {}", from, to),
        ));
    }
    Ok(())
}

/// Credit entry for a cash-affecting event
pub fn ledger_credit(
    order: &Order,
    category: LedgerCategory,
    payment: &PaymentRecord,
    performed_by: &str,
) -> LedgerEntry {
    let label = match category {
        LedgerCategory::OrderAdvance => "Advance",
        LedgerCategory::OrderPayment => "Payment",
        LedgerCategory::OrderFinalSettlement => "Final settlement",
    };
    LedgerEntry {
        entry_id: uuid::Uuid::new_v4().to_string(),
        direction: LedgerDirection::Credit,
        category,
        amount: payment.amount,
        method: payment.method,
        description: format!(
            "{} for order {} ({})",
            label, order.order_number, order.customer.name
        ),
        related_entity: order.order_id.clone(),
        performed_by: performed_by.to_string(),
        timestamp: payment.timestamp,
    }
}

/// The single method used, `MIXED`, or `NONE`
pub fn payment_mode_label(payments: &[PaymentRecord]) -> String {
    let mut methods = payments.iter().map(|p| p.method);
    let Some(first) = methods.next() else {
        return "NONE".to_string();
    };
    if methods.all(|m| m == first) {
        first.as_str().to_string()
    } else {
        "MIXED".to_string()
    }
}
