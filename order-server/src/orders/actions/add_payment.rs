//! AddPayment command handler
//!
//! Appends a payment to an open order. The payment that settles the balance
//! is relabelled FINAL.

use crate::orders::money::validate_payment;
use crate::orders::settlement::{
    ensure_open, ledger_credit, payment_status_after_payment, recompute_totals,
};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, Effect, OrderError};
use rust_decimal::Decimal;
use shared::models::LedgerCategory;
use shared::order::{Order, PaymentInput, PaymentKind, PaymentRecord};

/// AddPayment action
#[derive(Debug, Clone)]
pub struct AddPaymentAction {
    pub order_id: String,
    pub payment: PaymentInput,
}

impl CommandHandler for AddPaymentAction {
    type Output = Order;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Order, OrderError> {
        // 1. Validate payment input
        validate_payment(&self.payment)?;

        // 2. Load and check state
        let mut order = ctx.load_order(&self.order_id)?;
        ensure_open(&order)?;
        if order.remaining_amount <= Decimal::ZERO {
            return Err(OrderError::AlreadySettled(order.order_number.clone()));
        }

        // 3. Append and re-derive from the full history
        order.payments.push(PaymentRecord {
            payment_id: uuid::Uuid::new_v4().to_string(),
            amount: self.payment.amount,
            method: self.payment.method,
            kind: PaymentKind::Partial,
            note: self.payment.note.clone(),
            timestamp: metadata.timestamp,
        });
        recompute_totals(&mut order);
        order.payment_status = payment_status_after_payment(&order);
        order.updated_at = metadata.timestamp;

        let settled = order.remaining_amount <= Decimal::ZERO;
        let category = if settled {
            LedgerCategory::OrderFinalSettlement
        } else {
            LedgerCategory::OrderPayment
        };
        if let Some(payment) = order.payments.last_mut() {
            if settled {
                payment.kind = PaymentKind::Final;
            }
        }
        if let Some(payment) = order.payments.last() {
            let entry = ledger_credit(&order, category, payment, &metadata.operator_name);
            ctx.push_effect(Effect::Ledger(entry));
        }

        ctx.save_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            amount = %self.payment.amount,
            method = self.payment.method.as_str(),
            remaining = %order.remaining_amount,
            settled,
            "Payment added"
        );

        Ok(order)
    }
}
