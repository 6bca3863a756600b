//! DeliverOrder command handler
//!
//! One-way transition to DELIVERED. Takes the optional final payment,
//! synthesizes the invoice from current catalog data and one rate snapshot,
//! and queues the stock decrements. The `inventory_applied` flag commits in
//! the same transaction, so a second delivery is rejected before any effect
//! is produced.

use crate::orders::invoice::{InvoiceAdjustments, build_invoice, synthesize_line};
use crate::orders::money::{validate_adjustment, validate_payment};
use crate::orders::settlement::{
    ensure_open, ledger_credit, payment_status_after_payment, recompute_totals,
};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, Effect, OrderError};
use rust_decimal::Decimal;
use shared::models::LedgerCategory;
use shared::order::{DeliverRequest, DeliveryResult, OrderStatus, PaymentKind, PaymentRecord};

/// DeliverOrder action
#[derive(Debug, Clone)]
pub struct DeliverOrderAction {
    pub order_id: String,
    pub request: DeliverRequest,
}

impl CommandHandler for DeliverOrderAction {
    type Output = DeliveryResult;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<DeliveryResult, OrderError> {
        // 1. Validate inputs
        if let Some(payment) = &self.request.final_payment {
            validate_payment(payment)?;
        }
        validate_adjustment(self.request.tax, "tax")?;
        validate_adjustment(self.request.discount, "discount")?;

        // 2. Load and check state
        let mut order = ctx.load_order(&self.order_id)?;
        ensure_open(&order)?;

        // 3. Final payment
        if let Some(payment) = &self.request.final_payment {
            if order.remaining_amount <= Decimal::ZERO {
                return Err(OrderError::AlreadySettled(order.order_number.clone()));
            }
            let record = PaymentRecord {
                payment_id: uuid::Uuid::new_v4().to_string(),
                amount: payment.amount,
                method: payment.method,
                kind: PaymentKind::Final,
                note: payment.note.clone(),
                timestamp: metadata.timestamp,
            };
            let entry = ledger_credit(
                &order,
                LedgerCategory::OrderFinalSettlement,
                &record,
                &metadata.operator_name,
            );
            order.payments.push(record);
            recompute_totals(&mut order);
            ctx.push_effect(Effect::Ledger(entry));
        }
        order.payment_status = payment_status_after_payment(&order);

        // 4. Invoice lines share one rate snapshot
        let rates = ctx.rates();
        let mut lines = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let catalog = item.catalog_id().and_then(|id| ctx.catalog_item(id));
            if let (Some(catalog_id), None) = (item.catalog_id(), &catalog) {
                tracing::warn!(
                    order_id = %order.order_id,
                    item_id = %item.item_id,
                    catalog_id = %catalog_id,
                    "Catalog record missing at delivery, line cost degrades to zero"
                );
            }
            lines.push(synthesize_line(item, catalog.as_ref(), rates.as_ref()));
        }

        // 5. Mark delivered
        order.status = OrderStatus::Delivered;
        order.is_delivered = true;
        order.inventory_applied = true;
        order.actual_delivery_date = Some(metadata.timestamp);
        order.updated_at = metadata.timestamp;

        let adjustments = InvoiceAdjustments {
            tax: self.request.tax.unwrap_or(Decimal::ZERO),
            discount: self.request.discount.unwrap_or(Decimal::ZERO),
        };
        let invoice = build_invoice(
            &order,
            lines,
            rates,
            adjustments,
            uuid::Uuid::new_v4().to_string(),
            ctx.next_invoice_number(metadata.timestamp)?,
            metadata.timestamp,
        );
        order.invoice_id = Some(invoice.invoice_id.clone());

        // 6. Stock leaves the shelf once, after commit
        for item in &order.items {
            if let Some(catalog_id) = item.catalog_id() {
                ctx.push_effect(Effect::DecrementStock {
                    catalog_id: catalog_id.to_string(),
                    quantity: item.quantity,
                    order_id: order.order_id.clone(),
                    order_number: order.order_number.clone(),
                });
            }
        }

        ctx.save_order(&order)?;
        ctx.save_invoice(&invoice)?;

        tracing::info!(
            order_id = %order.order_id,
            invoice_number = %invoice.invoice_number,
            invoice_total = %invoice.total,
            due = %invoice.due_amount,
            "Order delivered"
        );

        Ok(DeliveryResult { order, invoice })
    }
}
