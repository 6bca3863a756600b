//! Invoice synthesis at delivery
//!
//! Lines are re-derived from the order's items against current catalog data
//! and one shared rate table, independently of the order's snapshot prices.

use super::money::non_negative;
use super::settlement::payment_mode_label;
use crate::pricing::{estimate_purchase_rate, price_line, resolve_rate};
use rust_decimal::Decimal;
use shared::models::{CatalogItem, ReferenceRates};
use shared::order::{Invoice, InvoiceLine, InvoiceStatus, ItemSource, Order, OrderItem};

/// Invoice-level adjustments
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceAdjustments {
    pub tax: Decimal,
    pub discount: Decimal,
}

/// Re-derive one invoice line
///
/// `catalog` is the fresh catalog record, `None` if it is gone; the line's
/// catalog-derived terms then degrade to zero.
pub fn synthesize_line(
    item: &OrderItem,
    catalog: Option<&CatalogItem>,
    rates: Option<&ReferenceRates>,
) -> InvoiceLine {
    let purity = item
        .declared_purity()
        .or_else(|| catalog.and_then(|c| c.purity.as_deref()));
    let overrides = &item.overrides;

    let rate = resolve_rate(purity, overrides.manual_rate, overrides.applied_rate, rates);
    let breakdown = price_line(item, catalog, rate);
    if breakdown.overflowed {
        tracing::warn!(
            item_id = %item.item_id,
            rate = %rate,
            "Invoice line out of range, costs degraded to zero"
        );
    }

    let purchase_rate = match (&item.source, overrides.purchase_rate) {
        (_, Some(rate)) => rate,
        (ItemSource::Catalog(_), None) => catalog
            .and_then(|c| c.purchase_price)
            .unwrap_or(Decimal::ZERO),
        (ItemSource::Custom(_), None) => estimate_purchase_rate(purity, rates),
    };

    InvoiceLine {
        item_id: item.item_id.clone(),
        catalog_id: item.catalog_id().map(str::to_string),
        description: item.name().to_string(),
        quantity: item.quantity,
        total_weight: breakdown.total_weight,
        rate: breakdown.rate,
        purchase_rate,
        making_charge: breakdown.making_charge,
        wastage: breakdown.wastage,
        other_cost: breakdown.other_cost,
        discount: breakdown.discount,
        old_item_adjustment: breakdown.old_item_adjustment,
        subtotal: breakdown.line_total,
    }
}

/// Status from the due amount
pub fn invoice_status(paid: Decimal, due: Decimal) -> InvoiceStatus {
    if due <= Decimal::ZERO {
        InvoiceStatus::Paid
    } else if paid > Decimal::ZERO {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Pending
    }
}

/// Assemble the invoice from already derived lines
///
/// Paid and due come from the order's settlement state, not from the lines.
pub fn build_invoice(
    order: &Order,
    lines: Vec<InvoiceLine>,
    rates: Option<ReferenceRates>,
    adjustments: InvoiceAdjustments,
    invoice_id: String,
    invoice_number: String,
    created_at: i64,
) -> Invoice {
    let subtotal = lines
        .iter()
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.subtotal));
    let total = subtotal
        .saturating_add(adjustments.tax)
        .saturating_sub(adjustments.discount);
    let paid_amount = order.total_amount - order.remaining_amount;
    let due_amount = non_negative(order.remaining_amount);

    Invoice {
        invoice_id,
        invoice_number,
        order_id: order.order_id.clone(),
        order_number: order.order_number.clone(),
        customer: order.customer.clone(),
        lines,
        subtotal,
        tax: adjustments.tax,
        discount: adjustments.discount,
        total,
        paid_amount,
        due_amount,
        payment_mode: payment_mode_label(&order.payments),
        status: invoice_status(paid_amount, due_amount),
        rates,
        created_at,
    }
}
