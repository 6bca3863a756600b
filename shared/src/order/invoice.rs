//! Sales invoice synthesized once at delivery

use crate::models::{CustomerSnapshot, ReferenceRates};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice status, derived from the due amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Partial,
    Pending,
}

/// One re-derived invoice line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceLine {
    /// Order item this line was derived from
    pub item_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub total_weight: Decimal,
    /// Resolved metal rate
    pub rate: Decimal,
    /// Purchase rate snapshot
    pub purchase_rate: Decimal,
    pub making_charge: Decimal,
    pub wastage: Decimal,
    pub other_cost: Decimal,
    pub discount: Decimal,
    pub old_item_adjustment: Decimal,
    /// Rounded line total
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub invoice_id: String,
    pub invoice_number: String,
    pub order_id: String,
    pub order_number: String,
    pub customer: CustomerSnapshot,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub due_amount: Decimal,
    /// Single method used, `MIXED` or `NONE`
    pub payment_mode: String,
    pub status: InvoiceStatus,
    /// Rate table every line was priced against
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<ReferenceRates>,
    pub created_at: i64,
}
