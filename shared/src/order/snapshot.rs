//! Order aggregate - the persisted state of one order

use super::item::OrderItem;
use super::payment::PaymentRecord;
use crate::models::CustomerSnapshot;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    PartiallyPaid,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::PartiallyPaid,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::PartiallyPaid => "PARTIALLY_PAID",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status, always derived from the payment list and the total
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    AdvancePaid,
    PartiallyPaid,
    FullPaid,
}

/// Order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub order_id: String,
    /// Human readable number, unique
    pub order_number: String,
    /// Customer contact captured at creation
    pub customer: CustomerSnapshot,
    /// Insertion order is the line order
    pub items: Vec<OrderItem>,
    /// Σ(price × quantity)
    pub total_amount: Decimal,
    /// Advance collected at creation
    pub advance_amount: Decimal,
    /// max(0, total − Σ payments)
    pub remaining_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_delivery_date: Option<i64>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    /// Append-only
    pub payments: Vec<PaymentRecord>,
    #[serde(default)]
    pub is_delivered: bool,
    /// Stock has been decremented for this order
    #[serde(default)]
    pub inventory_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    pub fn find_item(&self, item_id: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn paid_total(&self) -> Decimal {
        self.payments.iter().map(|p| p.amount).sum()
    }

    /// Open orders are neither delivered nor cancelled
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}
