//! Request, response and query shapes of the order API

use super::invoice::Invoice;
use super::item::OrderItemInput;
use super::payment::{PaymentInput, PaymentMethod};
use super::snapshot::{Order, OrderStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub advance_amount: Option<Decimal>,
    #[serde(default)]
    pub expected_delivery_date: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Method of the advance payment
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliverRequest {
    #[serde(default)]
    pub final_payment: Option<PaymentInput>,
    /// Invoice-level tax, default 0
    #[serde(default)]
    pub tax: Option<Decimal>,
    /// Invoice-level discount, default 0
    #[serde(default)]
    pub discount: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    pub order: Order,
    pub invoice: Invoice,
}

/// Filters of `listOrders`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    /// Case-insensitive match on order number, customer name/phone and item names
    #[serde(default)]
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at` (millis)
    #[serde(default)]
    pub from: Option<i64>,
    /// Inclusive upper bound on `created_at` (millis)
    #[serde(default)]
    pub to: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardMetrics {
    pub orders_today: u32,
    pub orders_this_month: u32,
    pub total_advance_outstanding: Decimal,
    pub total_remaining_balance: Decimal,
    pub near_delivery_count: u32,
    pub overdue_count: u32,
    pub status_counts: BTreeMap<String, u32>,
}
