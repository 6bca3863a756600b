//! Financial ledger entries emitted on cash-affecting events

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::PaymentMethod;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerDirection {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerCategory {
    /// Advance collected when the order was placed
    OrderAdvance,
    /// Payment collected against an open order
    OrderPayment,
    /// Payment collected at delivery
    OrderFinalSettlement,
}

/// One append-only ledger line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub entry_id: String,
    pub direction: LedgerDirection,
    pub category: LedgerCategory,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub description: String,
    /// Order id the entry belongs to
    pub related_entity: String,
    pub performed_by: String,
    pub timestamp: i64,
}
