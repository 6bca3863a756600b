//! Catalog item model (inventory-backed pieces)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shop inventory record with fixed physical attributes and default pricing rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub sku: String,
    /// Declared purity label, e.g. "22K"
    #[serde(default)]
    pub purity: Option<String>,
    /// Gross weight in grams of one piece
    #[serde(default)]
    pub gross_weight: Decimal,
    /// Making charge per gram of metal
    #[serde(default)]
    pub making_charge_per_gram: Decimal,
    /// Flat making charge added once per line
    #[serde(default)]
    pub fixed_making_charge: Decimal,
    /// Wastage as a percentage of the base metal value
    #[serde(default)]
    pub wastage_percent: Decimal,
    /// Purchase rate per gram, when known
    #[serde(default)]
    pub purchase_price: Option<Decimal>,
    /// Pieces on hand (may go negative if oversold through delivery)
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Why a stock movement happened
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryReason {
    /// Stock left the shop with a delivered order
    OrderDelivery,
}

/// Append-only stock movement record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryHistoryEntry {
    pub catalog_id: String,
    /// Signed change applied to `stock_quantity`
    pub change: i32,
    /// Stock level after the change
    pub balance: i32,
    pub reason: InventoryReason,
    /// Order id the movement belongs to
    pub reference_id: String,
    /// Human-readable reference (order number)
    pub reference_label: String,
    pub timestamp: i64,
}
