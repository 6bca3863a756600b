//! Order items: one settlement contract, two structurally different sources

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mutable pricing overrides carried by every item
///
/// `None` means "derive it": making charge and wastage fall back to catalog
/// rules, the rate falls back through the resolver chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub making_charge: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wastage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_cost: Option<Decimal>,
    /// Value of metal the customer traded in against this line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_item_adjustment: Option<Decimal>,
    /// Rate typed in by staff; wins over everything else
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_rate: Option<Decimal>,
    /// Rate used the last time this line was priced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_rate: Option<Decimal>,
}

/// Catalog snapshot captured when the item was added
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogRef {
    pub catalog_id: String,
    pub name: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,
    /// Gross weight of one piece when the item was added
    #[serde(default)]
    pub gross_weight: Decimal,
}

/// Free-text description of a made-to-order piece
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomSpec {
    pub name: String,
    /// e.g. "10-12 g"; the first number is used as the unit weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

/// Where an item comes from
///
/// A catalog item always carries its catalog reference; a custom item never does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
    Catalog(CatalogRef),
    Custom(CustomSpec),
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Stable line identity within the order
    pub item_id: String,
    pub source: ItemSource,
    pub quantity: i32,
    /// Unit price
    pub price: Decimal,
    /// Explicit unit weight in grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
    /// Explicit purity label; catalog items fall back to the catalog's purity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purity: Option<String>,
    #[serde(default)]
    pub overrides: PricingOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OrderItem {
    pub fn name(&self) -> &str {
        match &self.source {
            ItemSource::Catalog(c) => &c.name,
            ItemSource::Custom(c) => &c.name,
        }
    }

    pub fn catalog_id(&self) -> Option<&str> {
        match &self.source {
            ItemSource::Catalog(c) => Some(&c.catalog_id),
            ItemSource::Custom(_) => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self.source, ItemSource::Custom(_))
    }

    /// Purity label used for rate resolution
    pub fn declared_purity(&self) -> Option<&str> {
        self.purity.as_deref().or(match &self.source {
            ItemSource::Catalog(c) => c.purity.as_deref(),
            ItemSource::Custom(_) => None,
        })
    }

    /// `price × quantity`
    pub fn line_amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Item as submitted by a client
///
/// The wire shape is deliberately loose (`is_custom` + optional `catalog_id`);
/// the server turns it into an [`ItemSource`] and rejects inputs that are neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub catalog_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    /// Unit price; required for custom items
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub purity: Option<String>,
    #[serde(default)]
    pub target_weight: Option<String>,
    #[serde(default)]
    pub design_reference: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub overrides: PricingOverrides,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

/// Partial update of an item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub purity: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub purchase_rate: Option<Decimal>,
    #[serde(default)]
    pub making_charge: Option<Decimal>,
    #[serde(default)]
    pub wastage: Option<Decimal>,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub other_cost: Option<Decimal>,
    #[serde(default)]
    pub old_item_adjustment: Option<Decimal>,
    #[serde(default)]
    pub manual_rate: Option<Decimal>,
    /// Re-run line pricing even if the weight did not change
    #[serde(default)]
    pub recalculate: bool,
    #[serde(default)]
    pub note: Option<String>,
}
