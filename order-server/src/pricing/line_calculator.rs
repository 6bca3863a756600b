//! Line Pricing Calculator
//!
//! One formula for both call sites: mid-order unit price recompute and
//! invoice synthesis at delivery. Pure and infallible; missing catalog data
//! simply contributes zero and is reported by the caller. Arithmetic is
//! checked: a line whose terms overflow `Decimal` comes back zeroed with
//! `overflowed` set.
//!
//! ```text
//! unit weight  = explicit weight | catalog gross weight | first number in target weight | 0
//! total weight = unit weight × quantity
//! base         = rate × total weight
//! making       = override | per-gram × total weight + fixed (catalog) | 0
//! wastage      = override | base × wastage% / 100 (catalog) | 0
//! net          = base + making + wastage + other − discount − old item
//! line total   = round(net)
//! unit price   = round(net / quantity)
//! ```

use rust_decimal::Decimal;
use shared::models::CatalogItem;
use shared::order::{ItemSource, OrderItem};

/// Round half up to the nearest integer currency unit
#[inline]
pub fn round_currency(value: Decimal) -> Decimal {
    value
        .checked_add(Decimal::new(5, 1))
        .unwrap_or(value)
        .floor()
}

/// Every term of one line's computation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineBreakdown {
    pub unit_weight: Decimal,
    pub total_weight: Decimal,
    pub rate: Decimal,
    pub base_value: Decimal,
    pub making_charge: Decimal,
    pub wastage: Decimal,
    pub other_cost: Decimal,
    pub discount: Decimal,
    pub old_item_adjustment: Decimal,
    /// Unrounded sum
    pub net: Decimal,
    /// `round(net)`
    pub line_total: Decimal,
    /// The terms overflowed; every money field is zero
    pub overflowed: bool,
}

impl LineBreakdown {
    /// Per-unit price: the whole unrounded net divided by the quantity
    ///
    /// Catalog-derived terms (the fixed making charge included) are spread
    /// across the units exactly like the overrides, so `unit_price × quantity`
    /// stays within rounding of `line_total`.
    pub fn unit_price(&self, quantity: i32) -> Decimal {
        if quantity <= 0 {
            return self.line_total;
        }
        round_currency(self.net / Decimal::from(quantity))
    }
}

/// First contiguous decimal token of a free-text weight, e.g. "10-12 g" → 10
pub fn parse_weight_token(text: &str) -> Decimal {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return Decimal::ZERO;
    };

    let mut seen_dot = false;
    let token: String = text[start..]
        .chars()
        .take_while(|c| {
            if c.is_ascii_digit() {
                true
            } else if *c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        })
        .collect();

    token
        .trim_end_matches('.')
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

/// Effective weight of one unit
pub fn unit_weight(item: &OrderItem, catalog: Option<&CatalogItem>) -> Decimal {
    if let Some(weight) = item.weight {
        return weight;
    }
    match &item.source {
        ItemSource::Catalog(_) => catalog.map(|c| c.gross_weight).unwrap_or(Decimal::ZERO),
        ItemSource::Custom(spec) => spec
            .target_weight
            .as_deref()
            .map(parse_weight_token)
            .unwrap_or(Decimal::ZERO),
    }
}

/// Price one line against a resolved rate
///
/// `catalog` is only consulted for catalog items.
pub fn price_line(item: &OrderItem, catalog: Option<&CatalogItem>, rate: Decimal) -> LineBreakdown {
    let catalog = match item.source {
        ItemSource::Catalog(_) => catalog,
        ItemSource::Custom(_) => None,
    };
    let unit_weight = unit_weight(item, catalog);

    derive_terms(item, catalog, unit_weight, rate).unwrap_or(LineBreakdown {
        unit_weight,
        rate,
        overflowed: true,
        ..Default::default()
    })
}

/// `None` on overflow
fn derive_terms(
    item: &OrderItem,
    catalog: Option<&CatalogItem>,
    unit_weight: Decimal,
    rate: Decimal,
) -> Option<LineBreakdown> {
    let overrides = &item.overrides;

    let total_weight = unit_weight.checked_mul(Decimal::from(item.quantity))?;
    let base_value = rate.checked_mul(total_weight)?;

    let making_charge = match (overrides.making_charge, catalog) {
        (Some(v), _) => v,
        (None, Some(c)) => c
            .making_charge_per_gram
            .checked_mul(total_weight)?
            .checked_add(c.fixed_making_charge)?,
        (None, None) => Decimal::ZERO,
    };
    let wastage = match (overrides.wastage, catalog) {
        (Some(v), _) => v,
        (None, Some(c)) => base_value.checked_mul(c.wastage_percent)? / Decimal::ONE_HUNDRED,
        (None, None) => Decimal::ZERO,
    };
    let other_cost = overrides.other_cost.unwrap_or(Decimal::ZERO);
    let discount = overrides.discount.unwrap_or(Decimal::ZERO);
    let old_item_adjustment = overrides.old_item_adjustment.unwrap_or(Decimal::ZERO);

    let net = base_value
        .checked_add(making_charge)?
        .checked_add(wastage)?
        .checked_add(other_cost)?
        .checked_sub(discount)?
        .checked_sub(old_item_adjustment)?;
    let line_total = net.checked_add(Decimal::new(5, 1))?.floor();

    Some(LineBreakdown {
        unit_weight,
        total_weight,
        rate,
        base_value,
        making_charge,
        wastage,
        other_cost,
        discount,
        old_item_adjustment,
        net,
        line_total,
        overflowed: false,
    })
}
