//! ModifyItem command handler
//!
//! Applies a patch to one item of an open order and re-prices it when asked
//! to, or when its weight changed.

use crate::orders::money::validate_patch;
use crate::orders::settlement::{derive_payment_status, ensure_open, recompute_totals};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use crate::pricing::{ResolvedRate, price_line, resolve};
use shared::error::ErrorCode;
use shared::order::{ItemPatch, ItemSource, Order, OrderItem};

/// ModifyItem action
#[derive(Debug, Clone)]
pub struct ModifyItemAction {
    pub order_id: String,
    pub item_id: String,
    pub patch: ItemPatch,
}

/// Copy every field present in the patch onto the item
fn apply_patch(item: &mut OrderItem, patch: &ItemPatch) {
    if let Some(quantity) = patch.quantity {
        item.quantity = quantity;
    }
    if let Some(price) = patch.price {
        item.price = price;
    }
    if let Some(weight) = patch.weight {
        item.weight = Some(weight);
    }
    if let Some(purity) = &patch.purity {
        item.purity = Some(purity.clone());
    }
    if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        match &mut item.source {
            ItemSource::Catalog(c) => c.name = name.to_string(),
            ItemSource::Custom(c) => c.name = name.to_string(),
        }
    }
    if let Some(note) = &patch.note {
        item.note = Some(note.clone());
    }

    let overrides = &mut item.overrides;
    let fields = [
        (&mut overrides.purchase_rate, patch.purchase_rate),
        (&mut overrides.making_charge, patch.making_charge),
        (&mut overrides.wastage, patch.wastage),
        (&mut overrides.discount, patch.discount),
        (&mut overrides.other_cost, patch.other_cost),
        (&mut overrides.old_item_adjustment, patch.old_item_adjustment),
        (&mut overrides.manual_rate, patch.manual_rate),
    ];
    for (slot, value) in fields {
        if value.is_some() {
            *slot = value;
        }
    }
}

impl ModifyItemAction {
    /// Re-price one item against the current rate table
    ///
    /// Same fallback chain as delivery: manual rate, then the previously
    /// applied rate, then the reference rate for the item's purity.
    fn reprice(ctx: &mut CommandContext<'_>, item: &mut OrderItem) -> Result<(), OrderError> {
        let rates = ctx.rates();
        let catalog = item.catalog_id().and_then(|id| ctx.catalog_item(id));
        if item.catalog_id().is_some() && catalog.is_none() {
            tracing::warn!(
                item_id = %item.item_id,
                catalog_id = item.catalog_id().unwrap_or_default(),
                "Catalog record missing, re-pricing without catalog rules"
            );
        }

        let purity = item
            .declared_purity()
            .or_else(|| catalog.as_ref().and_then(|c| c.purity.as_deref()));
        let ResolvedRate { rate, source } = resolve(
            purity,
            item.overrides.manual_rate,
            item.overrides.applied_rate,
            rates.as_ref(),
        );

        let breakdown = price_line(item, catalog.as_ref(), rate);
        if breakdown.overflowed {
            return Err(OrderError::invalid(
                ErrorCode::ValueOutOfRange,
                format!("Price of item {} is out of range at rate {}", item.item_id, rate),
            ));
        }
        item.price = breakdown.unit_price(item.quantity);
        item.overrides.applied_rate = Some(rate);

        tracing::debug!(
            item_id = %item.item_id,
            rate = %rate,
            source = ?source,
            unit_price = %item.price,
            "Item re-priced"
        );
        Ok(())
    }
}

impl CommandHandler for ModifyItemAction {
    type Output = Order;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Order, OrderError> {
        // 1. Load and check state
        let mut order = ctx.load_order(&self.order_id)?;
        ensure_open(&order)?;
        validate_patch(&self.patch)?;

        // 2. Find and patch the item
        let item = order
            .items
            .iter_mut()
            .find(|i| i.item_id == self.item_id)
            .ok_or_else(|| OrderError::ItemNotFound(self.item_id.clone()))?;

        let previous_weight = item.weight;
        apply_patch(item, &self.patch);
        let weight_changed = item.weight != previous_weight;

        if self.patch.recalculate || weight_changed {
            Self::reprice(ctx, item)?;
        }

        // 3. Re-derive totals
        recompute_totals(&mut order);
        order.payment_status = derive_payment_status(&order);
        order.updated_at = metadata.timestamp;

        ctx.save_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            item_id = %self.item_id,
            total = %order.total_amount,
            remaining = %order.remaining_amount,
            "Order item updated"
        );

        Ok(order)
    }
}
