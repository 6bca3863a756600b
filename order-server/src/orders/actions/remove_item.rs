//! RemoveItem command handler
//!
//! Removes one item from an open order. An order always keeps at least one
//! item, so the last one cannot be removed.

use crate::orders::settlement::{derive_payment_status, ensure_open, recompute_totals};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::error::ErrorCode;
use shared::order::Order;

/// RemoveItem action
#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub order_id: String,
    pub item_id: String,
}

impl CommandHandler for RemoveItemAction {
    type Output = Order;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Order, OrderError> {
        // 1. Load and check state
        let mut order = ctx.load_order(&self.order_id)?;
        ensure_open(&order)?;

        // 2. Find the item
        let index = order
            .items
            .iter()
            .position(|i| i.item_id == self.item_id)
            .ok_or_else(|| OrderError::ItemNotFound(self.item_id.clone()))?;

        if order.items.len() == 1 {
            return Err(OrderError::invalid(
                ErrorCode::OrderLastItem,
                format!("Item {} is the only item of order {}", self.item_id, order.order_number),
            ));
        }

        // 3. Remove and re-derive totals
        let removed = order.items.remove(index);
        recompute_totals(&mut order);
        order.payment_status = derive_payment_status(&order);
        order.updated_at = metadata.timestamp;

        ctx.save_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            item_id = %removed.item_id,
            item_name = %removed.name(),
            total = %order.total_amount,
            "Order item removed"
        );

        Ok(order)
    }
}
