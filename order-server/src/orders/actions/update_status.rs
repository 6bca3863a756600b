//! UpdateStatus command handler
//!
//! Generic status change. DELIVERED is only reachable through delivery, and
//! cancelling does not refund or restock.

use crate::orders::settlement::ensure_status_transition;
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, OrderError};
use shared::order::{Order, OrderStatus};

/// UpdateStatus action
#[derive(Debug, Clone)]
pub struct UpdateStatusAction {
    pub order_id: String,
    pub status: OrderStatus,
}

impl CommandHandler for UpdateStatusAction {
    type Output = Order;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Order, OrderError> {
        let mut order = ctx.load_order(&self.order_id)?;
        ensure_status_transition(order.status, self.status)?;

        let previous = order.status;
        order.status = self.status;
        order.updated_at = metadata.timestamp;
        ctx.save_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            from = %previous,
            to = %self.status,
            operator = %metadata.operator_name,
            "Order status updated"
        );

        Ok(order)
    }
}
