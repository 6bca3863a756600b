//! CreateOrder command handler
//!
//! Resolves every item to its priced representation, snapshots the customer
//! and records the advance payment.

use crate::orders::money::{validate_item_input, validate_payment_amount};
use crate::orders::settlement::{initial_payment_status, ledger_credit, recompute_totals};
use crate::orders::traits::{CommandContext, CommandHandler, CommandMetadata, Effect, OrderError};
use crate::pricing::{price_line, resolve};
use crate::utils::validation::{MAX_NOTE_LEN, validate_order_optional_text};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{CustomerSnapshot, LedgerCategory};
use shared::order::{
    CatalogRef, CreateOrderRequest, CustomSpec, ItemSource, Order, OrderItem, OrderItemInput,
    OrderStatus, PaymentKind, PaymentRecord,
};

#[derive(Debug, Clone)]
pub struct CreateOrderAction {
    pub request: CreateOrderRequest,
}

impl CreateOrderAction {
    /// Turn a loose input into a typed item
    fn resolve_item(
        ctx: &mut CommandContext<'_>,
        input: &OrderItemInput,
    ) -> Result<OrderItem, OrderError> {
        let item_id = uuid::Uuid::new_v4().to_string();

        if input.is_custom {
            let source = ItemSource::Custom(CustomSpec {
                name: input.name.clone().unwrap_or_default().trim().to_string(),
                target_weight: input.target_weight.clone(),
                design_reference: input.design_reference.clone(),
                size: input.size.clone(),
                item_type: input.item_type.clone(),
                special_instructions: input.special_instructions.clone(),
            });
            return Ok(OrderItem {
                item_id,
                source,
                quantity: input.quantity,
                price: input.price.unwrap_or(Decimal::ZERO),
                weight: input.weight,
                purity: input.purity.clone(),
                overrides: input.overrides.clone(),
                note: input.note.clone(),
            });
        }

        let Some(catalog_id) = input.catalog_id.as_deref() else {
            return Err(OrderError::invalid(
                ErrorCode::OrderItemMalformed,
                "item must be marked custom or reference a catalog item",
            ));
        };
        let catalog = ctx
            .catalog_item(catalog_id)
            .ok_or_else(|| OrderError::CatalogItemNotFound(catalog_id.to_string()))?;

        let mut item = OrderItem {
            item_id,
            source: ItemSource::Catalog(CatalogRef {
                catalog_id: catalog.id.clone(),
                name: input.name.clone().unwrap_or_else(|| catalog.name.clone()),
                sku: catalog.sku.clone(),
                purity: catalog.purity.clone(),
                gross_weight: catalog.gross_weight,
            }),
            quantity: input.quantity,
            price: Decimal::ZERO,
            weight: input.weight,
            purity: input.purity.clone(),
            overrides: input.overrides.clone(),
            note: input.note.clone(),
        };

        match input.price {
            Some(price) => item.price = price,
            None => {
                let rates = ctx.rates();
                let resolved = resolve(
                    item.declared_purity(),
                    item.overrides.manual_rate,
                    item.overrides.applied_rate,
                    rates.as_ref(),
                );
                let breakdown = price_line(&item, Some(&catalog), resolved.rate);
                if breakdown.overflowed {
                    return Err(OrderError::invalid(
                        ErrorCode::ValueOutOfRange,
                        format!(
                            "Price of catalog item {} is out of range at rate {}",
                            catalog.id, resolved.rate
                        ),
                    ));
                }
                item.price = breakdown.unit_price(item.quantity);
                item.overrides.applied_rate = Some(resolved.rate);
                tracing::debug!(
                    catalog_id = %catalog.id,
                    rate = %resolved.rate,
                    source = ?resolved.source,
                    unit_price = %item.price,
                    "Catalog item priced"
                );
            }
        }

        Ok(item)
    }
}

impl CommandHandler for CreateOrderAction {
    type Output = Order;

    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Order, OrderError> {
        let request = &self.request;

        // 1. Validate inputs before touching anything
        if request.items.is_empty() {
            return Err(OrderError::invalid(
                ErrorCode::OrderEmpty,
                "order must contain at least one item",
            ));
        }
        for input in &request.items {
            validate_item_input(input)?;
        }
        validate_order_optional_text(&request.notes, "notes", MAX_NOTE_LEN)?;
        let advance = request.advance_amount.unwrap_or(Decimal::ZERO);
        if advance != Decimal::ZERO {
            validate_payment_amount(advance)?;
        }

        // 2. Resolve customer and items
        let customer = ctx.customer(&request.customer_id)?;
        let mut items = Vec::with_capacity(request.items.len());
        for input in &request.items {
            items.push(Self::resolve_item(ctx, input)?);
        }

        // 3. Build the aggregate
        let order_number = ctx.next_order_number(metadata.timestamp)?;
        let method = request.payment_method.unwrap_or_default();
        let mut order = Order {
            order_id: uuid::Uuid::new_v4().to_string(),
            order_number,
            customer: CustomerSnapshot::from(&customer),
            items,
            total_amount: Decimal::ZERO,
            advance_amount: advance,
            remaining_amount: Decimal::ZERO,
            expected_delivery_date: request.expected_delivery_date,
            actual_delivery_date: None,
            status: OrderStatus::Pending,
            payment_status: Default::default(),
            payments: Vec::new(),
            is_delivered: false,
            inventory_applied: false,
            notes: request.notes.clone(),
            invoice_id: None,
            created_at: metadata.timestamp,
            updated_at: metadata.timestamp,
        };

        // 4. Advance payment
        if advance > Decimal::ZERO {
            let payment = PaymentRecord {
                payment_id: uuid::Uuid::new_v4().to_string(),
                amount: advance,
                method,
                kind: PaymentKind::Advance,
                note: None,
                timestamp: metadata.timestamp,
            };
            order.payments.push(payment);
        }

        recompute_totals(&mut order);
        order.payment_status = initial_payment_status(order.total_amount, advance);

        if let Some(payment) = order.payments.first() {
            let entry = ledger_credit(
                &order,
                LedgerCategory::OrderAdvance,
                payment,
                &metadata.operator_name,
            );
            ctx.push_effect(Effect::Ledger(entry));
        }

        ctx.save_order(&order)?;

        tracing::info!(
            order_id = %order.order_id,
            order_number = %order.order_number,
            total = %order.total_amount,
            advance = %advance,
            items = order.items.len(),
            "Order created"
        );

        Ok(order)
    }
}
