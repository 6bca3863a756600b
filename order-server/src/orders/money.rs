//! Money validation and arithmetic helpers
//!
//! Values arrive as `Decimal`, so they are always finite; what is checked here
//! is sign and magnitude. Rounding lives in the pricing module.

use crate::orders::traits::OrderError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_order_optional_text,
};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::order::{ItemPatch, OrderItemInput, PaymentInput, PricingOverrides};

/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);
/// Maximum allowed unit price or pricing override
pub const MAX_PRICE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);
/// Maximum allowed quantity per item
pub const MAX_QUANTITY: i32 = 9999;

/// Ensure an optional amount is within `[0, MAX_PRICE]`
fn require_amount(value: Option<Decimal>, field_name: &str) -> Result<(), OrderError> {
    let Some(v) = value else {
        return Ok(());
    };
    if v < Decimal::ZERO {
        return Err(OrderError::invalid(
            ErrorCode::ValueOutOfRange,
            format!("{} must be non-negative, got {}", field_name, v),
        ));
    }
    if v > MAX_PRICE {
        return Err(OrderError::invalid(
            ErrorCode::ValueOutOfRange,
            format!("{} exceeds maximum allowed ({}), got {}", field_name, MAX_PRICE, v),
        ));
    }
    Ok(())
}

fn require_quantity(quantity: i32) -> Result<(), OrderError> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(OrderError::invalid(
            ErrorCode::ValueOutOfRange,
            format!("quantity must be between 1 and {}, got {}", MAX_QUANTITY, quantity),
        ));
    }
    Ok(())
}

fn validate_overrides(overrides: &PricingOverrides) -> Result<(), OrderError> {
    require_amount(overrides.purchase_rate, "purchase_rate")?;
    require_amount(overrides.making_charge, "making_charge")?;
    require_amount(overrides.wastage, "wastage")?;
    require_amount(overrides.discount, "discount")?;
    require_amount(overrides.other_cost, "other_cost")?;
    require_amount(overrides.old_item_adjustment, "old_item_adjustment")?;
    require_amount(overrides.manual_rate, "manual_rate")?;
    require_amount(overrides.applied_rate, "applied_rate")?;
    Ok(())
}

/// Validate an item input before it is resolved
pub fn validate_item_input(item: &OrderItemInput) -> Result<(), OrderError> {
    require_quantity(item.quantity)?;
    require_amount(item.price, "price")?;
    require_amount(item.weight, "weight")?;
    validate_overrides(&item.overrides)?;
    validate_order_optional_text(&item.name, "name", MAX_NAME_LEN)?;
    validate_order_optional_text(&item.note, "note", MAX_NOTE_LEN)?;
    validate_order_optional_text(&item.special_instructions, "special_instructions", MAX_NOTE_LEN)?;
    for (value, field) in [
        (&item.purity, "purity"),
        (&item.target_weight, "target_weight"),
        (&item.design_reference, "design_reference"),
        (&item.size, "size"),
        (&item.item_type, "item_type"),
    ] {
        validate_order_optional_text(value, field, MAX_SHORT_TEXT_LEN)?;
    }

    if !item.is_custom && item.catalog_id.as_deref().is_none_or(str::is_empty) {
        return Err(OrderError::invalid(
            ErrorCode::OrderItemMalformed,
            "item must be marked custom or reference a catalog item",
        ));
    }
    if item.is_custom {
        if item.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(OrderError::invalid(
                ErrorCode::RequiredField,
                "custom item requires a name",
            ));
        }
        if item.price.is_none() {
            return Err(OrderError::invalid(
                ErrorCode::RequiredField,
                "custom item requires a price",
            ));
        }
    }
    Ok(())
}

/// Validate an item patch
pub fn validate_patch(patch: &ItemPatch) -> Result<(), OrderError> {
    if let Some(q) = patch.quantity {
        require_quantity(q)?;
    }
    require_amount(patch.price, "price")?;
    require_amount(patch.weight, "weight")?;
    require_amount(patch.purchase_rate, "purchase_rate")?;
    require_amount(patch.making_charge, "making_charge")?;
    require_amount(patch.wastage, "wastage")?;
    require_amount(patch.discount, "discount")?;
    require_amount(patch.other_cost, "other_cost")?;
    require_amount(patch.old_item_adjustment, "old_item_adjustment")?;
    require_amount(patch.manual_rate, "manual_rate")?;
    validate_order_optional_text(&patch.name, "name", MAX_NAME_LEN)?;
    validate_order_optional_text(&patch.purity, "purity", MAX_SHORT_TEXT_LEN)?;
    validate_order_optional_text(&patch.note, "note", MAX_NOTE_LEN)?;
    Ok(())
}

/// Validate a PaymentInput before processing
pub fn validate_payment(payment: &PaymentInput) -> Result<(), OrderError> {
    validate_payment_amount(payment.amount)?;
    validate_order_optional_text(&payment.note, "payment note", MAX_NOTE_LEN)
}

/// Payment amounts are strictly positive and bounded
pub fn validate_payment_amount(amount: Decimal) -> Result<(), OrderError> {
    if amount <= Decimal::ZERO {
        return Err(OrderError::invalid(
            ErrorCode::PaymentInvalidAmount,
            format!("payment amount must be positive, got {}", amount),
        ));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(OrderError::invalid(
            ErrorCode::PaymentInvalidAmount,
            format!(
                "payment amount exceeds maximum allowed ({}), got {}",
                MAX_PAYMENT_AMOUNT, amount
            ),
        ));
    }
    Ok(())
}

/// Validate invoice-level adjustments at delivery
pub fn validate_adjustment(value: Option<Decimal>, field_name: &str) -> Result<(), OrderError> {
    require_amount(value, field_name)
}

/// `max(0, value)`
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorKind;

    fn custom_input() -> OrderItemInput {
        OrderItemInput {
            is_custom: true,
            name: Some("Pendant".to_string()),
            quantity: 1,
            price: Some(Decimal::from(1000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_custom_input() {
        assert!(validate_item_input(&custom_input()).is_ok());
    }

    #[test]
    fn test_malformed_input_rejected() {
        let input = OrderItemInput {
            is_custom: false,
            catalog_id: None,
            ..custom_input()
        };
        let err = validate_item_input(&input).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.code(), ErrorCode::OrderItemMalformed);

        let input = OrderItemInput {
            is_custom: false,
            catalog_id: Some(String::new()),
            ..custom_input()
        };
        assert_eq!(validate_item_input(&input).unwrap_err().code(), ErrorCode::OrderItemMalformed);
    }

    #[test]
    fn test_custom_requires_price() {
        let input = OrderItemInput {
            price: None,
            ..custom_input()
        };
        assert_eq!(validate_item_input(&input).unwrap_err().code(), ErrorCode::RequiredField);
    }

    #[test]
    fn test_quantity_bounds() {
        for quantity in [0, -1, MAX_QUANTITY + 1] {
            let input = OrderItemInput {
                quantity,
                ..custom_input()
            };
            assert!(validate_item_input(&input).is_err(), "quantity {}", quantity);
        }
        let input = OrderItemInput {
            quantity: MAX_QUANTITY,
            ..custom_input()
        };
        assert!(validate_item_input(&input).is_ok());
    }

    #[test]
    fn test_negative_override_rejected() {
        let mut input = custom_input();
        input.overrides.discount = Some(Decimal::from(-1));
        assert_eq!(validate_item_input(&input).unwrap_err().code(), ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_overlong_text_rejected() {
        let input = OrderItemInput {
            name: Some("x".repeat(201)),
            ..custom_input()
        };
        assert_eq!(validate_item_input(&input).unwrap_err().code(), ErrorCode::ValueOutOfRange);

        let payment = PaymentInput {
            amount: Decimal::from(100),
            method: Default::default(),
            note: Some("n".repeat(501)),
        };
        assert!(validate_payment(&payment).is_err());
    }

    #[test]
    fn test_payment_amount() {
        assert!(validate_payment_amount(Decimal::from(1)).is_ok());
        assert!(validate_payment_amount(MAX_PAYMENT_AMOUNT).is_ok());
        assert!(validate_payment_amount(Decimal::ZERO).is_err());
        assert!(validate_payment_amount(Decimal::from(-10)).is_err());
        assert!(validate_payment_amount(MAX_PAYMENT_AMOUNT + Decimal::ONE).is_err());
    }

    #[test]
    fn test_patch_validation() {
        let patch = ItemPatch {
            quantity: Some(0),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_err());
        let patch = ItemPatch {
            price: Some(Decimal::from(250)),
            ..Default::default()
        };
        assert!(validate_patch(&patch).is_ok());
    }
}
