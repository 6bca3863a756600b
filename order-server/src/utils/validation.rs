//! Input validation helpers
//!
//! Text length limits for free-form order fields.

use crate::orders::traits::OrderError;
use shared::error::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Item names
pub const MAX_NAME_LEN: usize = 200;

/// Order notes, item notes, payment notes, special instructions
pub const MAX_NOTE_LEN: usize = 500;

/// Short descriptors: purity, size, target weight, item type, design reference
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers (Order actions) ──────────────────────────────

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_order_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), OrderError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(OrderError::invalid(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {max_len})", v.chars().count()),
        ));
    }
    Ok(())
}
