//! Unified error codes for the order engine
//!
//! This module defines all error codes used by the order server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / settlement errors
//! - 6xxx: Catalog errors
//! - 8xxx: Customer errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

use super::kind::ErrorKind;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been delivered
    OrderAlreadyDelivered = 4003,
    /// Order has been cancelled
    OrderCancelled = 4004,
    /// Order item not found
    OrderItemNotFound = 4006,
    /// Order has no items
    OrderEmpty = 4007,
    /// The only remaining item cannot be removed
    OrderLastItem = 4008,
    /// Item is neither custom nor catalog-backed
    OrderItemMalformed = 4009,
    /// Requested status change is not allowed
    OrderIllegalTransition = 4010,
    /// Invoice not found
    InvoiceNotFound = 4101,

    // ==================== 5xxx: Payment ====================
    /// Payment amount is not valid
    PaymentInvalidAmount = 5001,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// Order balance is already zero
    OrderAlreadySettled = 5010,

    // ==================== 6xxx: Catalog ====================
    /// Catalog item not found
    CatalogItemNotFound = 6001,
    /// Catalog item has invalid pricing data
    CatalogInvalidPrice = 6002,

    // ==================== 8xxx: Customer ====================
    /// Customer not found
    CustomerNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
    /// Ledger sink unavailable
    LedgerUnavailable = 9101,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyDelivered => "Order has already been delivered",
            ErrorCode::OrderCancelled => "Order has been cancelled",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderLastItem => "Cannot remove the only item of an order",
            ErrorCode::OrderItemMalformed => "Item must be custom or reference a catalog item",
            ErrorCode::OrderIllegalTransition => "Order status transition is not allowed",
            ErrorCode::InvoiceNotFound => "Invoice not found",

            // Payment
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::OrderAlreadySettled => "Order balance is already settled",

            // Catalog
            ErrorCode::CatalogItemNotFound => "Catalog item not found",
            ErrorCode::CatalogInvalidPrice => "Catalog item has invalid pricing data",

            // Customer
            ErrorCode::CustomerNotFound => "Customer not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::LedgerUnavailable => "Ledger sink unavailable",
        }
    }

    /// Coarse error kind exposed to callers
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::NotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::OrderItemNotFound
            | ErrorCode::InvoiceNotFound
            | ErrorCode::CatalogItemNotFound
            | ErrorCode::CustomerNotFound => ErrorKind::NotFound,

            ErrorCode::OrderAlreadySettled => ErrorKind::AlreadySettled,

            ErrorCode::OrderAlreadyDelivered
            | ErrorCode::OrderCancelled
            | ErrorCode::OrderIllegalTransition => ErrorKind::IllegalTransition,

            ErrorCode::ValidationFailed
            | ErrorCode::AlreadyExists
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat
            | ErrorCode::RequiredField
            | ErrorCode::ValueOutOfRange
            | ErrorCode::OrderEmpty
            | ErrorCode::OrderLastItem
            | ErrorCode::OrderItemMalformed
            | ErrorCode::PaymentInvalidAmount
            | ErrorCode::PaymentInvalidMethod
            | ErrorCode::CatalogInvalidPrice => ErrorKind::InvalidInput,

            ErrorCode::Success
            | ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError
            | ErrorCode::LedgerUnavailable => ErrorKind::Unexpected,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4003 => Ok(ErrorCode::OrderAlreadyDelivered),
            4004 => Ok(ErrorCode::OrderCancelled),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderLastItem),
            4009 => Ok(ErrorCode::OrderItemMalformed),
            4010 => Ok(ErrorCode::OrderIllegalTransition),
            4101 => Ok(ErrorCode::InvoiceNotFound),

            // Payment
            5001 => Ok(ErrorCode::PaymentInvalidAmount),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5010 => Ok(ErrorCode::OrderAlreadySettled),

            // Catalog
            6001 => Ok(ErrorCode::CatalogItemNotFound),
            6002 => Ok(ErrorCode::CatalogInvalidPrice),

            // Customer
            8001 => Ok(ErrorCode::CustomerNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9101 => Ok(ErrorCode::LedgerUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
