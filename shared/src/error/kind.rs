//! Coarse error kinds surfaced to callers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind shared by every order operation
///
/// Each [`ErrorCode`](super::ErrorCode) maps onto exactly one kind; clients
/// that do not care about the precise code can branch on the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Customer, catalog item, order, order item or invoice missing
    NotFound,
    /// Request rejected by validation before any mutation
    InvalidInput,
    /// Payment attempted on a zero-balance order
    AlreadySettled,
    /// Mutation not allowed in the order's current state
    IllegalTransition,
    /// Anything else
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::AlreadySettled => "ALREADY_SETTLED",
            ErrorKind::IllegalTransition => "ILLEGAL_TRANSITION",
            ErrorKind::Unexpected => "UNEXPECTED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
