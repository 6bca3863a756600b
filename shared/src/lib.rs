//! Shared types for the order engine
//!
//! Domain and wire types used by the server and its clients: orders, items,
//! payments, invoices, reference data and the unified error types.

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode, ErrorKind};
