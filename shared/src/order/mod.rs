//! Order domain types
//!
//! - Items: tagged union of catalog-backed and custom lines
//! - Payments: append-only settlement records
//! - Order: the persisted aggregate
//! - Invoice: the record synthesized at delivery

pub mod invoice;
pub mod item;
pub mod payment;
pub mod snapshot;
pub mod types;

// Re-exports
pub use invoice::{Invoice, InvoiceLine, InvoiceStatus};
pub use item::{CatalogRef, CustomSpec, ItemPatch, ItemSource, OrderItem, OrderItemInput, PricingOverrides};
pub use payment::{PaymentInput, PaymentKind, PaymentMethod, PaymentRecord};
pub use snapshot::{Order, OrderStatus, PaymentStatus};
pub use types::*;
