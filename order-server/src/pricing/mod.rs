//! Pricing Module
//!
//! Pure pricing functions shared by order recompute and invoice synthesis.

mod line_calculator;
mod rate_resolver;

pub use line_calculator::*;
pub use rate_resolver::*;
