//! Rate Board - latest published reference rates

use super::lookup::ReferenceRateLookup;
use parking_lot::RwLock;
use shared::models::ReferenceRates;

#[derive(Debug, Default)]
pub struct RateBoard {
    current: RwLock<Option<ReferenceRates>>,
}

impl RateBoard {
    pub fn new(initial: Option<ReferenceRates>) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    /// Replace the published table
    pub fn publish(&self, rates: ReferenceRates) {
        tracing::info!(
            rate_18k = %rates.rate_18k,
            rate_22k = %rates.rate_22k,
            rate_24k = %rates.rate_24k,
            "Reference rates published"
        );
        *self.current.write() = Some(rates);
    }
}

impl ReferenceRateLookup for RateBoard {
    fn latest(&self) -> Option<ReferenceRates> {
        self.current.read().clone()
    }
}
