//! Reference data seed (`WORK_DIR/seed.json`)
//!
//! ```json
//! { "customers": [...], "catalog": [...], "rates": { "rate_18k": "5200", ... } }
//! ```

use serde::Deserialize;
use shared::models::{CatalogItem, Customer, ReferenceRates};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub catalog: Vec<CatalogItem>,
    #[serde(default)]
    pub rates: Option<ReferenceRates>,
}

impl SeedData {
    /// Load the seed file; a missing file is an empty seed
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No seed file, starting with empty reference data");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        tracing::info!(
            customers = seed.customers.len(),
            catalog = seed.catalog.len(),
            has_rates = seed.rates.is_some(),
            "Seed data loaded"
        );
        Ok(seed)
    }
}
