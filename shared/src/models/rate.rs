//! Reference metal rates by purity

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Purity buckets the reference table is keyed by
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PurityBucket {
    #[serde(rename = "18K")]
    K18,
    #[serde(rename = "22K")]
    K22,
    #[serde(rename = "24K")]
    K24,
}

impl PurityBucket {
    /// Classify a declared purity label
    ///
    /// Whitespace is stripped and the comparison ignores ASCII case, so
    /// `" 18 k"` is 18K. Anything unrecognized (including no label) is 22K.
    pub fn classify(purity: Option<&str>) -> Self {
        let normalized: String = purity
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "18K" => Self::K18,
            "24K" => Self::K24,
            _ => Self::K22,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::K18 => "18K",
            Self::K22 => "22K",
            Self::K24 => "24K",
        }
    }
}

/// Latest published per-gram rates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceRates {
    #[serde(default)]
    pub rate_18k: Decimal,
    #[serde(default)]
    pub rate_22k: Decimal,
    #[serde(default)]
    pub rate_24k: Decimal,
    /// Publication time (millis)
    #[serde(default)]
    pub updated_at: i64,
}

impl ReferenceRates {
    pub fn for_bucket(&self, bucket: PurityBucket) -> Decimal {
        match bucket {
            PurityBucket::K18 => self.rate_18k,
            PurityBucket::K22 => self.rate_22k,
            PurityBucket::K24 => self.rate_24k,
        }
    }
}
