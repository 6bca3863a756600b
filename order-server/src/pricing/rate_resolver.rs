//! Metal rate resolution
//!
//! Fallback chain, first positive value wins:
//! 1. manual rate on the item
//! 2. rate applied the last time the item was priced
//! 3. reference table value for the item's purity bucket
//! 4. reference table 22K value
//!
//! Nothing positive resolves to zero. A missing reference table is valid input.

use rust_decimal::Decimal;
use shared::models::{PurityBucket, ReferenceRates};

/// Which link of the chain produced the rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    Manual,
    Applied,
    Reference(PurityBucket),
    Fallback22K,
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRate {
    pub rate: Decimal,
    pub source: RateSource,
}

#[inline]
fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}

/// Resolve the rate and report where it came from
pub fn resolve(
    purity: Option<&str>,
    manual: Option<Decimal>,
    applied: Option<Decimal>,
    rates: Option<&ReferenceRates>,
) -> ResolvedRate {
    if let Some(rate) = positive(manual) {
        return ResolvedRate { rate, source: RateSource::Manual };
    }
    if let Some(rate) = positive(applied) {
        return ResolvedRate { rate, source: RateSource::Applied };
    }
    if let Some(table) = rates {
        let bucket = PurityBucket::classify(purity);
        if let Some(rate) = positive(Some(table.for_bucket(bucket))) {
            return ResolvedRate { rate, source: RateSource::Reference(bucket) };
        }
        if let Some(rate) = positive(Some(table.rate_22k)) {
            return ResolvedRate { rate, source: RateSource::Fallback22K };
        }
    }
    ResolvedRate {
        rate: Decimal::ZERO,
        source: RateSource::Unresolved,
    }
}

/// Resolved unit rate
#[inline]
pub fn resolve_rate(
    purity: Option<&str>,
    manual: Option<Decimal>,
    applied: Option<Decimal>,
    rates: Option<&ReferenceRates>,
) -> Decimal {
    resolve(purity, manual, applied, rates).rate
}

/// Purchase rate estimate from the reference table alone
///
/// Used when neither an override nor a catalog purchase price exists.
pub fn estimate_purchase_rate(purity: Option<&str>, rates: Option<&ReferenceRates>) -> Decimal {
    resolve_rate(purity, None, None, rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(r18: i64, r22: i64, r24: i64) -> ReferenceRates {
        ReferenceRates {
            rate_18k: Decimal::from(r18),
            rate_22k: Decimal::from(r22),
            rate_24k: Decimal::from(r24),
            updated_at: 0,
        }
    }

    #[test]
    fn test_priority_chain() {
        let rates = table(20, 30, 40);
        let d = Decimal::from;

        assert_eq!(resolve_rate(Some("22K"), Some(d(50)), Some(d(40)), Some(&rates)), d(50));
        assert_eq!(resolve_rate(Some("22K"), None, Some(d(40)), Some(&rates)), d(40));
        assert_eq!(resolve_rate(Some("22K"), None, None, Some(&rates)), d(30));
        assert_eq!(resolve_rate(Some("24K"), None, None, Some(&rates)), d(40));
        assert_eq!(resolve_rate(Some("18K"), None, None, Some(&rates)), d(20));
    }

    #[test]
    fn test_non_positive_overrides_are_skipped() {
        let rates = table(20, 30, 40);
        let resolved = resolve(
            Some("18K"),
            Some(Decimal::ZERO),
            Some(Decimal::from(-5)),
            Some(&rates),
        );
        assert_eq!(resolved.rate, Decimal::from(20));
        assert_eq!(resolved.source, RateSource::Reference(PurityBucket::K18));
    }

    #[test]
    fn test_empty_bucket_falls_back_to_22k() {
        let rates = table(0, 30, 40);
        let resolved = resolve(Some("18K"), None, None, Some(&rates));
        assert_eq!(resolved.rate, Decimal::from(30));
        assert_eq!(resolved.source, RateSource::Fallback22K);
    }

    #[test]
    fn test_unrecognized_purity_uses_22k() {
        let rates = table(20, 30, 40);
        assert_eq!(resolve_rate(Some("916"), None, None, Some(&rates)), Decimal::from(30));
        assert_eq!(resolve_rate(None, None, None, Some(&rates)), Decimal::from(30));
    }

    #[test]
    fn test_missing_table_degrades_to_zero() {
        let resolved = resolve(Some("22K"), None, None, None);
        assert_eq!(resolved.rate, Decimal::ZERO);
        assert_eq!(resolved.source, RateSource::Unresolved);

        assert_eq!(resolve_rate(None, Some(Decimal::from(7)), None, None), Decimal::from(7));
        assert_eq!(resolve_rate(Some("22K"), None, None, Some(&table(0, 0, 0))), Decimal::ZERO);
    }

    #[test]
    fn test_purchase_estimate_ignores_overrides() {
        let rates = table(20, 30, 40);
        assert_eq!(estimate_purchase_rate(Some("24K"), Some(&rates)), Decimal::from(40));
        assert_eq!(estimate_purchase_rate(Some("24K"), None), Decimal::ZERO);
    }
}
