//! Canonical resale transaction record
//!
//! A `Transaction` is immutable once created. It is produced either by the
//! ingestion normalizer (from a raw upstream record) or by the durable-store
//! reload at cold start, and carries the derived price-per-square-foot and
//! geography tags alongside the source fields.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Conversion factor from price-per-sqm to price-per-sqft.
pub fn sqm_to_sqft() -> Decimal {
    Decimal::new(10_764, 3)
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the price per square foot from price and floor area.
///
/// `resale_price / floor_area_sqm * 10.764`, rounded to 2 decimals.
/// Callers must guarantee `floor_area_sqm > 0`.
pub fn compute_psf(resale_price: Decimal, floor_area_sqm: Decimal) -> Decimal {
    round2(resale_price / floor_area_sqm * sqm_to_sqft())
}

/// A single HDB resale transaction in canonical form.
///
/// Invariants: `floor_area_sqm > 0`, `resale_price > 0`, `psf` computed,
/// `town` uppercased/trimmed and non-empty, `planning_area == town`.
/// `district` is `None` when the town has no postal-district mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction month, `YYYY-MM`. The sortable/filterable time key.
    pub month: String,
    /// Source geography label (uppercase, trimmed).
    pub town: String,
    /// Unit-type category ("2 ROOM" .. "EXECUTIVE").
    pub flat_type: String,
    pub block: Option<String>,
    pub street_name: Option<String>,
    pub storey_range: Option<String>,
    /// Floor area in square metres. Always positive.
    pub floor_area_sqm: Decimal,
    pub flat_model: Option<String>,
    pub lease_commence_date: Option<String>,
    pub remaining_lease: Option<String>,
    /// Resale price in SGD. Always positive.
    pub resale_price: Decimal,
    /// Derived price per square foot, rounded to 2 decimals.
    pub psf: Decimal,
    /// Planning-area grouping key. Identical to `town`.
    pub planning_area: String,
    /// Postal district code ("D01".."D28"), when the town maps to one.
    pub district: Option<String>,
}

impl Transaction {
    /// The natural composite key used for durable-store dedup.
    pub fn natural_key(&self) -> (&str, &str, &str, &str, &str, &str, Decimal, Decimal) {
        (
            &self.month,
            &self.town,
            self.block.as_deref().unwrap_or(""),
            self.street_name.as_deref().unwrap_or(""),
            &self.flat_type,
            self.storey_range.as_deref().unwrap_or(""),
            self.floor_area_sqm,
            self.resale_price,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_psf_formula() {
        // 500000 / 90 * 10.764 = 59799.99999... -> 59800.00
        let psf = compute_psf(dec("500000"), dec("90"));
        assert_eq!(psf, dec("59800.00"));
    }

    #[test]
    fn test_psf_exact_division() {
        // 430000 / 100 * 10.764 = 46285.2
        let psf = compute_psf(dec("430000"), dec("100"));
        assert_eq!(psf, dec("46285.20"));
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(dec("1.005")), dec("1.01"));
        assert_eq!(round2(dec("1.004")), dec("1.00"));
        assert_eq!(round2(dec("2.5")), dec("2.50"));
    }

    #[test]
    fn test_natural_key_uses_empty_for_missing_optionals() {
        let t = Transaction {
            month: "2024-01".into(),
            town: "BEDOK".into(),
            flat_type: "4 ROOM".into(),
            block: None,
            street_name: None,
            storey_range: None,
            floor_area_sqm: dec("90"),
            flat_model: None,
            lease_commence_date: None,
            remaining_lease: None,
            resale_price: dec("500000"),
            psf: compute_psf(dec("500000"), dec("90")),
            planning_area: "BEDOK".into(),
            district: Some("D16".into()),
        };
        let key = t.natural_key();
        assert_eq!(key.2, "");
        assert_eq!(key.3, "");
    }
}
