//! Small statistics helpers over decimal series
//!
//! Mean, median, and percentage change — the only statistics this system
//! computes. All arithmetic stays in `Decimal`.

use rust_decimal::Decimal;
use types::transaction::round2;

/// Arithmetic mean, unrounded. Zero for an empty slice.
pub fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len())
}

/// Median: middle value for odd counts, mean of the two middle values for
/// even counts, zero for an empty slice.
pub fn median(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / Decimal::TWO
    }
}

/// Percentage change of `current` against `baseline`, rounded to 2 decimals.
///
/// `None` when the baseline is zero (no meaningful comparison).
pub fn pct_change(current: Decimal, baseline: Decimal) -> Option<Decimal> {
    if baseline.is_zero() {
        return None;
    }
    Some(round2((current - baseline) / baseline * Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn decs(values: &[i64]) -> Vec<Decimal> {
        values.iter().map(|v| Decimal::from(*v)).collect()
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&decs(&[3, 1, 2])), Decimal::from(2));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&decs(&[4, 1, 3, 2])), "2.5".parse().unwrap());
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&decs(&[600, 500, 700])), Decimal::from(600));
        assert_eq!(mean(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_pct_change() {
        // current 600 vs prior 500 -> +20.0%
        assert_eq!(
            pct_change(Decimal::from(600), Decimal::from(500)),
            Some("20.00".parse().unwrap())
        );
        assert_eq!(
            pct_change(Decimal::from(450), Decimal::from(500)),
            Some("-10.00".parse().unwrap())
        );
        assert_eq!(pct_change(Decimal::from(600), Decimal::ZERO), None);
    }

    proptest! {
        #[test]
        fn prop_median_within_bounds(values in prop::collection::vec(0i64..1_000_000, 1..50)) {
            let decs: Vec<Decimal> = values.iter().map(|v| Decimal::from(*v)).collect();
            let m = median(&decs);
            let min = *decs.iter().min().unwrap();
            let max = *decs.iter().max().unwrap();
            prop_assert!(m >= min && m <= max);
        }

        #[test]
        fn prop_mean_within_bounds(values in prop::collection::vec(0i64..1_000_000, 1..50)) {
            let decs: Vec<Decimal> = values.iter().map(|v| Decimal::from(*v)).collect();
            let m = mean(&decs);
            let min = *decs.iter().min().unwrap();
            let max = *decs.iter().max().unwrap();
            prop_assert!(m >= min && m <= max);
        }
    }
}
