//! Record normalizer
//!
//! Converts one raw upstream record into a canonical `Transaction`, or
//! rejects it. Rejection is the only failure mode: malformed input never
//! propagates an error and never panics. Rejected records are counted in
//! aggregate by the ingestion pipeline, not logged individually.

use rust_decimal::Decimal;
use types::raw::RawResaleRecord;
use types::transaction::{compute_psf, Transaction};

/// Validate and convert a raw record.
///
/// Returns `None` when:
/// - `resale_price` or `floor_area_sqm` is missing, unparseable, or ≤ 0
/// - `month` is missing or empty (it is the mandatory time key)
/// - `town` is missing or empty after trimming
///
/// Otherwise derives the PSF, uppercases the town, tags the postal district
/// via the static reference, and sets `planning_area` to the town key.
pub fn normalize(raw: &RawResaleRecord) -> Option<Transaction> {
    let resale_price = raw.price().filter(|p| *p > Decimal::ZERO)?;
    let floor_area_sqm = raw.floor_area().filter(|a| *a > Decimal::ZERO)?;

    let month = raw.month.as_deref()?.trim().to_string();
    if month.is_empty() {
        return None;
    }

    let town = raw.town.as_deref().unwrap_or("").trim().to_uppercase();
    if town.is_empty() {
        return None;
    }

    let district = georef::town_to_district(&town).map(String::from);
    let psf = compute_psf(resale_price, floor_area_sqm);

    Some(Transaction {
        month,
        flat_type: raw.flat_type.as_deref().unwrap_or("").trim().to_string(),
        block: raw.block.clone(),
        street_name: raw.street_name.clone(),
        storey_range: raw.storey_range.clone(),
        floor_area_sqm,
        flat_model: raw.flat_model.clone(),
        lease_commence_date: raw.lease_commence_date.clone(),
        remaining_lease: raw.remaining_lease.clone(),
        resale_price,
        psf,
        planning_area: town.clone(),
        town,
        district,
    })
}
