//! CSV serialization of transaction listings
//!
//! Fields are comma-joined with no quoting or escaping; the upstream data
//! carries no commas in its text fields (accepted simplification). Optional
//! fields render as empty cells.

use std::sync::Arc;

use types::transaction::Transaction;

const HEADER: &str = "Month,Town,Flat Type,Block,Street,Storey Range,Floor Area (sqm),PSF (SGD),Resale Price (SGD),Flat Model,Lease Commence,Remaining Lease";

/// Render transactions as CSV, one line per record, header first.
pub fn to_csv(transactions: &[Arc<Transaction>]) -> String {
    let mut out = String::with_capacity(64 + transactions.len() * 96);
    out.push_str(HEADER);

    for t in transactions {
        out.push('\n');
        out.push_str(&row(t));
    }

    out
}

fn row(t: &Transaction) -> String {
    format!(
        "{},{},{},{},{},{},{},{:.2},{},{},{},{}",
        t.month,
        t.town,
        t.flat_type,
        t.block.as_deref().unwrap_or(""),
        t.street_name.as_deref().unwrap_or(""),
        t.storey_range.as_deref().unwrap_or(""),
        t.floor_area_sqm,
        t.psf,
        t.resale_price,
        t.flat_model.as_deref().unwrap_or(""),
        t.lease_commence_date.as_deref().unwrap_or(""),
        t.remaining_lease.as_deref().unwrap_or(""),
    )
}
