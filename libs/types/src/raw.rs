//! Raw upstream record shape
//!
//! The open-data datastore API delivers transaction-like records with every
//! field optional, and numeric fields sometimes encoded as strings. The raw
//! record mirrors that shape verbatim; validation into a canonical
//! `Transaction` is an explicit parse-and-reject step in the normalizer.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// One record as returned by the upstream datastore API.
///
/// All fields are optional; the two price fields accept either a JSON string
/// or a JSON number.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResaleRecord {
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub flat_type: Option<String>,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub storey_range: Option<String>,
    #[serde(default)]
    pub floor_area_sqm: Option<Value>,
    #[serde(default)]
    pub flat_model: Option<String>,
    #[serde(default)]
    pub lease_commence_date: Option<String>,
    #[serde(default)]
    pub remaining_lease: Option<String>,
    #[serde(default)]
    pub resale_price: Option<Value>,
}

impl RawResaleRecord {
    /// Floor area parsed as a decimal, if present and well-formed.
    pub fn floor_area(&self) -> Option<Decimal> {
        parse_decimal(self.floor_area_sqm.as_ref())
    }

    /// Resale price parsed as a decimal, if present and well-formed.
    pub fn price(&self) -> Option<Decimal> {
        parse_decimal(self.resale_price.as_ref())
    }
}

/// Coerce a loosely-typed JSON value into a decimal.
///
/// Accepts `"512000"` and `512000` alike; anything else is `None`.
fn parse_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.to_string().parse().ok(),
        _ => None,
    }
}
