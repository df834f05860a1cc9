//! Query vocabulary shared by the engine and the HTTP surface
//!
//! Geography level, time-window period (with its cutoff arithmetic on
//! `YYYY-MM` month keys), and the unit-type filter. Parsing is lenient by
//! contract: callers hand in free-form query-string values and get one
//! documented default back, never an error.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Geography grouping level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoLevel {
    PlanningArea,
    District,
}

impl GeoLevel {
    /// Parse a query-string value.
    ///
    /// `"district"` selects district grouping; anything else (including
    /// absent or unrecognised values) defaults to planning area.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("district") => GeoLevel::District,
            _ => GeoLevel::PlanningArea,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeoLevel::PlanningArea => "planning_area",
            GeoLevel::District => "district",
        }
    }
}

/// Time window for filtering transactions by month key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    ThreeMonths,
    SixMonths,
    TwelveMonths,
    ThreeYears,
    FiveYears,
    All,
}

impl Period {
    /// Parse a query-string value.
    ///
    /// Absent or empty values default to the 12-month window; the recognised
    /// keywords map to their windows; anything else means no lower bound.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("12m") => Period::TwelveMonths,
            Some("3m") => Period::ThreeMonths,
            Some("6m") => Period::SixMonths,
            Some("3y") => Period::ThreeYears,
            Some("5y") => Period::FiveYears,
            _ => Period::All,
        }
    }

    /// Window length in months, `None` for the unbounded period.
    fn months(&self) -> Option<u32> {
        match self {
            Period::ThreeMonths => Some(3),
            Period::SixMonths => Some(6),
            Period::TwelveMonths => Some(12),
            Period::ThreeYears => Some(36),
            Period::FiveYears => Some(60),
            Period::All => None,
        }
    }

    /// Lower-bound month key for this period relative to `today`.
    ///
    /// Transactions are included iff `month >= cutoff`; `None` means no
    /// lower bound. Month keys are zero-padded `YYYY-MM`, so plain string
    /// comparison gives chronological order.
    pub fn cutoff(&self, today: NaiveDate) -> Option<String> {
        self.months().map(|n| months_before(today, n))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::ThreeMonths => "3m",
            Period::SixMonths => "6m",
            Period::TwelveMonths => "12m",
            Period::ThreeYears => "3y",
            Period::FiveYears => "5y",
            Period::All => "all",
        }
    }
}

/// The month key `n` calendar months before `today`, truncated to `YYYY-MM`.
pub fn months_before(today: NaiveDate, n: u32) -> String {
    let total = today.year() * 12 + today.month0() as i32 - n as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) + 1;
    format!("{year:04}-{month:02}")
}

/// Unit-type filter: everything, or one flat type matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlatTypeFilter {
    All,
    Only(String),
}

impl FlatTypeFilter {
    /// Parse a query-string value. Absent, empty, or `"all"` (any case)
    /// means no filter; anything else is an exact uppercased match.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => FlatTypeFilter::All,
            Some(v) if v.eq_ignore_ascii_case("all") => FlatTypeFilter::All,
            Some(v) => FlatTypeFilter::Only(v.to_uppercase()),
        }
    }

    pub fn matches(&self, flat_type: &str) -> bool {
        match self {
            FlatTypeFilter::All => true,
            FlatTypeFilter::Only(wanted) => flat_type.eq_ignore_ascii_case(wanted),
        }
    }
}
