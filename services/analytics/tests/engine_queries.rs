//! End-to-end query behavior of the aggregation engine: normalization into
//! the index, pagination arithmetic, and CSV export.

use analytics::{normalize, AnalyticsEngine, ListRequest};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use types::query::{FlatTypeFilter, GeoLevel, Period};
use types::raw::RawResaleRecord;
use types::transaction::Transaction;

fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn tx(month: &str, town: &str, price: i64, psf: i64) -> Transaction {
    Transaction {
        month: month.to_string(),
        town: town.to_string(),
        flat_type: "4 ROOM".into(),
        block: Some("10".into()),
        street_name: Some("MAIN ST".into()),
        storey_range: Some("01 TO 03".into()),
        floor_area_sqm: Decimal::from(90),
        flat_model: None,
        lease_commence_date: None,
        remaining_lease: None,
        resale_price: Decimal::from(price),
        psf: Decimal::from(psf),
        planning_area: town.to_string(),
        district: georef::town_to_district(town).map(String::from),
    }
}

#[test]
fn pagination_slices_and_counts() {
    // 25 matching records across three pages of 10
    let transactions: Vec<Transaction> = (0..25)
        .map(|i| tx(&format!("2024-{:02}", (i % 5) + 1), "BEDOK", 500_000 + i, 500))
        .collect();

    let engine = AnalyticsEngine::with_fixed_today(fixed_today());
    engine.load_all(transactions);

    let page = engine.list_transactions(&ListRequest {
        level: GeoLevel::PlanningArea,
        area: "BEDOK".into(),
        period: Period::TwelveMonths,
        flat_type: FlatTypeFilter::All,
        page: 2,
        page_size: 10,
    });

    assert_eq!(page.transactions.len(), 10);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.limit, 10);
    assert_eq!(page.pagination.total, 25);
    assert_eq!(page.pagination.total_pages, 3);

    // The slice is indices 10..19 of the month-descending ordering
    let first = engine.list_transactions(&ListRequest {
        level: GeoLevel::PlanningArea,
        area: "BEDOK".into(),
        period: Period::TwelveMonths,
        flat_type: FlatTypeFilter::All,
        page: 1,
        page_size: 10,
    });
    assert!(first.transactions[9].month >= page.transactions[0].month);

    let last = engine.list_transactions(&ListRequest {
        level: GeoLevel::PlanningArea,
        area: "BEDOK".into(),
        period: Period::TwelveMonths,
        flat_type: FlatTypeFilter::All,
        page: 3,
        page_size: 10,
    });
    assert_eq!(last.transactions.len(), 5);
}

#[test]
fn page_past_the_end_is_empty() {
    let engine = AnalyticsEngine::with_fixed_today(fixed_today());
    engine.load_all(vec![tx("2024-01", "BEDOK", 500_000, 500)]);

    let page = engine.list_transactions(&ListRequest {
        level: GeoLevel::PlanningArea,
        area: "BEDOK".into(),
        period: Period::All,
        flat_type: FlatTypeFilter::All,
        page: 9,
        page_size: 50,
    });
    assert!(page.transactions.is_empty());
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.pagination.total_pages, 1);
}

#[test]
fn raw_records_flow_into_queryable_index() {
    let raws: Vec<RawResaleRecord> = vec![
        serde_json::from_value(json!({
            "month": "2024-03", "town": "Tampines", "flat_type": "4 ROOM",
            "floor_area_sqm": "93", "resale_price": "512000"
        }))
        .unwrap(),
        serde_json::from_value(json!({
            "month": "2024-04", "town": "TAMPINES", "flat_type": "5 ROOM",
            "floor_area_sqm": "110", "resale_price": "650000"
        }))
        .unwrap(),
        // Rejected: zero floor area
        serde_json::from_value(json!({
            "month": "2024-04", "town": "TAMPINES", "flat_type": "5 ROOM",
            "floor_area_sqm": "0", "resale_price": "650000"
        }))
        .unwrap(),
    ];

    let accepted: Vec<Transaction> = raws.iter().filter_map(normalize).collect();
    assert_eq!(accepted.len(), 2);

    let engine = AnalyticsEngine::with_fixed_today(fixed_today());
    engine.load_all(accepted);

    let result = engine.area_metrics(
        GeoLevel::PlanningArea,
        "TAMPINES",
        Period::TwelveMonths,
        &FlatTypeFilter::All,
    );
    assert_eq!(result.metrics.volume, 2);

    // TAMPINES maps to postal district D18
    let by_district = engine.area_metrics(
        GeoLevel::District,
        "D18",
        Period::TwelveMonths,
        &FlatTypeFilter::All,
    );
    assert_eq!(by_district.metrics.volume, 2);
}

#[test]
fn csv_export_matches_filtered_listing() {
    let engine = AnalyticsEngine::with_fixed_today(fixed_today());
    engine.load_all(vec![
        tx("2024-01", "BEDOK", 500_000, 500),
        tx("2024-03", "BEDOK", 510_000, 510),
        tx("2023-01", "BEDOK", 480_000, 480), // outside the 12m window
    ]);

    let csv = engine.export_csv(
        GeoLevel::PlanningArea,
        "BEDOK",
        Period::TwelveMonths,
        &FlatTypeFilter::All,
    );
    let lines: Vec<&str> = csv.lines().collect();

    // Header + the two in-window rows, newest month first
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Month,Town,Flat Type"));
    assert!(lines[1].starts_with("2024-03,BEDOK"));
    assert!(lines[2].starts_with("2024-01,BEDOK"));
}
