//! Aggregation engine
//!
//! Owns the live transaction set and the two parallel groupings (by planning
//! area, by postal district). The whole dataset is one immutable value behind
//! a single swappable reference: `load_all` builds a fresh `DataSet` off to
//! the side and replaces the reference, so concurrent readers always observe
//! either the fully-old or the fully-new index, never a mix.
//!
//! All query operations share the same filter semantics: an optional
//! period cutoff on the `YYYY-MM` month key and an optional case-insensitive
//! flat-type match. Unknown geography keys are not an error — they simply
//! select an empty pool.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use types::query::{months_before, FlatTypeFilter, GeoLevel, Period};
use types::transaction::{round2, Transaction};

use crate::export;
use crate::stats::{mean, median, pct_change};

/// Immutable snapshot of the transaction set and its groupings.
#[derive(Debug, Default)]
struct DataSet {
    transactions: Vec<Arc<Transaction>>,
    by_planning_area: HashMap<String, Vec<Arc<Transaction>>>,
    by_district: HashMap<String, Vec<Arc<Transaction>>>,
    last_refresh: Option<DateTime<Utc>>,
}

impl DataSet {
    fn build(transactions: Vec<Transaction>, refreshed_at: DateTime<Utc>) -> Self {
        let transactions: Vec<Arc<Transaction>> =
            transactions.into_iter().map(Arc::new).collect();

        let mut by_planning_area: HashMap<String, Vec<Arc<Transaction>>> = HashMap::new();
        let mut by_district: HashMap<String, Vec<Arc<Transaction>>> = HashMap::new();

        for t in &transactions {
            if !t.planning_area.is_empty() {
                by_planning_area
                    .entry(t.planning_area.clone())
                    .or_default()
                    .push(Arc::clone(t));
            }
            if let Some(district) = &t.district {
                by_district
                    .entry(district.clone())
                    .or_default()
                    .push(Arc::clone(t));
            }
        }

        Self {
            transactions,
            by_planning_area,
            by_district,
            last_refresh: Some(refreshed_at),
        }
    }

    fn group(&self, level: GeoLevel) -> &HashMap<String, Vec<Arc<Transaction>>> {
        match level {
            GeoLevel::PlanningArea => &self.by_planning_area,
            GeoLevel::District => &self.by_district,
        }
    }

    /// The transaction pool for one geography key. Keys are matched after
    /// uppercasing; an unknown key yields an empty pool.
    fn pool(&self, level: GeoLevel, area: &str) -> &[Arc<Transaction>] {
        self.group(level)
            .get(&area.trim().to_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Summary metrics for one geography key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaSummary {
    pub area: String,
    pub avg_psf: Decimal,
    pub median_price: Decimal,
    pub volume: usize,
}

/// Metrics block for a single area query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaMetrics {
    pub avg_psf: Decimal,
    pub median_price: Decimal,
    pub volume: usize,
    /// Percent change of the current average PSF against the 12-month window
    /// one year earlier. `None` when that window is empty.
    pub yoy_change: Option<Decimal>,
    /// Percent change of the current average PSF against the trailing
    /// 5-year average. `None` when the 5-year pool is empty.
    pub vs_5yr_avg: Option<Decimal>,
}

impl AreaMetrics {
    fn zeroed() -> Self {
        Self {
            avg_psf: Decimal::ZERO,
            median_price: Decimal::ZERO,
            volume: 0,
            yoy_change: None,
            vs_5yr_avg: None,
        }
    }
}

/// Metrics plus the matching transactions, newest month first.
#[derive(Debug, Clone, Serialize)]
pub struct AreaMetricsResult {
    pub metrics: AreaMetrics,
    pub transactions: Vec<Transaction>,
}

/// Parameters for a paginated listing query.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub level: GeoLevel,
    pub area: String,
    pub period: Period,
    pub flat_type: FlatTypeFilter,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCounts {
    pub planning_area: usize,
    pub district: usize,
}

/// Cache freshness report for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub transaction_count: usize,
    pub last_refresh: Option<DateTime<Utc>>,
    pub area_counts: AreaCounts,
}

/// The in-memory aggregation engine.
///
/// One instance per process, injected into the ingestion pipeline and the
/// HTTP layer. All methods take `&self`; interior state is a single
/// reference swap behind an `RwLock`.
pub struct AnalyticsEngine {
    current: RwLock<Arc<DataSet>>,
    today_override: Option<NaiveDate>,
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(DataSet::default())),
            today_override: None,
        }
    }

    /// Engine with a pinned reference date for deterministic period cutoffs.
    pub fn with_fixed_today(today: NaiveDate) -> Self {
        Self {
            current: RwLock::new(Arc::new(DataSet::default())),
            today_override: Some(today),
        }
    }

    fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    fn snapshot(&self) -> Arc<DataSet> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the entire in-memory set and rebuild both groupings.
    ///
    /// Builds the new dataset off to the side; the swap itself is a single
    /// reference assignment. In-flight readers keep their old snapshot.
    pub fn load_all(&self, transactions: Vec<Transaction>) {
        let dataset = Arc::new(DataSet::build(transactions, Utc::now()));
        info!(
            transactions = dataset.transactions.len(),
            planning_areas = dataset.by_planning_area.len(),
            districts = dataset.by_district.len(),
            "Transaction dataset installed"
        );
        match self.current.write() {
            Ok(mut guard) => *guard = dataset,
            Err(poisoned) => *poisoned.into_inner() = dataset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().transactions.is_empty()
    }

    pub fn transaction_count(&self) -> usize {
        self.snapshot().transactions.len()
    }

    /// Per-area summary across every geography key at `level`.
    ///
    /// Areas whose filtered pool is empty are skipped. Output is sorted by
    /// area key so responses are deterministic across rebuilds.
    pub fn summary_metrics(
        &self,
        level: GeoLevel,
        period: Period,
        flat_type: &FlatTypeFilter,
    ) -> Vec<AreaSummary> {
        let dataset = self.snapshot();
        let cutoff = period.cutoff(self.today());

        let mut summary: Vec<AreaSummary> = dataset
            .group(level)
            .iter()
            .filter_map(|(area, pool)| {
                let pool = filtered(pool, cutoff.as_deref(), flat_type);
                if pool.is_empty() {
                    return None;
                }
                let psfs: Vec<Decimal> = pool.iter().map(|t| t.psf).collect();
                let prices: Vec<Decimal> = pool.iter().map(|t| t.resale_price).collect();
                Some(AreaSummary {
                    area: area.clone(),
                    avg_psf: round2(mean(&psfs)),
                    median_price: median(&prices),
                    volume: pool.len(),
                })
            })
            .collect();

        summary.sort_by(|a, b| a.area.cmp(&b.area));
        summary
    }

    /// Metrics and matching transactions for one area.
    ///
    /// An empty filtered pool yields zeroed metrics and an empty list.
    pub fn area_metrics(
        &self,
        level: GeoLevel,
        area: &str,
        period: Period,
        flat_type: &FlatTypeFilter,
    ) -> AreaMetricsResult {
        let dataset = self.snapshot();
        let today = self.today();
        let pool = dataset.pool(level, area);

        let mut current = filtered(pool, period.cutoff(today).as_deref(), flat_type);
        if current.is_empty() {
            return AreaMetricsResult {
                metrics: AreaMetrics::zeroed(),
                transactions: Vec::new(),
            };
        }

        let psfs: Vec<Decimal> = current.iter().map(|t| t.psf).collect();
        let prices: Vec<Decimal> = current.iter().map(|t| t.resale_price).collect();
        let avg_psf = round2(mean(&psfs));

        let metrics = AreaMetrics {
            avg_psf,
            median_price: median(&prices),
            volume: current.len(),
            yoy_change: yoy_change(pool, flat_type, avg_psf, today),
            vs_5yr_avg: vs_five_year_avg(pool, flat_type, avg_psf, today),
        };

        current.sort_by(|a, b| b.month.cmp(&a.month));
        AreaMetricsResult {
            metrics,
            transactions: current.iter().map(|t| (**t).clone()).collect(),
        }
    }

    /// Filtered transactions for one area, newest month first, paginated.
    pub fn list_transactions(&self, request: &ListRequest) -> TransactionPage {
        let dataset = self.snapshot();
        let cutoff = request.period.cutoff(self.today());

        let mut all = filtered(
            dataset.pool(request.level, &request.area),
            cutoff.as_deref(),
            &request.flat_type,
        );
        all.sort_by(|a, b| b.month.cmp(&a.month));

        let total = all.len();
        let page = request.page.max(1);
        let limit = request.page_size.max(1);
        let start = (page - 1).saturating_mul(limit);

        TransactionPage {
            transactions: all
                .iter()
                .skip(start)
                .take(limit)
                .map(|t| (**t).clone())
                .collect(),
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        }
    }

    /// CSV rendition of the filtered, newest-first transaction list.
    pub fn export_csv(
        &self,
        level: GeoLevel,
        area: &str,
        period: Period,
        flat_type: &FlatTypeFilter,
    ) -> String {
        let dataset = self.snapshot();
        let cutoff = period.cutoff(self.today());

        let mut all = filtered(dataset.pool(level, area), cutoff.as_deref(), flat_type);
        all.sort_by(|a, b| b.month.cmp(&a.month));
        export::to_csv(&all)
    }

    pub fn cache_status(&self) -> CacheStatus {
        let dataset = self.snapshot();
        CacheStatus {
            transaction_count: dataset.transactions.len(),
            last_refresh: dataset.last_refresh,
            area_counts: AreaCounts {
                planning_area: dataset.by_planning_area.len(),
                district: dataset.by_district.len(),
            },
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the shared period + flat-type filter to a pool.
fn filtered(
    pool: &[Arc<Transaction>],
    cutoff: Option<&str>,
    flat_type: &FlatTypeFilter,
) -> Vec<Arc<Transaction>> {
    pool.iter()
        .filter(|t| cutoff.map_or(true, |c| t.month.as_str() >= c))
        .filter(|t| flat_type.matches(&t.flat_type))
        .cloned()
        .collect()
}

/// Mean PSF of the 12-month window exactly one year before the current one.
fn yoy_change(
    pool: &[Arc<Transaction>],
    flat_type: &FlatTypeFilter,
    current_avg: Decimal,
    today: NaiveDate,
) -> Option<Decimal> {
    let start = months_before(today, 24);
    let end = months_before(today, 12);

    let psfs: Vec<Decimal> = pool
        .iter()
        .filter(|t| t.month.as_str() >= start.as_str() && t.month.as_str() < end.as_str())
        .filter(|t| flat_type.matches(&t.flat_type))
        .map(|t| t.psf)
        .collect();

    if psfs.is_empty() {
        return None;
    }
    pct_change(current_avg, mean(&psfs))
}

/// Mean PSF of the trailing five years.
fn vs_five_year_avg(
    pool: &[Arc<Transaction>],
    flat_type: &FlatTypeFilter,
    current_avg: Decimal,
    today: NaiveDate,
) -> Option<Decimal> {
    let cutoff = months_before(today, 60);

    let psfs: Vec<Decimal> = pool
        .iter()
        .filter(|t| t.month.as_str() >= cutoff.as_str())
        .filter(|t| flat_type.matches(&t.flat_type))
        .map(|t| t.psf)
        .collect();

    if psfs.is_empty() {
        return None;
    }
    pct_change(current_avg, mean(&psfs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn tx(month: &str, town: &str, flat_type: &str, price: i64, psf: i64) -> Transaction {
        Transaction {
            month: month.to_string(),
            town: town.to_string(),
            flat_type: flat_type.to_string(),
            block: None,
            street_name: None,
            storey_range: None,
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

    fn engine_with(transactions: Vec<Transaction>) -> AnalyticsEngine {
        let engine = AnalyticsEngine::with_fixed_today(fixed_today());
        engine.load_all(transactions);
        engine
    }

    #[test]
    fn test_summary_volume_and_average() {
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500),
            tx("2024-02", "BEDOK", "4 ROOM", 600_000, 600),
            tx("2024-03", "BEDOK", "5 ROOM", 700_000, 700),
            tx("2024-03", "YISHUN", "4 ROOM", 400_000, 450),
        ]);

        let summary = engine.summary_metrics(
            GeoLevel::PlanningArea,
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );

        assert_eq!(summary.len(), 2);
        // Sorted by area key
        assert_eq!(summary[0].area, "BEDOK");
        assert_eq!(summary[0].volume, 3);
        assert_eq!(summary[0].avg_psf, Decimal::from(600));
        assert_eq!(summary[0].median_price, Decimal::from(600_000));
        assert_eq!(summary[1].area, "YISHUN");
        assert_eq!(summary[1].volume, 1);
    }

    #[test]
    fn test_summary_skips_areas_outside_period() {
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500),
            // Before the 2023-06 cutoff
            tx("2023-05", "YISHUN", "4 ROOM", 400_000, 450),
        ]);

        let summary = engine.summary_metrics(
            GeoLevel::PlanningArea,
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].area, "BEDOK");
    }

    #[test]
    fn test_period_boundary_is_inclusive() {
        let engine = engine_with(vec![
            tx("2023-06", "BEDOK", "4 ROOM", 500_000, 500),
            tx("2023-05", "BEDOK", "4 ROOM", 500_000, 500),
        ]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );
        // 2023-06 included, 2023-05 excluded
        assert_eq!(result.metrics.volume, 1);
        assert_eq!(result.transactions[0].month, "2023-06");
    }

    #[test]
    fn test_district_grouping() {
        // BISHAN and ANG MO KIO both map to D20
        let engine = engine_with(vec![
            tx("2024-01", "BISHAN", "4 ROOM", 650_000, 650),
            tx("2024-02", "ANG MO KIO", "4 ROOM", 550_000, 550),
        ]);

        let summary =
            engine.summary_metrics(GeoLevel::District, Period::TwelveMonths, &FlatTypeFilter::All);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].area, "D20");
        assert_eq!(summary[0].volume, 2);
        assert_eq!(summary[0].avg_psf, Decimal::from(600));
    }

    #[test]
    fn test_unknown_area_is_zeroed_not_error() {
        let engine = engine_with(vec![tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500)]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "ATLANTIS",
            Period::All,
            &FlatTypeFilter::All,
        );
        assert_eq!(result.metrics, AreaMetrics::zeroed());
        assert!(result.transactions.is_empty());
    }

    #[test]
    fn test_yoy_change_twenty_percent() {
        // Current window (>= 2023-06) averages 600; prior window
        // [2022-06, 2023-06) averages 500 -> +20.0%
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 600_000, 600),
            tx("2022-08", "BEDOK", "4 ROOM", 480_000, 480),
            tx("2023-02", "BEDOK", "4 ROOM", 520_000, 520),
        ]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );
        assert_eq!(result.metrics.yoy_change, Some(Decimal::from(20)));
    }

    #[test]
    fn test_yoy_none_when_prior_window_empty() {
        let engine = engine_with(vec![tx("2024-01", "BEDOK", "4 ROOM", 600_000, 600)]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );
        assert_eq!(result.metrics.yoy_change, None);
    }

    #[test]
    fn test_vs_five_year_average() {
        // 5-year pool (>= 2019-06) averages (600 + 400) / 2 = 500;
        // current average 600 -> +20.0%
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 600_000, 600),
            tx("2020-01", "BEDOK", "4 ROOM", 400_000, 400),
        ]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::TwelveMonths,
            &FlatTypeFilter::All,
        );
        assert_eq!(result.metrics.vs_5yr_avg, Some(Decimal::from(20)));
    }

    #[test]
    fn test_flat_type_filter_case_insensitive() {
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500),
            tx("2024-01", "BEDOK", "5 ROOM", 700_000, 700),
        ]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "bedok",
            Period::TwelveMonths,
            &FlatTypeFilter::parse(Some("4 room")),
        );
        assert_eq!(result.metrics.volume, 1);
        assert_eq!(result.metrics.avg_psf, Decimal::from(500));
    }

    #[test]
    fn test_transactions_sorted_newest_first() {
        let engine = engine_with(vec![
            tx("2023-08", "BEDOK", "4 ROOM", 500_000, 500),
            tx("2024-03", "BEDOK", "4 ROOM", 510_000, 510),
            tx("2023-11", "BEDOK", "4 ROOM", 505_000, 505),
        ]);

        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::All,
            &FlatTypeFilter::All,
        );
        let months: Vec<&str> = result
            .transactions
            .iter()
            .map(|t| t.month.as_str())
            .collect();
        assert_eq!(months, vec!["2024-03", "2023-11", "2023-08"]);
    }

    #[test]
    fn test_load_all_replaces_wholesale() {
        let engine = engine_with(vec![
            tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500),
            tx("2024-01", "YISHUN", "4 ROOM", 400_000, 400),
        ]);
        assert_eq!(engine.transaction_count(), 2);

        engine.load_all(vec![tx("2024-02", "PUNGGOL", "5 ROOM", 600_000, 600)]);

        let status = engine.cache_status();
        assert_eq!(status.transaction_count, 1);
        assert_eq!(status.area_counts.planning_area, 1);
        assert!(status.last_refresh.is_some());

        // The old grouping is gone entirely
        let result = engine.area_metrics(
            GeoLevel::PlanningArea,
            "BEDOK",
            Period::All,
            &FlatTypeFilter::All,
        );
        assert_eq!(result.metrics.volume, 0);
    }

    #[test]
    fn test_readers_keep_snapshot_across_swap() {
        let engine = Arc::new(engine_with(vec![tx("2024-01", "BEDOK", "4 ROOM", 500_000, 500)]));

        let snapshot = engine.snapshot();
        engine.load_all(Vec::new());

        // The pre-swap snapshot still sees the old data; new reads see none.
        assert_eq!(snapshot.transactions.len(), 1);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_empty_engine_status() {
        let engine = AnalyticsEngine::new();
        let status = engine.cache_status();
        assert_eq!(status.transaction_count, 0);
        assert_eq!(status.last_refresh, None);
        assert_eq!(status.area_counts.planning_area, 0);
    }
}
