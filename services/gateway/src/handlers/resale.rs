//! Resale data endpoints: summary, single-area metrics, listing, CSV
//! export, cache status, and the manual refresh trigger.
//!
//! Tier gating happens here, never in the engine: the engine always
//! computes full results, and this layer locks parameters or strips fields
//! for lower tiers.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::{error, info};

use analytics::{AreaMetricsResult, AreaSummary, CacheStatus, ListRequest, TransactionPage};
use types::query::{FlatTypeFilter, GeoLevel, Period};

use crate::auth::{AuthenticatedUser, Tier};
use crate::error::ApiError;
use crate::models::{AreaParams, ListParams, SummaryParams};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

/// Free-tier requests are locked to the default view regardless of the
/// requested parameters; paying tiers get what they asked for.
fn effective_filters(
    tier: Tier,
    level: Option<&str>,
    period: Option<&str>,
    flat_type: Option<&str>,
) -> (GeoLevel, Period, FlatTypeFilter) {
    if tier == Tier::Free {
        (GeoLevel::PlanningArea, Period::TwelveMonths, FlatTypeFilter::All)
    } else {
        (
            GeoLevel::parse(level),
            Period::parse(period),
            FlatTypeFilter::parse(flat_type),
        )
    }
}

fn required_area(area: Option<String>) -> Result<String, ApiError> {
    area.map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing required query parameter: area".into()))
}

/// `GET /api/hdb/metrics/summary` — bulk summary for the heatmap. Public.
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Json<Vec<AreaSummary>> {
    let level = GeoLevel::parse(params.level.as_deref());
    let period = Period::parse(params.period.as_deref());
    Json(state
        .engine
        .summary_metrics(level, period, &FlatTypeFilter::All))
}

/// `GET /api/hdb/metrics` — metrics and transactions for one area.
pub async fn metrics(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<AreaParams>,
) -> Result<Json<AreaMetricsResult>, ApiError> {
    let area = required_area(params.area)?;
    let (level, period, flat_type) = effective_filters(
        user.tier,
        params.level.as_deref(),
        params.period.as_deref(),
        params.flat_type.as_deref(),
    );

    let mut result = state.engine.area_metrics(level, &area, period, &flat_type);

    // Free tier: strip the comparative metrics, keep a 3-row teaser
    if user.tier == Tier::Free {
        result.metrics.yoy_change = None;
        result.metrics.vs_5yr_avg = None;
        result.transactions.truncate(3);
    }

    Ok(Json(result))
}

/// `GET /api/hdb/transactions` — paginated listing. Pro and above.
pub async fn transactions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<Json<TransactionPage>, ApiError> {
    user.require(Tier::Pro)?;
    let area = required_area(params.area)?;

    let page = state.engine.list_transactions(&ListRequest {
        level: GeoLevel::parse(params.level.as_deref()),
        area,
        period: Period::parse(params.period.as_deref()),
        flat_type: FlatTypeFilter::parse(params.flat_type.as_deref()),
        page: params.page.unwrap_or(1),
        page_size: params.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE),
    });

    Ok(Json(page))
}

/// `GET /api/hdb/export` — CSV download. Pro and above.
pub async fn export(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<AreaParams>,
) -> Result<impl IntoResponse, ApiError> {
    user.require(Tier::Pro)?;
    let area = required_area(params.area)?;

    let level = GeoLevel::parse(params.level.as_deref());
    let period = Period::parse(params.period.as_deref());
    let flat_type = FlatTypeFilter::parse(params.flat_type.as_deref());

    let csv = state.engine.export_csv(level, &area, period, &flat_type);

    let filename = format!(
        "hdb_transactions_{}_{}_{}.csv",
        area.split_whitespace().collect::<Vec<_>>().join("_"),
        level.as_str(),
        period.as_str(),
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

/// `GET /api/hdb/status` — cache freshness report.
pub async fn status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Json<CacheStatus> {
    Json(state.engine.cache_status())
}

/// `POST /api/hdb/refresh` — manual refresh, guarded by the service key.
///
/// Responds immediately; the pipeline runs on a spawned task and its
/// outcome is observable through the status endpoint.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let authorized = match (&state.config.service_key, headers.get(header::AUTHORIZATION)) {
        (Some(key), Some(value)) => {
            value.to_str().map(|v| v == format!("Bearer {key}")).unwrap_or(false)
        }
        _ => false,
    };
    if !authorized {
        return Err(ApiError::Unauthorized("Unauthorized".into()));
    }

    let refresher = state.refresher.clone();
    tokio::spawn(async move {
        match refresher.refresh().await {
            Ok(report) => info!(
                count = report.accepted,
                rejected = report.rejected,
                "Manual refresh completed"
            ),
            Err(err) => error!(error = %err, "Manual refresh failed"),
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({"message": "Data refresh started", "status": "in_progress"})),
    ))
}
