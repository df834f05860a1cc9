//! Refresh pipeline
//!
//! One refresh cycle: page the full dataset from the source, normalise it,
//! mirror the valid records into the durable sink (best effort), then
//! install them into the engine with a single atomic swap.
//!
//! Failure semantics:
//! - A fetch failure aborts the cycle and leaves the current index
//!   untouched.
//! - A sink failure is logged and skipped; the in-memory index is still
//!   installed from the full fetched set.
//! - Rejected records are counted in aggregate only.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use analytics::{normalize, AnalyticsEngine};
use types::transaction::Transaction;

use crate::sink::TransactionSink;
use crate::source::{FetchError, ResaleSource};

/// Records per upstream page.
pub const PAGE_SIZE: usize = 10_000;

/// Hard cap on the total records fetched in one cycle. Bounds memory and
/// time against a misbehaving or unbounded upstream.
pub const MAX_RECORDS: usize = 500_000;

/// Default row cap for the cold-start reload from the durable store.
pub const COLD_START_ROWS: i64 = 100_000;

/// Errors that abort a refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Outcome of a completed refresh cycle.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    /// Raw records fetched from upstream.
    pub fetched: usize,
    /// Records that survived normalization and were installed.
    pub accepted: usize,
    /// Records dropped by the normalizer.
    pub rejected: usize,
    /// Rows newly inserted into the durable store; `None` when the write
    /// failed and the cycle continued in-memory only.
    pub persisted: Option<u64>,
    /// Whether the safety cap cut the fetch short.
    pub truncated: bool,
    pub refreshed_at: DateTime<Utc>,
}

struct FetchBatch {
    records: Vec<types::raw::RawResaleRecord>,
    truncated: bool,
}

/// Drives refresh cycles and the cold-start cache fill.
pub struct Refresher {
    source: Arc<dyn ResaleSource>,
    sink: Arc<dyn TransactionSink>,
    engine: Arc<AnalyticsEngine>,
    page_size: usize,
    max_records: usize,
    cold_start_rows: i64,
}

impl Refresher {
    pub fn new(
        source: Arc<dyn ResaleSource>,
        sink: Arc<dyn TransactionSink>,
        engine: Arc<AnalyticsEngine>,
    ) -> Self {
        Self {
            source,
            sink,
            engine,
            page_size: PAGE_SIZE,
            max_records: MAX_RECORDS,
            cold_start_rows: COLD_START_ROWS,
        }
    }

    /// Override the paging limits and the cold-start row cap.
    pub fn with_limits(
        mut self,
        page_size: usize,
        max_records: usize,
        cold_start_rows: i64,
    ) -> Self {
        self.page_size = page_size.max(1);
        self.max_records = max_records;
        self.cold_start_rows = cold_start_rows;
        self
    }

    /// Run one full refresh cycle.
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        info!("Starting transaction data refresh");
        let started = Instant::now();

        let batch = self.fetch_all().await?;
        let fetched = batch.records.len();

        let accepted: Vec<Transaction> = batch.records.iter().filter_map(normalize).collect();
        let accepted_count = accepted.len();
        let rejected = fetched - accepted_count;
        info!(fetched, accepted = accepted_count, rejected, "Normalized upstream records");

        let persisted = match self.sink.bulk_upsert(&accepted).await {
            Ok(inserted) => {
                info!(inserted, "Mirrored transactions to the durable store");
                Some(inserted)
            }
            Err(err) => {
                warn!(error = %err, "Durable store write failed; continuing in-memory only");
                None
            }
        };

        self.engine.load_all(accepted);

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            count = accepted_count,
            "Refresh completed"
        );

        Ok(RefreshReport {
            fetched,
            accepted: accepted_count,
            rejected,
            persisted,
            truncated: batch.truncated,
            refreshed_at: Utc::now(),
        })
    }

    /// Cold-start cache fill.
    ///
    /// No-op when the engine already holds data. Otherwise reload the most
    /// recent rows from the durable store; if that store is empty or
    /// unreachable, fall back to exactly one direct refresh.
    pub async fn ensure_loaded(&self) -> Result<(), RefreshError> {
        if !self.engine.is_empty() {
            return Ok(());
        }

        info!("In-memory cache empty; reloading from the durable store");
        match self.sink.load_recent(self.cold_start_rows).await {
            Ok(rows) if !rows.is_empty() => {
                info!(rows = rows.len(), "Cache filled from the durable store");
                self.engine.load_all(rows);
                Ok(())
            }
            Ok(_) => {
                info!("Durable store empty; fetching from upstream");
                self.refresh().await.map(drop)
            }
            Err(err) => {
                warn!(error = %err, "Durable store reload failed; fetching from upstream");
                self.refresh().await.map(drop)
            }
        }
    }

    /// Page through the source until a short page, bounded by the safety cap.
    async fn fetch_all(&self) -> Result<FetchBatch, FetchError> {
        let mut records = Vec::new();
        let mut offset = 0;
        let mut truncated = false;

        loop {
            let page = self.source.fetch_page(self.page_size, offset).await?;
            let short_page = page.len() < self.page_size;
            records.extend(page);
            offset += self.page_size;

            if short_page {
                break;
            }
            if records.len() >= self.max_records {
                warn!(cap = self.max_records, "Record safety cap reached; truncating fetch");
                truncated = true;
                break;
            }
        }

        Ok(FetchBatch { records, truncated })
    }
}
