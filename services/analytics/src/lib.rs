//! Transaction Analytics Service
//!
//! Owns the in-memory resale transaction set and its derived grouped
//! indices, and answers the parametrised aggregate queries behind the map:
//! - Per-area summary metrics (average PSF, median price, volume)
//! - Single-area metrics with year-over-year and vs-5-year deltas
//! - Paginated transaction listing
//! - CSV export
//!
//! # Architecture
//!
//! ```text
//! Raw upstream records
//!        │
//!   ┌────▼─────┐
//!   │Normalizer│  ← validates, derives PSF, geo-tags
//!   └────┬─────┘
//!        │ canonical transactions
//!   ┌────▼─────┐
//!   │ load_all │  ← builds a fresh DataSet, swaps one reference
//!   └────┬─────┘
//!        │
//!   ┌────▼──────────────────────────┐
//!   │ DataSet (immutable snapshot)  │
//!   │  flat list · by area · by     │──► summary / metrics / listing / CSV
//!   │  district · refresh timestamp │
//!   └───────────────────────────────┘
//! ```
//!
//! Readers clone the snapshot `Arc` and never observe a half-built index.

pub mod engine;
pub mod export;
pub mod normalizer;
pub mod stats;

pub use engine::{
    AnalyticsEngine, AreaMetrics, AreaMetricsResult, AreaSummary, CacheStatus, ListRequest,
    Pagination, TransactionPage,
};
pub use normalizer::normalize;
