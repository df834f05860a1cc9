//! Ingestion pipeline
//!
//! Pages the full resale transaction dataset out of the upstream open-data
//! API, normalises it, mirrors it into the durable store (best effort) and
//! installs the result into the aggregation engine in one atomic swap.
//!
//! The pipeline never mutates in-memory state on a failed fetch: the old
//! index stays authoritative and the next scheduled tick retries.

pub mod pipeline;
pub mod scheduler;
pub mod sink;
pub mod source;

pub use pipeline::{RefreshError, RefreshReport, Refresher};
pub use sink::{SinkError, TransactionSink};
pub use source::{DataGovClient, FetchError, ResaleSource};
