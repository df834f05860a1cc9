//! Upstream data source
//!
//! The external open-data API is a paginated read-only JSON endpoint
//! returning arrays of raw transaction-like records inside a
//! `{result: {records: [...]}}` envelope. The `ResaleSource` trait is the
//! seam the pipeline fetches through; tests substitute an in-memory fake.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use types::raw::RawResaleRecord;

/// Errors from one page fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}

/// A paged source of raw resale records.
#[async_trait]
pub trait ResaleSource: Send + Sync {
    /// Fetch one page. A page shorter than `limit` signals the end of the
    /// dataset.
    async fn fetch_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RawResaleRecord>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct DatastoreEnvelope {
    #[serde(default)]
    result: Option<DatastoreResult>,
}

#[derive(Debug, Default, Deserialize)]
struct DatastoreResult {
    #[serde(default)]
    records: Vec<RawResaleRecord>,
}

/// HTTP client for the data.gov.sg datastore API.
pub struct DataGovClient {
    http: reqwest::Client,
    base_url: String,
}

impl DataGovClient {
    /// The HDB resale price dataset.
    pub const DEFAULT_BASE_URL: &'static str =
        "https://data.gov.sg/api/action/datastore_search?resource_id=d_8b84c4ee58e3cfc0ece0d773c8ca6abc";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for DataGovClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ResaleSource for DataGovClient {
    async fn fetch_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<RawResaleRecord>, FetchError> {
        let url = format!("{}&limit={limit}&offset={offset}", self.base_url);
        debug!(offset, limit, "Fetching upstream page");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let envelope: DatastoreEnvelope = response.json().await?;
        Ok(envelope.result.map(|r| r.records).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_tolerates_missing_result() {
        let envelope: DatastoreEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.result.is_none());

        let envelope: DatastoreEnvelope =
            serde_json::from_str(r#"{"result": {}}"#).unwrap();
        assert!(envelope.result.unwrap().records.is_empty());
    }

    #[test]
    fn test_envelope_parses_records() {
        let envelope: DatastoreEnvelope = serde_json::from_str(
            r#"{"result": {"records": [{"month": "2024-01", "town": "BEDOK"}]}}"#,
        )
        .unwrap();
        let records = envelope.result.unwrap().records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].month.as_deref(), Some("2024-01"));
    }
}
