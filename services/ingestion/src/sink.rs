//! Durable sink seam
//!
//! The pipeline talks to the durable mirror through this trait: an
//! idempotent bulk upsert keyed on the natural composite key, and a bounded
//! most-recent reload for cold starts. The Postgres adapter implements it;
//! tests substitute in-memory fakes.

use async_trait::async_trait;
use persistence::{StoreError, TransactionStore};
use types::transaction::Transaction;

/// Errors from the durable sink. All of them are recoverable from the
/// pipeline's point of view: persistence is best-effort.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("durable store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for SinkError {
    fn from(err: StoreError) -> Self {
        SinkError::Unavailable(err.to_string())
    }
}

/// Durable mirror of the transaction set.
#[async_trait]
pub trait TransactionSink: Send + Sync {
    /// Idempotent bulk insert; conflicts on the natural key are ignored.
    /// Returns the number of rows actually inserted.
    async fn bulk_upsert(&self, transactions: &[Transaction]) -> Result<u64, SinkError>;

    /// The most recent `limit` rows by month, for cold-start cache fill.
    async fn load_recent(&self, limit: i64) -> Result<Vec<Transaction>, SinkError>;
}

#[async_trait]
impl TransactionSink for TransactionStore {
    async fn bulk_upsert(&self, transactions: &[Transaction]) -> Result<u64, SinkError> {
        Ok(TransactionStore::bulk_upsert(self, transactions).await?)
    }

    async fn load_recent(&self, limit: i64) -> Result<Vec<Transaction>, SinkError> {
        Ok(TransactionStore::load_recent(self, limit).await?)
    }
}
