//! Durable store adapter
//!
//! Postgres mirror of the in-memory transaction set plus the account-side
//! tables (profiles, watchlists). The transaction mirror is write-mostly:
//! an idempotent bulk upsert per refresh cycle and one bounded reload at
//! cold start. Queries never go through Postgres — the aggregation engine
//! answers them from memory.
//!
//! Connections are established lazily, so an unreachable database surfaces
//! per operation and never blocks process startup.

pub mod profiles;
pub mod store;
pub mod watchlist;

pub use profiles::{Profile, ProfileStore};
pub use store::TransactionStore;
pub use watchlist::{WatchlistEntry, WatchlistStore};

/// Errors from the durable store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
