//! Per-user area watchlists
//!
//! Saved areas for the map sidebar. Unique per (user, area, level); the
//! per-tier entry cap is enforced by the HTTP layer, not here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::StoreError;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WatchlistEntry {
    pub id: i64,
    pub user_id: String,
    pub area_name: String,
    pub level: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct WatchlistStore {
    pool: PgPool,
}

impl WatchlistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All entries for a user, newest first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<WatchlistEntry>, StoreError> {
        let entries = sqlx::query_as(
            "SELECT id, user_id, area_name, level, created_at FROM watchlist \
             WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn count(&self, user_id: &str) -> Result<i64, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM watchlist WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Insert an entry; `None` when the area is already on the watchlist.
    pub async fn add(
        &self,
        user_id: &str,
        area_name: &str,
        level: &str,
    ) -> Result<Option<WatchlistEntry>, StoreError> {
        let entry = sqlx::query_as(
            "INSERT INTO watchlist (user_id, area_name, level) VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, area_name, level) DO NOTHING \
             RETURNING id, user_id, area_name, level, created_at",
        )
        .bind(user_id)
        .bind(area_name)
        .bind(level)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entry)
    }

    /// Remove an entry owned by `user_id`. Returns whether a row was
    /// deleted.
    pub async fn remove(&self, id: i64, user_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM watchlist WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
