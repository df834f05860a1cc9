//! User profiles
//!
//! One row per authenticated user, auto-created on first request with the
//! free tier. The tier column drives feature gating at the HTTP layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::StoreError;

const PROFILE_COLUMNS: &str = "id, email, display_name, tier, created_at";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub tier: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct ProfileStore {
    pool: PgPool,
}

impl ProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the profile for `id`, creating a free-tier row on first sight.
    pub async fn get_or_create(
        &self,
        id: &str,
        email: Option<&str>,
    ) -> Result<Profile, StoreError> {
        sqlx::query(
            "INSERT INTO profiles (id, email, tier) VALUES ($1, $2, 'free') \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(email)
        .execute(&self.pool)
        .await?;

        let profile = sqlx::query_as(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Upsert the display name, returning the fresh profile.
    pub async fn upsert_display_name(
        &self,
        id: &str,
        email: Option<&str>,
        display_name: &str,
    ) -> Result<Profile, StoreError> {
        let profile = sqlx::query_as(&format!(
            "INSERT INTO profiles (id, email, display_name, updated_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (id) DO UPDATE SET display_name = $3, updated_at = NOW() \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Administrative tier assignment, creating the profile if needed.
    pub async fn set_tier(
        &self,
        id: &str,
        email: &str,
        display_name: Option<&str>,
        tier: &str,
    ) -> Result<Profile, StoreError> {
        let profile = sqlx::query_as(&format!(
            "INSERT INTO profiles (id, email, display_name, tier, updated_at) \
             VALUES ($1, $2, $3, $4, NOW()) \
             ON CONFLICT (id) DO UPDATE SET tier = $4, display_name = $3, updated_at = NOW() \
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .bind(display_name)
        .bind(tier)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
