//! Transaction mirror
//!
//! Bulk upsert and bounded reload over the `resale_transactions` table.
//! Uniqueness is the natural composite key of the source dataset; conflicts
//! are ignored, which makes every refresh cycle's write idempotent.

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder};
use tracing::info;

use types::transaction::{compute_psf, Transaction};

use crate::StoreError;

/// Rows per multi-row INSERT statement.
const UPSERT_BATCH: usize = 500;

/// Postgres-backed transaction mirror.
#[derive(Clone)]
pub struct TransactionStore {
    pool: PgPool,
}

impl TransactionStore {
    /// Build a lazily-connecting store. Nothing talks to the database until
    /// the first operation, so startup never blocks on connectivity.
    pub fn connect_lazy(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy(database_url)?;
        Ok(Self { pool })
    }

    /// The shared connection pool, for the account-side stores.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create tables and indexes if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        info!("Initializing database schema");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS resale_transactions (
                id BIGSERIAL PRIMARY KEY,
                month TEXT NOT NULL,
                town TEXT NOT NULL,
                flat_type TEXT NOT NULL,
                block TEXT,
                street_name TEXT,
                storey_range TEXT,
                floor_area_sqm NUMERIC NOT NULL,
                flat_model TEXT,
                lease_commence_date TEXT,
                remaining_lease TEXT,
                resale_price NUMERIC NOT NULL,
                psf NUMERIC,
                planning_area TEXT,
                district TEXT,
                UNIQUE(month, town, block, street_name, flat_type, storey_range, floor_area_sqm, resale_price)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                id TEXT PRIMARY KEY,
                email TEXT,
                display_name TEXT,
                tier TEXT DEFAULT 'free' CHECK (tier IN ('free', 'pro', 'enterprise')),
                created_at TIMESTAMPTZ DEFAULT NOW(),
                updated_at TIMESTAMPTZ DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS watchlist (
                id BIGSERIAL PRIMARY KEY,
                user_id TEXT NOT NULL,
                area_name TEXT NOT NULL,
                level TEXT DEFAULT 'planning_area',
                created_at TIMESTAMPTZ DEFAULT NOW(),
                UNIQUE(user_id, area_name, level)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        for statement in [
            "CREATE INDEX IF NOT EXISTS idx_resale_transactions_town ON resale_transactions(town)",
            "CREATE INDEX IF NOT EXISTS idx_resale_transactions_month ON resale_transactions(month)",
            "CREATE INDEX IF NOT EXISTS idx_resale_transactions_district ON resale_transactions(district)",
            "CREATE INDEX IF NOT EXISTS idx_resale_transactions_planning_area ON resale_transactions(planning_area)",
            "CREATE INDEX IF NOT EXISTS idx_watchlist_user_id ON watchlist(user_id)",
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database schema ready");
        Ok(())
    }

    /// Idempotent bulk insert. Conflicts on the natural key are ignored;
    /// the whole write is one transaction, committed or rolled back as a
    /// unit. Returns the number of rows actually inserted.
    pub async fn bulk_upsert(&self, transactions: &[Transaction]) -> Result<u64, StoreError> {
        if transactions.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for batch in transactions.chunks(UPSERT_BATCH) {
            let mut builder = QueryBuilder::new(
                "INSERT INTO resale_transactions (month, town, flat_type, block, street_name, \
                 storey_range, floor_area_sqm, flat_model, lease_commence_date, remaining_lease, \
                 resale_price, psf, planning_area, district) ",
            );
            builder.push_values(batch, |mut row, t| {
                row.push_bind(&t.month)
                    .push_bind(&t.town)
                    .push_bind(&t.flat_type)
                    .push_bind(&t.block)
                    .push_bind(&t.street_name)
                    .push_bind(&t.storey_range)
                    .push_bind(t.floor_area_sqm)
                    .push_bind(&t.flat_model)
                    .push_bind(&t.lease_commence_date)
                    .push_bind(&t.remaining_lease)
                    .push_bind(t.resale_price)
                    .push_bind(t.psf)
                    .push_bind(&t.planning_area)
                    .push_bind(&t.district);
            });
            builder.push(
                " ON CONFLICT (month, town, block, street_name, flat_type, storey_range, \
                 floor_area_sqm, resale_price) DO NOTHING",
            );

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        info!(
            total = transactions.len(),
            inserted, "Bulk upsert committed"
        );
        Ok(inserted)
    }

    /// The most recent `limit` rows by month key, converted back to
    /// canonical transactions.
    pub async fn load_recent(&self, limit: i64) -> Result<Vec<Transaction>, StoreError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(
            "SELECT month, town, flat_type, block, street_name, storey_range, floor_area_sqm, \
             flat_model, lease_commence_date, remaining_lease, resale_price, psf, planning_area, \
             district \
             FROM resale_transactions ORDER BY month DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionRow::into_transaction).collect())
    }
}

/// Raw row shape; derived columns may be NULL in rows written by older
/// schema revisions and are re-derived on load.
#[derive(sqlx::FromRow)]
struct TransactionRow {
    month: String,
    town: String,
    flat_type: String,
    block: Option<String>,
    street_name: Option<String>,
    storey_range: Option<String>,
    floor_area_sqm: Decimal,
    flat_model: Option<String>,
    lease_commence_date: Option<String>,
    remaining_lease: Option<String>,
    resale_price: Decimal,
    psf: Option<Decimal>,
    planning_area: Option<String>,
    district: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> Transaction {
        let psf = match self.psf {
            Some(psf) => psf,
            None if self.floor_area_sqm > Decimal::ZERO => {
                compute_psf(self.resale_price, self.floor_area_sqm)
            }
            None => Decimal::ZERO,
        };
        let planning_area = self
            .planning_area
            .unwrap_or_else(|| self.town.trim().to_uppercase());
        let district = self
            .district
            .or_else(|| georef::town_to_district(&self.town).map(String::from));

        Transaction {
            month: self.month,
            town: self.town,
            flat_type: self.flat_type,
            block: self.block,
            street_name: self.street_name,
            storey_range: self.storey_range,
            floor_area_sqm: self.floor_area_sqm,
            flat_model: self.flat_model,
            lease_commence_date: self.lease_commence_date,
            remaining_lease: self.remaining_lease,
            resale_price: self.resale_price,
            psf,
            planning_area,
            district,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(psf: Option<Decimal>, planning_area: Option<&str>, district: Option<&str>) -> TransactionRow {
        TransactionRow {
            month: "2024-03".into(),
            town: "Bedok".into(),
            flat_type: "4 ROOM".into(),
            block: Some("123A".into()),
            street_name: None,
            storey_range: None,
            floor_area_sqm: Decimal::from(93),
            flat_model: None,
            lease_commence_date: None,
            remaining_lease: None,
            resale_price: Decimal::from(512_000),
            psf,
            planning_area: planning_area.map(String::from),
            district: district.map(String::from),
        }
    }

    #[test]
    fn test_row_with_derived_columns_passes_through() {
        let t = row(
            Some("59262.19".parse().unwrap()),
            Some("BEDOK"),
            Some("D16"),
        )
        .into_transaction();
        assert_eq!(t.psf, "59262.19".parse().unwrap());
        assert_eq!(t.planning_area, "BEDOK");
        assert_eq!(t.district.as_deref(), Some("D16"));
    }

    #[test]
    fn test_null_derived_columns_are_recomputed() {
        let t = row(None, None, None).into_transaction();
        assert_eq!(t.psf, compute_psf(Decimal::from(512_000), Decimal::from(93)));
        assert_eq!(t.planning_area, "BEDOK");
        assert_eq!(t.district.as_deref(), Some("D16"));
    }

    #[test]
    fn test_zero_area_row_does_not_divide() {
        let mut r = row(None, None, None);
        r.floor_area_sqm = Decimal::ZERO;
        let t = r.into_transaction();
        assert_eq!(t.psf, Decimal::ZERO);
    }
}
