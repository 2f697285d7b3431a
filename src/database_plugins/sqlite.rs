// ABOUTME: SQLite record store implementation using sqlx
// ABOUTME: Records are kept as JSON documents keyed by user, day, and timestamp
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` record store
//!
//! Each record type lives in its own table. The record body is stored as a
//! JSON document so new profile fields do not need a schema migration; the
//! key columns (`user_id`, `date`, `recorded_at`) are real columns so lookups
//! and upserts stay indexed.

use super::ProfileStore;
use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Row, Sqlite, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;
use vitalis_core::models::{
    BodyMeasurementEntry, DailyGoalsRecord, MetricBounds, ProfileRecord, ProgressBaselines,
    ProgressMetric, ProgressTargets, WeightEntry,
};

/// Table and JSON field holding a metric's value
const fn metric_column(metric: ProgressMetric) -> (&'static str, &'static str) {
    match metric {
        ProgressMetric::Weight => ("weight_entries", "weight_kg"),
        ProgressMetric::BodyFat => ("weight_entries", "body_fat_percentage"),
        ProgressMetric::Muscle => ("weight_entries", "muscle_percentage"),
        ProgressMetric::Belly => ("body_measurements", "waist_cm"),
    }
}

/// Connection string with create-if-missing mode for file databases
fn connection_url(database_url: &str) -> String {
    if !database_url.starts_with("sqlite:") || database_url.contains(":memory:") {
        return database_url.to_owned();
    }
    if database_url.contains("mode=") {
        return database_url.to_owned();
    }
    let separator = if database_url.contains('?') { '&' } else { '?' };
    format!("{database_url}{separator}mode=rwc")
}

/// `SQLite`-backed record store
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Connect and run migrations
    ///
    /// File databases are created if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the connection or a migration fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let pool = SqlitePool::connect(&connection_url(database_url)).await?;
        let store = Self { pool };
        store.migrate().await?;

        info!(database_url, "SQLite record store ready");
        Ok(store)
    }

    /// Get a reference to the connection pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create every table the store uses
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at DATETIME NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_goals (
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at DATETIME NOT NULL,
                UNIQUE(user_id, date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weight_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                recorded_at DATETIME NOT NULL,
                data TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS body_measurements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                recorded_at DATETIME NOT NULL,
                data TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_weight_entries_user_time ON weight_entries(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_body_measurements_user_time ON body_measurements(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS progress_records (
                user_id TEXT NOT NULL,
                kind TEXT NOT NULL CHECK (kind IN ('baselines', 'targets')),
                data TEXT NOT NULL,
                updated_at DATETIME NOT NULL,
                UNIQUE(user_id, kind)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        debug!("SQLite record store migrations applied");
        Ok(())
    }

    // ================================
    // Row helpers
    // ================================

    fn decode<T: DeserializeOwned>(row: &SqliteRow) -> AppResult<T> {
        let data: String = row.try_get("data")?;
        Ok(serde_json::from_str(&data)?)
    }

    async fn upsert_progress_record<T: Serialize + Sync>(
        &self,
        user_id: Uuid,
        kind: &str,
        record: &T,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO progress_records (user_id, kind, data, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, kind)
            DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(kind)
        .bind(serde_json::to_string(record)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_progress_record<T: DeserializeOwned + Default>(
        &self,
        user_id: Uuid,
        kind: &str,
    ) -> AppResult<T> {
        let row = sqlx::query("SELECT data FROM progress_records WHERE user_id = $1 AND kind = $2")
            .bind(user_id.to_string())
            .bind(kind)
            .fetch_optional(&self.pool)
            .await?;

        row.map_or_else(|| Ok(T::default()), |row| Self::decode(&row))
    }

    async fn metric_value(
        &self,
        user_id: Uuid,
        metric: ProgressMetric,
        order: &str,
    ) -> AppResult<Option<f64>> {
        let (table, field) = metric_column(metric);
        let value: Option<f64> = sqlx::query_scalar(&format!(
            r"
            SELECT CAST(json_extract(data, '$.{field}') AS REAL)
            FROM {table}
            WHERE user_id = $1 AND json_extract(data, '$.{field}') IS NOT NULL
            ORDER BY recorded_at {order}, id {order}
            LIMIT 1
            "
        ))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }
}

#[async_trait]
impl ProfileStore for SqliteStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>> {
        let row = sqlx::query("SELECT data FROM profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn put_profile(&self, record: &ProfileRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO profiles (user_id, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(record.user_id.to_string())
        .bind(serde_json::to_string(record)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_daily_goals(&self, record: &DailyGoalsRecord) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO daily_goals (user_id, date, data, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, date)
            DO UPDATE SET
                data = EXCLUDED.data,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(record.user_id.to_string())
        .bind(record.date.to_string())
        .bind(serde_json::to_string(record)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_daily_goals(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyGoalsRecord>> {
        let row = sqlx::query("SELECT data FROM daily_goals WHERE user_id = $1 AND date = $2")
            .bind(user_id.to_string())
            .bind(date.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn add_weight_entry(&self, entry: &WeightEntry) -> AppResult<()> {
        sqlx::query("INSERT INTO weight_entries (user_id, recorded_at, data) VALUES ($1, $2, $3)")
            .bind(entry.user_id.to_string())
            .bind(entry.recorded_at)
            .bind(serde_json::to_string(entry)?)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_body_measurement(&self, entry: &BodyMeasurementEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO body_measurements (user_id, recorded_at, data) VALUES ($1, $2, $3)",
        )
        .bind(entry.user_id.to_string())
        .bind(entry.recorded_at)
        .bind(serde_json::to_string(entry)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn metric_bounds(
        &self,
        user_id: Uuid,
        metric: ProgressMetric,
    ) -> AppResult<MetricBounds> {
        Ok(MetricBounds {
            earliest: self.metric_value(user_id, metric, "ASC").await?,
            latest: self.metric_value(user_id, metric, "DESC").await?,
        })
    }

    async fn get_progress_baselines(&self, user_id: Uuid) -> AppResult<ProgressBaselines> {
        self.get_progress_record(user_id, "baselines").await
    }

    async fn put_progress_baselines(
        &self,
        user_id: Uuid,
        baselines: &ProgressBaselines,
    ) -> AppResult<()> {
        self.upsert_progress_record(user_id, "baselines", baselines)
            .await
    }

    async fn get_progress_targets(&self, user_id: Uuid) -> AppResult<ProgressTargets> {
        self.get_progress_record(user_id, "targets").await
    }

    async fn put_progress_targets(
        &self,
        user_id: Uuid,
        targets: &ProgressTargets,
    ) -> AppResult<()> {
        self.upsert_progress_record(user_id, "targets", targets)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, ErrorCode};
    use chrono::{Duration, TimeZone};
    use sqlx::Error as SqlxError;

    async fn memory_store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_profile_upsert_replaces_row() {
        let store = memory_store().await;
        let user_id = Uuid::new_v4();

        let mut record = ProfileRecord::empty(user_id);
        record.weight = Some(80.0);
        store.put_profile(&record).await.unwrap();

        record.weight = Some(79.5);
        store.put_profile(&record).await.unwrap();

        let loaded = store.get_profile(user_id).await.unwrap().unwrap();
        assert_eq!(loaded.weight, Some(79.5));
        assert!(store.get_profile(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_weight_bounds_follow_recorded_at() {
        let store = memory_store().await;
        let user_id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();

        // Inserted out of order on purpose
        for (offset, weight) in [(10, 78.0), (0, 82.0), (20, 76.5)] {
            store
                .add_weight_entry(&WeightEntry {
                    user_id,
                    recorded_at: start + Duration::days(offset),
                    weight_kg: weight,
                    body_fat_percentage: None,
                    muscle_percentage: None,
                })
                .await
                .unwrap();
        }

        let bounds = store
            .metric_bounds(user_id, ProgressMetric::Weight)
            .await
            .unwrap();
        assert_eq!(bounds.earliest, Some(82.0));
        assert_eq!(bounds.latest, Some(76.5));
        assert_eq!(
            store
                .metric_bounds(user_id, ProgressMetric::BodyFat)
                .await
                .unwrap(),
            MetricBounds::default()
        );
    }

    #[tokio::test]
    async fn test_missing_progress_records_default_to_empty() {
        let store = memory_store().await;
        let user_id = Uuid::new_v4();

        assert_eq!(
            store.get_progress_baselines(user_id).await.unwrap(),
            ProgressBaselines::default()
        );

        let targets = ProgressTargets {
            belly: Some(85.0),
            ..ProgressTargets::default()
        };
        store.put_progress_targets(user_id, &targets).await.unwrap();
        assert_eq!(store.get_progress_targets(user_id).await.unwrap(), targets);
    }

    #[tokio::test]
    async fn test_metric_bounds_only_count_entries_carrying_the_metric() {
        let store = memory_store().await;
        let user_id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();

        for (offset, weight, body_fat) in [
            (0, 92.0, None),
            (10, 91.0, Some(28.0)),
            (50, 88.0, Some(24.0)),
            (60, 87.5, None),
        ] {
            store
                .add_weight_entry(&WeightEntry {
                    user_id,
                    recorded_at: start + Duration::days(offset),
                    weight_kg: weight,
                    body_fat_percentage: body_fat,
                    muscle_percentage: None,
                })
                .await
                .unwrap();
        }
        store
            .add_body_measurement(&BodyMeasurementEntry {
                user_id,
                recorded_at: start,
                waist_cm: None,
            })
            .await
            .unwrap();

        let body_fat = store
            .metric_bounds(user_id, ProgressMetric::BodyFat)
            .await
            .unwrap();
        assert_eq!(body_fat.earliest, Some(28.0));
        assert_eq!(body_fat.latest, Some(24.0));

        let weight = store
            .metric_bounds(user_id, ProgressMetric::Weight)
            .await
            .unwrap();
        assert_eq!(weight.latest, Some(87.5));

        let belly = store
            .metric_bounds(user_id, ProgressMetric::Belly)
            .await
            .unwrap();
        assert_eq!(belly, MetricBounds::default());
    }

    #[test]
    fn test_sqlx_errors_map_to_error_codes() {
        assert_eq!(
            AppError::from(SqlxError::RowNotFound).code,
            ErrorCode::ResourceNotFound
        );
        assert_eq!(
            AppError::from(SqlxError::PoolClosed).code,
            ErrorCode::StorageError
        );
    }

    #[test]
    fn test_connection_url_appends_create_mode() {
        assert_eq!(connection_url("sqlite:./vitalis.db"), "sqlite:./vitalis.db?mode=rwc");
        assert_eq!(
            connection_url("sqlite:./vitalis.db?cache=shared"),
            "sqlite:./vitalis.db?cache=shared&mode=rwc"
        );
        assert_eq!(
            connection_url("sqlite:./vitalis.db?mode=ro"),
            "sqlite:./vitalis.db?mode=ro"
        );
        assert_eq!(connection_url("sqlite::memory:"), "sqlite::memory:");
    }
}
