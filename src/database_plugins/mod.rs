// ABOUTME: Record store abstraction for profiles, daily goals, measurements, and progress records
// ABOUTME: Plugin architecture with in-memory and SQLite backends behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Store
//!
//! The engine reads and writes plain records through [`ProfileStore`]. The
//! store owns persistence and querying; the engine only needs the simple
//! get/put/query operations below.

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;
use vitalis_core::models::{
    BodyMeasurementEntry, DailyGoalsRecord, MeasurementFeed, MetricBounds, ProfileRecord,
    ProgressBaselines, ProgressMetric, ProgressTargets, WeightEntry,
};

/// In-memory store backed by tokio `RwLock` maps
pub mod memory;
/// `SQLite` store backed by sqlx
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Record store abstraction
///
/// All implementations must be safe to share between the profile session's
/// background task and the caller.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    // ================================
    // Profiles
    // ================================

    /// Get the profile record for a user
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>>;

    /// Insert or replace the profile record for `record.user_id`
    async fn put_profile(&self, record: &ProfileRecord) -> AppResult<()>;

    // ================================
    // Daily Goals
    // ================================

    /// Insert or replace the daily goals record for `(user_id, date)`
    async fn upsert_daily_goals(&self, record: &DailyGoalsRecord) -> AppResult<()>;

    /// Get the daily goals record for a user and day
    async fn get_daily_goals(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyGoalsRecord>>;

    // ================================
    // Measurements
    // ================================

    /// Append a weight entry
    async fn add_weight_entry(&self, entry: &WeightEntry) -> AppResult<()>;

    /// Append a body measurement entry
    async fn add_body_measurement(&self, entry: &BodyMeasurementEntry) -> AppResult<()>;

    /// First and latest recorded value of one metric
    ///
    /// Only entries that actually carry the metric count, ordered by
    /// `recorded_at` with insertion order breaking ties.
    async fn metric_bounds(
        &self,
        user_id: Uuid,
        metric: ProgressMetric,
    ) -> AppResult<MetricBounds>;

    /// Bounds of every tracked metric
    async fn measurement_feed(&self, user_id: Uuid) -> AppResult<MeasurementFeed> {
        let mut feed = MeasurementFeed::default();
        for metric in ProgressMetric::ALL {
            *feed.slot_mut(metric) = self.metric_bounds(user_id, metric).await?;
        }
        Ok(feed)
    }

    // ================================
    // Progress
    // ================================

    /// Stored start values per metric
    async fn get_progress_baselines(&self, user_id: Uuid) -> AppResult<ProgressBaselines>;

    /// Replace the stored start values
    async fn put_progress_baselines(
        &self,
        user_id: Uuid,
        baselines: &ProgressBaselines,
    ) -> AppResult<()>;

    /// Stored targets per metric
    async fn get_progress_targets(&self, user_id: Uuid) -> AppResult<ProgressTargets>;

    /// Replace the stored targets
    async fn put_progress_targets(&self, user_id: Uuid, targets: &ProgressTargets)
        -> AppResult<()>;
}
