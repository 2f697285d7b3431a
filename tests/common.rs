// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, profile builders, and an instrumented record store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitalis`

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use std::env;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Once;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time;
use tracing::Level;
use uuid::Uuid;
use vitalis::database_plugins::memory::InMemoryStore;
use vitalis::database_plugins::ProfileStore;
use vitalis::errors::{AppError, AppResult};
use vitalis_core::models::{
    BodyMeasurementEntry, DailyGoalsRecord, MetricBounds, ProfileRecord, ProgressBaselines,
    ProgressMetric, ProgressTargets, WeightEntry,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Today in UTC, the same day the session plans against
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A profile record with every field the planner needs
///
/// 90 kg, 180 cm, 30 year old male, moderately active, aiming for 80 kg in
/// 70 days with the warrior tier.
pub fn complete_profile(user_id: Uuid) -> ProfileRecord {
    ProfileRecord {
        weight: Some(90.0),
        start_weight: Some(92.0),
        height: Some(180),
        age: Some(30),
        gender: Some("male".into()),
        activity_level: Some("moderate".into()),
        goal: Some("lose".into()),
        target_weight: Some(80.0),
        target_date: Some(today() + ChronoDuration::days(70)),
        goal_type: Some("weight".into()),
        macro_strategy: Some("warrior".into()),
        ..ProfileRecord::empty(user_id)
    }
}

/// Record store wrapper that can slow down or fail profile writes
///
/// Counts every profile write attempt and the highest number of writes that
/// were in flight at the same time.
#[derive(Default)]
pub struct InstrumentedStore {
    inner: InMemoryStore,
    fail_saves: AtomicBool,
    save_delay_ms: AtomicU64,
    put_attempts: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    saved_profiles: Mutex<Vec<ProfileRecord>>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        init_test_logging();
        Self::default()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn set_save_delay(&self, delay: Duration) {
        self.save_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn put_attempts(&self) -> usize {
        self.put_attempts.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Every profile successfully written, oldest first
    pub async fn saved_profiles(&self) -> Vec<ProfileRecord> {
        self.saved_profiles.lock().await.clone()
    }

    pub const fn inner(&self) -> &InMemoryStore {
        &self.inner
    }
}

#[async_trait]
impl ProfileStore for InstrumentedStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>> {
        self.inner.get_profile(user_id).await
    }

    async fn put_profile(&self, record: &ProfileRecord) -> AppResult<()> {
        self.put_attempts.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);

        let delay = self.save_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            time::sleep(Duration::from_millis(delay)).await;
        }

        let result = if self.fail_saves.load(Ordering::SeqCst) {
            Err(AppError::storage("injected write failure"))
        } else {
            self.saved_profiles.lock().await.push(record.clone());
            self.inner.put_profile(record).await
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn upsert_daily_goals(&self, record: &DailyGoalsRecord) -> AppResult<()> {
        self.inner.upsert_daily_goals(record).await
    }

    async fn get_daily_goals(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyGoalsRecord>> {
        self.inner.get_daily_goals(user_id, date).await
    }

    async fn add_weight_entry(&self, entry: &WeightEntry) -> AppResult<()> {
        self.inner.add_weight_entry(entry).await
    }

    async fn add_body_measurement(&self, entry: &BodyMeasurementEntry) -> AppResult<()> {
        self.inner.add_body_measurement(entry).await
    }

    async fn metric_bounds(
        &self,
        user_id: Uuid,
        metric: ProgressMetric,
    ) -> AppResult<MetricBounds> {
        self.inner.metric_bounds(user_id, metric).await
    }

    async fn get_progress_baselines(&self, user_id: Uuid) -> AppResult<ProgressBaselines> {
        self.inner.get_progress_baselines(user_id).await
    }

    async fn put_progress_baselines(
        &self,
        user_id: Uuid,
        baselines: &ProgressBaselines,
    ) -> AppResult<()> {
        self.inner.put_progress_baselines(user_id, baselines).await
    }

    async fn get_progress_targets(&self, user_id: Uuid) -> AppResult<ProgressTargets> {
        self.inner.get_progress_targets(user_id).await
    }

    async fn put_progress_targets(
        &self,
        user_id: Uuid,
        targets: &ProgressTargets,
    ) -> AppResult<()> {
        self.inner.put_progress_targets(user_id, targets).await
    }
}
