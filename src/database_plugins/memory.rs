// ABOUTME: In-memory record store using tokio RwLock-protected maps
// ABOUTME: Used by tests and the CLI when no persistent database is configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProfileStore;
use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use vitalis_core::models::{
    BodyMeasurementEntry, DailyGoalsRecord, MetricBounds, ProfileRecord, ProgressBaselines,
    ProgressMetric, ProgressTargets, WeightEntry,
};

/// In-memory record store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    profiles: RwLock<HashMap<Uuid, ProfileRecord>>,
    daily_goals: RwLock<HashMap<(Uuid, NaiveDate), DailyGoalsRecord>>,
    weights: RwLock<HashMap<Uuid, Vec<WeightEntry>>>,
    bodies: RwLock<HashMap<Uuid, Vec<BodyMeasurementEntry>>>,
    baselines: RwLock<HashMap<Uuid, ProgressBaselines>>,
    targets: RwLock<HashMap<Uuid, ProgressTargets>>,
}

impl InMemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of daily goals records held
    pub async fn daily_goals_count(&self) -> usize {
        self.daily_goals.read().await.len()
    }
}

/// First and last value by timestamp, skipping entries without one
///
/// Ties keep insertion order: `min_by_key` returns the first of equal keys
/// and `max_by_key` the last.
fn bounds<T, K: Ord + Copy>(
    entries: Option<&Vec<T>>,
    key: impl Fn(&T) -> K,
    value: impl Fn(&T) -> Option<f64>,
) -> MetricBounds {
    let carrying: Vec<(K, f64)> = entries
        .into_iter()
        .flatten()
        .filter_map(|entry| value(entry).map(|v| (key(entry), v)))
        .collect();
    MetricBounds {
        earliest: carrying.iter().min_by_key(|(at, _)| *at).map(|(_, v)| *v),
        latest: carrying.iter().max_by_key(|(at, _)| *at).map(|(_, v)| *v),
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<ProfileRecord>> {
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn put_profile(&self, record: &ProfileRecord) -> AppResult<()> {
        self.profiles
            .write()
            .await
            .insert(record.user_id, record.clone());
        Ok(())
    }

    async fn upsert_daily_goals(&self, record: &DailyGoalsRecord) -> AppResult<()> {
        self.daily_goals
            .write()
            .await
            .insert((record.user_id, record.date), record.clone());
        Ok(())
    }

    async fn get_daily_goals(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<DailyGoalsRecord>> {
        Ok(self.daily_goals.read().await.get(&(user_id, date)).cloned())
    }

    async fn add_weight_entry(&self, entry: &WeightEntry) -> AppResult<()> {
        self.weights
            .write()
            .await
            .entry(entry.user_id)
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn add_body_measurement(&self, entry: &BodyMeasurementEntry) -> AppResult<()> {
        self.bodies
            .write()
            .await
            .entry(entry.user_id)
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn metric_bounds(
        &self,
        user_id: Uuid,
        metric: ProgressMetric,
    ) -> AppResult<MetricBounds> {
        if metric == ProgressMetric::Belly {
            let bodies = self.bodies.read().await;
            return Ok(bounds(
                bodies.get(&user_id),
                |entry| entry.recorded_at,
                |entry| entry.value(metric),
            ));
        }
        let weights = self.weights.read().await;
        Ok(bounds(
            weights.get(&user_id),
            |entry| entry.recorded_at,
            |entry| entry.value(metric),
        ))
    }

    async fn get_progress_baselines(&self, user_id: Uuid) -> AppResult<ProgressBaselines> {
        Ok(self
            .baselines
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default())
    }

    async fn put_progress_baselines(
        &self,
        user_id: Uuid,
        baselines: &ProgressBaselines,
    ) -> AppResult<()> {
        self.baselines.write().await.insert(user_id, *baselines);
        Ok(())
    }

    async fn get_progress_targets(&self, user_id: Uuid) -> AppResult<ProgressTargets> {
        Ok(self
            .targets
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default())
    }

    async fn put_progress_targets(
        &self,
        user_id: Uuid,
        targets: &ProgressTargets,
    ) -> AppResult<()> {
        self.targets.write().await.insert(user_id, *targets);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn weigh_in(user_id: Uuid, day: i64, kg: f64, body_fat: Option<f64>) -> WeightEntry {
        WeightEntry {
            user_id,
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 7, 0, 0).unwrap() + Duration::days(day),
            weight_kg: kg,
            body_fat_percentage: body_fat,
            muscle_percentage: None,
        }
    }

    #[tokio::test]
    async fn test_metric_bounds_skip_entries_without_the_metric() {
        let store = InMemoryStore::new();
        let user_id = Uuid::new_v4();
        for entry in [
            weigh_in(user_id, 30, 89.0, None),
            weigh_in(user_id, 0, 92.0, None),
            weigh_in(user_id, 10, 91.0, Some(28.0)),
            weigh_in(user_id, 20, 90.0, Some(26.5)),
        ] {
            store.add_weight_entry(&entry).await.unwrap();
        }

        let weight = store
            .metric_bounds(user_id, ProgressMetric::Weight)
            .await
            .unwrap();
        assert_eq!(weight.earliest, Some(92.0));
        assert_eq!(weight.latest, Some(89.0));

        let body_fat = store
            .metric_bounds(user_id, ProgressMetric::BodyFat)
            .await
            .unwrap();
        assert_eq!(body_fat.earliest, Some(28.0));
        assert_eq!(body_fat.latest, Some(26.5));

        let muscle = store
            .metric_bounds(user_id, ProgressMetric::Muscle)
            .await
            .unwrap();
        assert_eq!(muscle, MetricBounds::default());
    }

    #[tokio::test]
    async fn test_metric_bounds_ties_keep_insertion_order() {
        let store = InMemoryStore::new();
        let user_id = Uuid::new_v4();
        store
            .add_weight_entry(&weigh_in(user_id, 0, 80.0, None))
            .await
            .unwrap();
        store
            .add_weight_entry(&weigh_in(user_id, 0, 79.0, None))
            .await
            .unwrap();

        let weight = store
            .metric_bounds(user_id, ProgressMetric::Weight)
            .await
            .unwrap();
        assert_eq!(weight.earliest, Some(80.0));
        assert_eq!(weight.latest, Some(79.0));
    }
}
