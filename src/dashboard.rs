// ABOUTME: Dashboard loader for transformation progress across weight, body fat, muscle, and waist
// ABOUTME: Records measurements, establishes start values once, and applies editable targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dashboard progress
//!
//! Start values are written the first time a metric has data and never
//! rewritten. Current values come from the latest measurements every time
//! the dashboard loads. Targets are user-editable; weight and body fat fall
//! back to the profile's goal fields when no explicit target is stored.

use crate::database_plugins::ProfileStore;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use vitalis_core::models::{
    BodyMeasurementEntry, ProfileRecord, ProgressMetric, ProgressTargets, WeightEntry,
};
use vitalis_intelligence::progress_calculator::{establish_baselines, TransformationProgress};

/// Progress plus the targets it was computed against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardProgress {
    /// Per-metric snapshots and overall percentage
    pub progress: TransformationProgress,
    /// Effective targets after profile fallbacks
    pub targets: ProgressTargets,
}

/// One measurement session: a weigh-in, a tape measurement, or both
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeasurementInput {
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Body fat (%), stored with the weight entry
    pub body_fat_percentage: Option<f64>,
    /// Skeletal muscle (%), stored with the weight entry
    pub muscle_percentage: Option<f64>,
    /// Waist circumference (cm)
    pub waist_cm: Option<f64>,
}

/// Entries appended by [`record_measurement`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedMeasurement {
    /// Weight entry, when a weight was given
    pub weight_entry: Option<WeightEntry>,
    /// Body measurement, when a waist was given
    pub body_measurement: Option<BodyMeasurementEntry>,
}

/// Append a weigh-in and/or tape measurement for a user
///
/// # Errors
///
/// Returns `MissingRequiredField` when body composition is given without a
/// weight, `InvalidInput` when nothing is given, `ValueOutOfRange` for a
/// non-finite or non-positive value, or the store's error if a write fails
pub async fn record_measurement(
    store: &dyn ProfileStore,
    user_id: Uuid,
    input: MeasurementInput,
    recorded_at: DateTime<Utc>,
) -> AppResult<RecordedMeasurement> {
    // Body composition rides on the weight entry
    if input.weight_kg.is_none()
        && (input.body_fat_percentage.is_some() || input.muscle_percentage.is_some())
    {
        return Err(AppError::missing_field("weight_kg").with_user_id(user_id));
    }
    if input.weight_kg.is_none() && input.waist_cm.is_none() {
        return Err(
            AppError::invalid_input("Nothing to record; give a weight and/or a waist")
                .with_user_id(user_id),
        );
    }
    let values = [
        input.weight_kg,
        input.body_fat_percentage,
        input.muscle_percentage,
        input.waist_cm,
    ];
    if values
        .iter()
        .flatten()
        .any(|value| !(value.is_finite() && *value > 0.0))
    {
        return Err(
            AppError::out_of_range("Measurements must be positive numbers").with_user_id(user_id),
        );
    }

    let weight_entry = input.weight_kg.map(|weight_kg| WeightEntry {
        user_id,
        recorded_at,
        weight_kg,
        body_fat_percentage: input.body_fat_percentage,
        muscle_percentage: input.muscle_percentage,
    });
    let body_measurement = input.waist_cm.map(|waist_cm| BodyMeasurementEntry {
        user_id,
        recorded_at,
        waist_cm: Some(waist_cm),
    });

    if let Some(entry) = &weight_entry {
        store.add_weight_entry(entry).await?;
    }
    if let Some(entry) = &body_measurement {
        store.add_body_measurement(entry).await?;
    }

    info!(
        user_id = %user_id,
        weight = weight_entry.is_some(),
        waist = body_measurement.is_some(),
        "Measurement recorded"
    );
    Ok(RecordedMeasurement {
        weight_entry,
        body_measurement,
    })
}

/// Stored targets with the profile's goal fields filling the gaps
#[must_use]
pub fn effective_targets(
    stored: &ProgressTargets,
    profile: Option<&ProfileRecord>,
) -> ProgressTargets {
    ProgressTargets {
        weight: stored
            .weight
            .or_else(|| profile.and_then(|record| record.target_weight)),
        body_fat: stored
            .body_fat
            .or_else(|| profile.and_then(|record| record.target_body_fat_percentage)),
        ..*stored
    }
}

/// Load the transformation progress for a user
///
/// Missing start values are established from the profile's start weight or
/// the earliest measurement and persisted before progress is computed.
///
/// # Errors
///
/// Returns the store's error if any read or the baseline write fails
pub async fn load_progress(store: &dyn ProfileStore, user_id: Uuid) -> AppResult<DashboardProgress> {
    let profile = store.get_profile(user_id).await?;
    let feed = store.measurement_feed(user_id).await?;
    let mut baselines = store.get_progress_baselines(user_id).await?;

    let start_weight = profile.as_ref().and_then(|record| record.start_weight);
    if establish_baselines(&mut baselines, start_weight, &feed) {
        store.put_progress_baselines(user_id, &baselines).await?;
        info!(user_id = %user_id, ?baselines, "Progress start values established");
    }

    let targets = effective_targets(
        &store.get_progress_targets(user_id).await?,
        profile.as_ref(),
    );
    let progress = TransformationProgress::compute(&baselines, &feed, &targets);

    debug!(
        user_id = %user_id,
        overall_percent = ?progress.overall_percent,
        metrics = progress.snapshots().count(),
        "Dashboard progress loaded"
    );
    Ok(DashboardProgress { progress, targets })
}

/// Set or clear the target for one metric
///
/// # Errors
///
/// Returns `ValueOutOfRange` for a non-finite or non-positive target, or the
/// store's error if the write fails
pub async fn set_target(
    store: &dyn ProfileStore,
    user_id: Uuid,
    metric: ProgressMetric,
    value: Option<f64>,
) -> AppResult<ProgressTargets> {
    if let Some(target) = value {
        if !(target.is_finite() && target > 0.0) {
            return Err(AppError::out_of_range(format!(
                "{metric} target must be a positive number, got {target}"
            )));
        }
    }

    let mut targets = store.get_progress_targets(user_id).await?;
    *targets.slot_mut(metric) = value;
    store.put_progress_targets(user_id, &targets).await?;

    info!(user_id = %user_id, %metric, target = ?value, "Progress target updated");
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_targets_win_over_profile() {
        let mut profile = ProfileRecord::empty(Uuid::new_v4());
        profile.target_weight = Some(72.0);
        profile.target_body_fat_percentage = Some(15.0);

        let stored = ProgressTargets {
            weight: Some(70.0),
            belly: Some(84.0),
            ..ProgressTargets::default()
        };

        let targets = effective_targets(&stored, Some(&profile));
        assert_eq!(targets.weight, Some(70.0));
        assert_eq!(targets.body_fat, Some(15.0));
        assert_eq!(targets.belly, Some(84.0));
        assert_eq!(targets.muscle, None);
    }
}
