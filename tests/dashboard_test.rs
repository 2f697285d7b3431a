// ABOUTME: Integration tests for dashboard progress loading and target editing
// ABOUTME: Start values are established once, targets fall back to profile goals, and updates persist
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, Utc};
use common::{complete_profile, init_test_logging};
use uuid::Uuid;
use vitalis::dashboard::{load_progress, record_measurement, set_target, MeasurementInput};
use vitalis::database_plugins::memory::InMemoryStore;
use vitalis::database_plugins::ProfileStore;
use vitalis::errors::ErrorCode;
use vitalis_core::models::{BodyMeasurementEntry, ProgressMetric, WeightEntry};

fn weight_entry(user_id: Uuid, at: DateTime<Utc>, kg: f64, body_fat: Option<f64>) -> WeightEntry {
    WeightEntry {
        user_id,
        recorded_at: at,
        weight_kg: kg,
        body_fat_percentage: body_fat,
        muscle_percentage: None,
    }
}

#[tokio::test]
async fn test_start_values_are_established_once() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(30);

    let mut profile = complete_profile(user_id);
    profile.start_weight = None;
    store.put_profile(&profile).await.unwrap();

    store
        .add_weight_entry(&weight_entry(user_id, start, 90.0, Some(28.0)))
        .await
        .unwrap();
    store
        .add_body_measurement(&BodyMeasurementEntry {
            user_id,
            recorded_at: start,
            waist_cm: Some(100.0),
        })
        .await
        .unwrap();

    let first = load_progress(&store, user_id).await.unwrap();
    let weight = first.progress.weight.as_ref().unwrap();
    assert_eq!(weight.start_value, 90.0);
    assert_eq!(weight.percent_complete, 0.0);

    let baselines = store.get_progress_baselines(user_id).await.unwrap();
    assert_eq!(baselines.weight, Some(90.0));
    assert_eq!(baselines.body_fat, Some(28.0));
    assert_eq!(baselines.belly, Some(100.0));
    assert_eq!(baselines.muscle, None);

    // An entry backdated before the first one must not move the start value
    store
        .add_weight_entry(&weight_entry(user_id, start - Duration::days(10), 95.0, None))
        .await
        .unwrap();
    store
        .add_weight_entry(&weight_entry(user_id, Utc::now(), 85.0, Some(26.0)))
        .await
        .unwrap();

    let second = load_progress(&store, user_id).await.unwrap();
    let weight = second.progress.weight.as_ref().unwrap();
    assert_eq!(weight.start_value, 90.0);
    assert_eq!(weight.current_value, 85.0);
    assert_eq!(weight.target_value, 80.0);
    assert_eq!(weight.percent_complete, 50.0);
    assert_eq!(
        store.get_progress_baselines(user_id).await.unwrap().weight,
        Some(90.0)
    );
}

#[tokio::test]
async fn test_profile_start_weight_wins_over_entries() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    store.put_profile(&complete_profile(user_id)).await.unwrap();
    store
        .add_weight_entry(&weight_entry(user_id, Utc::now(), 86.0, None))
        .await
        .unwrap();

    let dashboard = load_progress(&store, user_id).await.unwrap();
    let weight = dashboard.progress.weight.unwrap();

    assert_eq!(weight.start_value, 92.0);
    assert_eq!(weight.current_value, 86.0);
    assert_eq!(weight.percent_complete, 50.0);
}

#[tokio::test]
async fn test_targets_fall_back_to_profile_and_can_be_overridden() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    let mut profile = complete_profile(user_id);
    profile.target_body_fat_percentage = Some(18.0);
    store.put_profile(&profile).await.unwrap();

    let before = load_progress(&store, user_id).await.unwrap();
    assert_eq!(before.targets.weight, Some(80.0));
    assert_eq!(before.targets.body_fat, Some(18.0));
    assert_eq!(before.targets.belly, None);

    let stored = set_target(&store, user_id, ProgressMetric::Weight, Some(82.0))
        .await
        .unwrap();
    assert_eq!(stored.weight, Some(82.0));
    set_target(&store, user_id, ProgressMetric::Belly, Some(88.0))
        .await
        .unwrap();

    let after = load_progress(&store, user_id).await.unwrap();
    assert_eq!(after.targets.weight, Some(82.0));
    assert_eq!(after.targets.belly, Some(88.0));

    // Clearing the stored target brings back the profile goal
    set_target(&store, user_id, ProgressMetric::Weight, None)
        .await
        .unwrap();
    let cleared = load_progress(&store, user_id).await.unwrap();
    assert_eq!(cleared.targets.weight, Some(80.0));
}

#[tokio::test]
async fn test_invalid_target_is_rejected() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();

    for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
        let error = set_target(&store, user_id, ProgressMetric::Muscle, Some(bad))
            .await
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }
    assert_eq!(
        store.get_progress_targets(user_id).await.unwrap().muscle,
        None
    );
}

#[tokio::test]
async fn test_dashboard_without_any_data_is_empty() {
    init_test_logging();
    let store = InMemoryStore::new();
    let dashboard = load_progress(&store, Uuid::new_v4()).await.unwrap();

    assert!(dashboard.progress.weight.is_none());
    assert!(dashboard.progress.belly.is_none());
    assert_eq!(dashboard.progress.overall_percent, None);
}

#[tokio::test]
async fn test_body_fat_progress_uses_entries_that_carry_it() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(60);

    let mut profile = complete_profile(user_id);
    profile.start_weight = None;
    profile.target_body_fat_percentage = Some(20.0);
    store.put_profile(&profile).await.unwrap();

    // The first weigh-in has no body fat reading
    for (day, kg, body_fat) in [
        (0, 92.0, None),
        (10, 91.0, Some(28.0)),
        (50, 88.0, Some(24.0)),
    ] {
        store
            .add_weight_entry(&weight_entry(user_id, start + Duration::days(day), kg, body_fat))
            .await
            .unwrap();
    }

    let dashboard = load_progress(&store, user_id).await.unwrap();
    let body_fat = dashboard.progress.body_fat.unwrap();
    assert_eq!(body_fat.start_value, 28.0);
    assert_eq!(body_fat.current_value, 24.0);
    assert_eq!(body_fat.target_value, 20.0);
    assert_eq!(body_fat.percent_complete, 50.0);
    assert_eq!(dashboard.progress.weight.unwrap().start_value, 92.0);

    // A later plain weigh-in keeps the last body fat reading current
    store
        .add_weight_entry(&weight_entry(user_id, start + Duration::days(55), 87.5, None))
        .await
        .unwrap();

    let later = load_progress(&store, user_id).await.unwrap();
    let body_fat = later.progress.body_fat.unwrap();
    assert_eq!(body_fat.start_value, 28.0);
    assert_eq!(body_fat.current_value, 24.0);
    assert_eq!(later.progress.weight.unwrap().current_value, 87.5);
    assert_eq!(
        store.get_progress_baselines(user_id).await.unwrap().body_fat,
        Some(28.0)
    );
}

#[tokio::test]
async fn test_recorded_measurements_feed_the_dashboard() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();
    let start = Utc::now() - Duration::days(20);

    let first = record_measurement(
        &store,
        user_id,
        MeasurementInput {
            weight_kg: Some(90.0),
            waist_cm: Some(102.0),
            ..MeasurementInput::default()
        },
        start,
    )
    .await
    .unwrap();
    assert_eq!(first.weight_entry.unwrap().weight_kg, 90.0);
    assert_eq!(first.body_measurement.unwrap().waist_cm, Some(102.0));

    record_measurement(
        &store,
        user_id,
        MeasurementInput {
            waist_cm: Some(98.0),
            ..MeasurementInput::default()
        },
        start + Duration::days(14),
    )
    .await
    .unwrap();
    set_target(&store, user_id, ProgressMetric::Belly, Some(94.0))
        .await
        .unwrap();

    let belly = load_progress(&store, user_id)
        .await
        .unwrap()
        .progress
        .belly
        .unwrap();
    assert_eq!(belly.start_value, 102.0);
    assert_eq!(belly.current_value, 98.0);
    assert_eq!(belly.percent_complete, 50.0);
}

#[tokio::test]
async fn test_body_composition_requires_a_weight() {
    init_test_logging();
    let store = InMemoryStore::new();
    let user_id = Uuid::new_v4();

    let error = record_measurement(
        &store,
        user_id,
        MeasurementInput {
            body_fat_percentage: Some(24.0),
            ..MeasurementInput::default()
        },
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(error.context.resource_id.as_deref(), Some("weight_kg"));
    assert_eq!(error.context.user_id, Some(user_id));

    let error = record_measurement(&store, user_id, MeasurementInput::default(), Utc::now())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = record_measurement(
        &store,
        user_id,
        MeasurementInput {
            weight_kg: Some(80.0),
            muscle_percentage: Some(-1.0),
            ..MeasurementInput::default()
        },
        Utc::now(),
    )
    .await
    .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);

    let feed = store.measurement_feed(user_id).await.unwrap();
    assert_eq!(feed.weight.latest, None);
}
