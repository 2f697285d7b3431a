// ABOUTME: Transformation progress per metric from start, current, and target values
// ABOUTME: Baseline establishment from the measurement feed and overall completion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Progress Calculator
//!
//! Percent of the way from start to target, per tracked metric. The formula
//! uses absolute distances, so reduction metrics (weight, body fat, waist) and
//! the gain metric (muscle) share one code path.

use serde::{Deserialize, Serialize};
use vitalis_core::constants::PERCENT;
use vitalis_core::models::{MeasurementFeed, ProgressBaselines, ProgressMetric, ProgressTargets};

/// Progress for one metric
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Metric this snapshot describes
    pub metric: ProgressMetric,
    /// Value when tracking started
    pub start_value: f64,
    /// Most recent value
    pub current_value: f64,
    /// Goal value
    pub target_value: f64,
    /// Completion (0-100)
    pub percent_complete: f64,
}

impl ProgressSnapshot {
    /// Build a snapshot when all three values are known
    #[must_use]
    pub fn new(
        metric: ProgressMetric,
        start: Option<f64>,
        current: Option<f64>,
        target: Option<f64>,
    ) -> Option<Self> {
        let (start_value, current_value, target_value) = (start?, current?, target?);
        Some(Self {
            metric,
            start_value,
            current_value,
            target_value,
            percent_complete: percent_complete(start_value, current_value, target_value),
        })
    }
}

/// Dashboard progress across every tracked metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformationProgress {
    /// Body weight
    pub weight: Option<ProgressSnapshot>,
    /// Body fat percentage
    pub body_fat: Option<ProgressSnapshot>,
    /// Muscle percentage
    pub muscle: Option<ProgressSnapshot>,
    /// Waist circumference
    pub belly: Option<ProgressSnapshot>,
    /// Mean completion of the metrics that have a snapshot
    pub overall_percent: Option<f64>,
}

impl TransformationProgress {
    /// Compute progress from baselines, the latest measurements and targets
    #[must_use]
    pub fn compute(
        baselines: &ProgressBaselines,
        feed: &MeasurementFeed,
        targets: &ProgressTargets,
    ) -> Self {
        let snapshot = |metric| {
            ProgressSnapshot::new(
                metric,
                baselines.get(metric),
                latest_value(feed, metric),
                targets.get(metric),
            )
        };

        let mut progress = Self {
            weight: snapshot(ProgressMetric::Weight),
            body_fat: snapshot(ProgressMetric::BodyFat),
            muscle: snapshot(ProgressMetric::Muscle),
            belly: snapshot(ProgressMetric::Belly),
            overall_percent: None,
        };

        let available: Vec<f64> = progress
            .snapshots()
            .map(|snapshot| snapshot.percent_complete)
            .collect();
        if !available.is_empty() {
            progress.overall_percent = Some(available.iter().sum::<f64>() / available.len() as f64);
        }
        progress
    }

    /// Snapshot for a metric
    #[must_use]
    pub const fn get(&self, metric: ProgressMetric) -> Option<&ProgressSnapshot> {
        match metric {
            ProgressMetric::Weight => self.weight.as_ref(),
            ProgressMetric::BodyFat => self.body_fat.as_ref(),
            ProgressMetric::Muscle => self.muscle.as_ref(),
            ProgressMetric::Belly => self.belly.as_ref(),
        }
    }

    /// Every available snapshot in dashboard order
    pub fn snapshots(&self) -> impl Iterator<Item = &ProgressSnapshot> {
        ProgressMetric::ALL
            .into_iter()
            .filter_map(|metric| self.get(metric))
    }
}

/// Percent of the distance from `start` to `target` covered by `current`
///
/// `min(100, max(0, |start - current| / |start - target| x 100))`.
/// A zero-width goal (`start == target`) has no progress to make and returns
/// 0. Non-finite inputs also return 0 so NaN never reaches a record.
#[must_use]
pub fn percent_complete(start: f64, current: f64, target: f64) -> f64 {
    if !(start.is_finite() && current.is_finite() && target.is_finite()) {
        return 0.0;
    }
    let distance = (start - target).abs();
    if distance == 0.0 {
        return 0.0;
    }
    ((start - current).abs() / distance * PERCENT).clamp(0.0, PERCENT)
}

/// Fill start values that are still unset
///
/// The weight start prefers `profile_start_weight` and falls back to the
/// earliest weight entry; other metrics use the first entry that carries
/// that metric, whatever the weigh-ins around it recorded. Existing start
/// values are never rewritten. Returns whether any value was filled.
pub fn establish_baselines(
    baselines: &mut ProgressBaselines,
    profile_start_weight: Option<f64>,
    feed: &MeasurementFeed,
) -> bool {
    let mut changed = false;
    for metric in ProgressMetric::ALL {
        let slot = baselines.slot_mut(metric);
        if slot.is_some() {
            continue;
        }
        let candidate = match metric {
            ProgressMetric::Weight => profile_start_weight
                .filter(|w| w.is_finite() && *w > 0.0)
                .or_else(|| earliest_value(feed, metric)),
            _ => earliest_value(feed, metric),
        };
        if candidate.is_some() {
            *slot = candidate;
            changed = true;
        }
    }
    changed
}

/// Most recent recorded value of a metric
#[must_use]
pub fn latest_value(feed: &MeasurementFeed, metric: ProgressMetric) -> Option<f64> {
    feed.get(metric).latest.filter(|v| v.is_finite())
}

/// First recorded value of a metric
#[must_use]
pub fn earliest_value(feed: &MeasurementFeed, metric: ProgressMetric) -> Option<f64> {
    feed.get(metric).earliest.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitalis_core::models::MetricBounds;

    const fn bounds(earliest: f64, latest: f64) -> MetricBounds {
        MetricBounds {
            earliest: Some(earliest),
            latest: Some(latest),
        }
    }

    fn feed() -> MeasurementFeed {
        MeasurementFeed {
            weight: bounds(92.0, 86.0),
            body_fat: bounds(28.0, 24.0),
            muscle: bounds(34.0, 36.0),
            belly: bounds(104.0, 98.0),
        }
    }

    #[test]
    fn test_percent_complete_halfway() {
        assert!((percent_complete(80.0, 75.0, 70.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_complete_zero_width_goal() {
        for current in [60.0, 80.0, 100.0, -3.0] {
            assert!(percent_complete(80.0, current, 80.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_percent_complete_overshoot_clamps() {
        assert!((percent_complete(80.0, 65.0, 70.0) - 100.0).abs() < f64::EPSILON);
        assert!((percent_complete(30.0, 45.0, 40.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_complete_gain_metric() {
        // Muscle 30% -> 40%, currently 34%
        assert!((percent_complete(30.0, 34.0, 40.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_complete_non_finite() {
        assert!(percent_complete(f64::NAN, 75.0, 70.0).abs() < f64::EPSILON);
        assert!(percent_complete(80.0, f64::INFINITY, 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_establish_baselines_once() {
        let mut baselines = ProgressBaselines::default();
        assert!(establish_baselines(&mut baselines, Some(95.0), &feed()));
        assert_eq!(baselines.weight, Some(95.0));
        assert_eq!(baselines.body_fat, Some(28.0));
        assert_eq!(baselines.muscle, Some(34.0));
        assert_eq!(baselines.belly, Some(104.0));

        let later_feed = MeasurementFeed {
            weight: bounds(70.0, 70.0),
            body_fat: bounds(10.0, 10.0),
            ..feed()
        };
        assert!(!establish_baselines(&mut baselines, Some(60.0), &later_feed));
        assert_eq!(baselines.weight, Some(95.0));
        assert_eq!(baselines.body_fat, Some(28.0));
    }

    #[test]
    fn test_establish_baselines_falls_back_to_earliest_weight() {
        let mut baselines = ProgressBaselines::default();
        establish_baselines(&mut baselines, None, &feed());
        assert_eq!(baselines.weight, Some(92.0));
    }

    #[test]
    fn test_transformation_progress() {
        let mut baselines = ProgressBaselines::default();
        establish_baselines(&mut baselines, None, &feed());
        let targets = ProgressTargets {
            weight: Some(80.0),
            body_fat: Some(20.0),
            muscle: Some(38.0),
            belly: None,
        };

        let progress = TransformationProgress::compute(&baselines, &feed(), &targets);
        assert!((progress.weight.unwrap().percent_complete - 50.0).abs() < 1e-9);
        assert!((progress.body_fat.unwrap().percent_complete - 50.0).abs() < 1e-9);
        assert!((progress.muscle.unwrap().percent_complete - 50.0).abs() < 1e-9);
        assert!(progress.belly.is_none());
        assert!((progress.overall_percent.unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(progress.snapshots().count(), 3);
    }

    #[test]
    fn test_empty_feed_has_no_progress() {
        let progress = TransformationProgress::compute(
            &ProgressBaselines::default(),
            &MeasurementFeed::default(),
            &ProgressTargets::default(),
        );
        assert_eq!(progress, TransformationProgress::default());
    }

    #[test]
    fn test_body_fat_start_waits_for_first_reading() {
        // Weigh-ins so far carried no body fat
        let mut baselines = ProgressBaselines::default();
        let weight_only = MeasurementFeed {
            weight: bounds(92.0, 92.0),
            ..MeasurementFeed::default()
        };
        establish_baselines(&mut baselines, None, &weight_only);
        assert_eq!(baselines.body_fat, None);

        let with_body_fat = MeasurementFeed {
            weight: bounds(92.0, 87.5),
            body_fat: bounds(28.0, 24.0),
            ..MeasurementFeed::default()
        };
        assert!(establish_baselines(&mut baselines, None, &with_body_fat));
        assert_eq!(baselines.weight, Some(92.0));
        assert_eq!(baselines.body_fat, Some(28.0));

        let targets = ProgressTargets {
            body_fat: Some(20.0),
            ..ProgressTargets::default()
        };
        let progress = TransformationProgress::compute(&baselines, &with_body_fat, &targets);
        let body_fat = progress.body_fat.unwrap();
        assert!((body_fat.current_value - 24.0).abs() < f64::EPSILON);
        assert!((body_fat.percent_complete - 50.0).abs() < 1e-9);
    }
}
