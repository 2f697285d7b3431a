// ABOUTME: Weight and body measurement entries consumed by the progress calculator
// ABOUTME: MeasurementFeed holds the first and latest recorded value of each tracked metric
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProgressMetric;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Logged body weight, optionally with body composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Owning user
    pub user_id: Uuid,
    /// When the weight was taken
    pub recorded_at: DateTime<Utc>,
    /// Body weight (kg)
    pub weight_kg: f64,
    /// Body fat (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percentage: Option<f64>,
    /// Skeletal muscle (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_percentage: Option<f64>,
}

/// Logged tape measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurementEntry {
    /// Owning user
    pub user_id: Uuid,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
    /// Waist / belly circumference (cm)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waist_cm: Option<f64>,
}

impl WeightEntry {
    /// Value this entry carries for a metric, if any
    #[must_use]
    pub fn value(&self, metric: ProgressMetric) -> Option<f64> {
        let value = match metric {
            ProgressMetric::Weight => Some(self.weight_kg),
            ProgressMetric::BodyFat => self.body_fat_percentage,
            ProgressMetric::Muscle => self.muscle_percentage,
            ProgressMetric::Belly => None,
        };
        value.filter(|v| v.is_finite())
    }
}

impl BodyMeasurementEntry {
    /// Value this entry carries for a metric, if any
    #[must_use]
    pub fn value(&self, metric: ProgressMetric) -> Option<f64> {
        let value = match metric {
            ProgressMetric::Belly => self.waist_cm,
            _ => None,
        };
        value.filter(|v| v.is_finite())
    }
}

/// First and latest recorded value of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricBounds {
    /// Value of the first entry carrying the metric
    pub earliest: Option<f64>,
    /// Value of the most recent entry carrying the metric
    pub latest: Option<f64>,
}

/// Measurement bounds for every tracked metric
///
/// Each metric is bounded on its own: a weigh-in without body fat never
/// hides the body fat recorded before or after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementFeed {
    /// Body weight (kg)
    pub weight: MetricBounds,
    /// Body fat (%)
    pub body_fat: MetricBounds,
    /// Skeletal muscle (%)
    pub muscle: MetricBounds,
    /// Waist circumference (cm)
    pub belly: MetricBounds,
}

impl MeasurementFeed {
    /// Bounds for a metric
    #[must_use]
    pub const fn get(&self, metric: ProgressMetric) -> MetricBounds {
        match metric {
            ProgressMetric::Weight => self.weight,
            ProgressMetric::BodyFat => self.body_fat,
            ProgressMetric::Muscle => self.muscle,
            ProgressMetric::Belly => self.belly,
        }
    }

    /// Mutable bounds for a metric
    pub fn slot_mut(&mut self, metric: ProgressMetric) -> &mut MetricBounds {
        match metric {
            ProgressMetric::Weight => &mut self.weight,
            ProgressMetric::BodyFat => &mut self.body_fat,
            ProgressMetric::Muscle => &mut self.muscle,
            ProgressMetric::Belly => &mut self.belly,
        }
    }
}
