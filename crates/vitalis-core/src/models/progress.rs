// ABOUTME: Progress baseline and target records for the transformation dashboard
// ABOUTME: One optional value per tracked metric: weight, body fat, muscle, belly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metric tracked on the transformation dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMetric {
    /// Body weight (kg)
    Weight,
    /// Body fat (%)
    BodyFat,
    /// Skeletal muscle (%)
    Muscle,
    /// Waist circumference (cm)
    Belly,
}

impl ProgressMetric {
    /// All metrics in dashboard order
    pub const ALL: [Self; 4] = [Self::Weight, Self::BodyFat, Self::Muscle, Self::Belly];

    /// Whether success means the value goes up
    #[must_use]
    pub const fn is_gain_metric(self) -> bool {
        matches!(self, Self::Muscle)
    }
}

impl fmt::Display for ProgressMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Weight => "weight",
            Self::BodyFat => "body_fat",
            Self::Muscle => "muscle",
            Self::Belly => "belly",
        };
        f.write_str(name)
    }
}

impl FromStr for ProgressMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "weight" => Ok(Self::Weight),
            "body_fat" => Ok(Self::BodyFat),
            "muscle" => Ok(Self::Muscle),
            "belly" | "waist" => Ok(Self::Belly),
            _ => Err(AppError::invalid_domain_value("progress metric", s)),
        }
    }
}

/// Start values per metric
///
/// A start value is written once and never rewritten afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressBaselines {
    /// Starting weight (kg)
    pub weight: Option<f64>,
    /// Starting body fat (%)
    pub body_fat: Option<f64>,
    /// Starting muscle (%)
    pub muscle: Option<f64>,
    /// Starting waist (cm)
    pub belly: Option<f64>,
}

impl ProgressBaselines {
    /// Start value for a metric
    #[must_use]
    pub const fn get(&self, metric: ProgressMetric) -> Option<f64> {
        match metric {
            ProgressMetric::Weight => self.weight,
            ProgressMetric::BodyFat => self.body_fat,
            ProgressMetric::Muscle => self.muscle,
            ProgressMetric::Belly => self.belly,
        }
    }

    /// Mutable slot for a metric
    pub fn slot_mut(&mut self, metric: ProgressMetric) -> &mut Option<f64> {
        match metric {
            ProgressMetric::Weight => &mut self.weight,
            ProgressMetric::BodyFat => &mut self.body_fat,
            ProgressMetric::Muscle => &mut self.muscle,
            ProgressMetric::Belly => &mut self.belly,
        }
    }
}

/// User-editable targets per metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressTargets {
    /// Target weight (kg)
    pub weight: Option<f64>,
    /// Target body fat (%)
    pub body_fat: Option<f64>,
    /// Target muscle (%)
    pub muscle: Option<f64>,
    /// Target waist (cm)
    pub belly: Option<f64>,
}

impl ProgressTargets {
    /// Target value for a metric
    #[must_use]
    pub const fn get(&self, metric: ProgressMetric) -> Option<f64> {
        match metric {
            ProgressMetric::Weight => self.weight,
            ProgressMetric::BodyFat => self.body_fat,
            ProgressMetric::Muscle => self.muscle,
            ProgressMetric::Belly => self.belly,
        }
    }

    /// Mutable slot for a metric
    pub fn slot_mut(&mut self, metric: ProgressMetric) -> &mut Option<f64> {
        match metric {
            ProgressMetric::Weight => &mut self.weight,
            ProgressMetric::BodyFat => &mut self.body_fat,
            ProgressMetric::Muscle => &mut self.muscle,
            ProgressMetric::Belly => &mut self.belly,
        }
    }
}
