// ABOUTME: User profile record as persisted in the record store
// ABOUTME: User-entered anthropometrics and goal fields plus engine-owned derived targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile record
///
/// Fields up to `macro_strategy` are entered by the user. Everything after
/// `macro_strategy` is derived by the engine and must only be written through
/// the planning pipeline, never edited independently of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Owning user
    pub user_id: Uuid,

    /// Current body weight (kg)
    pub weight: Option<f64>,
    /// Weight when the current goal was started (kg)
    pub start_weight: Option<f64>,
    /// Height (cm)
    pub height: Option<u32>,
    /// Age (years)
    pub age: Option<u32>,
    /// `male` | `female`
    pub gender: Option<String>,
    /// `sedentary` | `light` | `moderate` | `active` | `very_active`
    pub activity_level: Option<String>,
    /// Declared direction: `lose` | `maintain` | `gain`
    pub goal: Option<String>,
    /// Target body weight (kg)
    pub target_weight: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
    /// `weight` | `body_fat` | `both`
    pub goal_type: Option<String>,
    /// Current body fat (%)
    pub body_fat_percentage: Option<f64>,
    /// Target body fat (%)
    pub target_body_fat_percentage: Option<f64>,
    /// Intensity tier or legacy strategy name
    pub macro_strategy: Option<String>,

    /// Basal metabolic rate (kcal/day)
    pub bmr: Option<f64>,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: Option<f64>,
    /// Daily calorie target (kcal/day)
    pub daily_calorie_target: Option<f64>,
    /// Protein target (g/day)
    pub protein_target_g: Option<u32>,
    /// Carbohydrate target (g/day)
    pub carbs_target_g: Option<u32>,
    /// Fat target (g/day)
    pub fats_target_g: Option<u32>,
    /// Daily deficit or surplus magnitude (kcal/day)
    pub calorie_deficit: Option<f64>,
    /// Protein share of calories (%)
    pub protein_percentage: Option<f64>,
    /// Carbohydrate share of calories (%)
    pub carbs_percentage: Option<f64>,
    /// Fat share of calories (%)
    pub fats_percentage: Option<f64>,

    /// Last successful save
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRecord {
    /// Empty profile for a user that has never saved anything
    #[must_use]
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Clear every engine-owned field
    pub fn clear_derived(&mut self) {
        self.bmr = None;
        self.tdee = None;
        self.daily_calorie_target = None;
        self.protein_target_g = None;
        self.carbs_target_g = None;
        self.fats_target_g = None;
        self.calorie_deficit = None;
        self.protein_percentage = None;
        self.carbs_percentage = None;
        self.fats_percentage = None;
    }

    /// True when no derived floating value is NaN or infinite
    #[must_use]
    pub fn derived_values_finite(&self) -> bool {
        [
            self.bmr,
            self.tdee,
            self.daily_calorie_target,
            self.calorie_deficit,
            self.protein_percentage,
            self.carbs_percentage,
            self.fats_percentage,
        ]
        .into_iter()
        .flatten()
        .all(f64::is_finite)
    }
}
