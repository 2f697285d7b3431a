// ABOUTME: Daily goals record mirroring the calorie and macro targets for one calendar day
// ABOUTME: Carries goal timing, deficit totals, and the realism verdict for the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily goals record, keyed by `(user_id, date)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGoalsRecord {
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day this record applies to
    pub date: NaiveDate,
    /// Daily calorie target (kcal)
    pub daily_calorie_target: f64,
    /// Protein target (g)
    pub protein_target_g: u32,
    /// Carbohydrate target (g)
    pub carbs_target_g: u32,
    /// Fat target (g)
    pub fats_target_g: u32,
    /// Protein share (%)
    pub protein_percentage: f64,
    /// Carbohydrate share (%)
    pub carbs_percentage: f64,
    /// Fat share (%)
    pub fats_percentage: f64,
    /// Absolute distance between current and target weight (kg)
    pub weight_difference_kg: f64,
    /// Weeks until the target date
    pub weeks_to_goal: f64,
    /// Days until the target date
    pub days_to_goal: i64,
    /// Weekly deficit or surplus magnitude (kcal)
    pub weekly_calorie_deficit: f64,
    /// Energy that has to be burned or added in total (kcal)
    pub total_calories_needed: f64,
    /// Weight to lose or gain per week, in grams
    pub weekly_fat_loss_g: f64,
    /// Whether the plan adds weight
    pub is_gaining_weight: bool,
    /// `weight` | `body_fat` | `both`
    pub goal_type: String,
    /// Realism score (0-100)
    pub realism_score: u8,
    /// Score at or above the realistic threshold
    pub is_realistic_goal: bool,
    /// Highest-priority explanation, only set when the goal is not realistic
    pub warning_message: Option<String>,
}
