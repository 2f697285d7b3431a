// ABOUTME: Planning pipeline running energy, goal, macro, and feasibility calculators in order
// ABOUTME: Converts profile records to typed inputs and plans back into profile and daily goals records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planner
//!
//! Runs the calculators in data-dependency order:
//! energy -> deficit -> target calories -> macros -> realism.
//! Every stage is optional, so an incomplete profile yields a partial plan
//! rather than an error.

use crate::config::IntelligenceConfig;
use crate::feasibility::{self, GoalSnapshot, RealismAssessment};
use crate::goal_solver::{self, DeficitPlan, GoalType, WeightGoal};
use crate::macro_allocator::{self, MacroIntensity, MacroPlan};
use crate::nutrition_calculator::{self, ActivityLevel, EnergyResult, Gender};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;
use vitalis_core::constants::GRAMS_PER_KG;
use vitalis_core::errors::{AppError, AppResult};
use vitalis_core::models::{DailyGoalsRecord, ProfileRecord};

/// Tier used when the profile has no macro strategy yet
pub const DEFAULT_INTENSITY: MacroIntensity = MacroIntensity::Rookie;

/// Typed calculator inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    /// Current body weight (kg)
    pub weight_kg: Option<f64>,
    /// Height (cm)
    pub height_cm: Option<u32>,
    /// Age (years)
    pub age: Option<u32>,
    /// Sex for the BMR constant
    pub gender: Option<Gender>,
    /// Activity multiplier selector
    pub activity_level: Option<ActivityLevel>,
    /// Declared direction
    pub goal: Option<WeightGoal>,
    /// What the goal is expressed in
    pub goal_type: Option<GoalType>,
    /// Target body weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
    /// Current body fat (%)
    pub body_fat_pct: Option<f64>,
    /// Target body fat (%)
    pub target_body_fat_pct: Option<f64>,
    /// Macro intensity tier
    pub intensity: Option<MacroIntensity>,
}

impl PlanInputs {
    /// Parse the user-entered fields of a profile record
    ///
    /// Legacy `macro_strategy` names are migrated through the configured table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomainValue` if any enum-like field holds a value the
    /// calculators do not know.
    pub fn from_profile(record: &ProfileRecord, config: &IntelligenceConfig) -> AppResult<Self> {
        Ok(Self {
            weight_kg: record.weight,
            height_cm: record.height,
            age: record.age,
            gender: parse_field(record.gender.as_deref())?,
            activity_level: parse_field(record.activity_level.as_deref())?,
            goal: parse_field(record.goal.as_deref())?,
            goal_type: parse_field(record.goal_type.as_deref())?,
            target_weight_kg: record.target_weight,
            target_date: record.target_date,
            body_fat_pct: record.body_fat_percentage,
            target_body_fat_pct: record.target_body_fat_percentage,
            intensity: record
                .macro_strategy
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| MacroIntensity::resolve(raw, &config.nutrition.macros))
                .transpose()?,
        })
    }
}

fn parse_field<T>(raw: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr<Err = AppError>,
{
    raw.filter(|value| !value.trim().is_empty())
        .map(str::parse)
        .transpose()
}

/// Combined output of one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// BMR and TDEE
    pub energy: EnergyResult,
    /// Deficit or surplus needed to hit the target weight on time
    pub deficit: Option<DeficitPlan>,
    /// Direction applied to the target calories
    pub direction: WeightGoal,
    /// Daily calorie target (kcal)
    pub target_calories: Option<f64>,
    /// Tier the macros were allocated with
    pub intensity: MacroIntensity,
    /// Gram and percentage targets
    pub macros: Option<MacroPlan>,
    /// Realism score and explanation
    pub realism: RealismAssessment,
    /// What the goal is expressed in
    pub goal_type: Option<GoalType>,
    /// Energy per kilogram the plan was solved with
    pub kcal_per_kg: f64,
}

impl NutritionPlan {
    /// Everything needed for a daily goals record is present
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.target_calories.is_some() && self.macros.is_some() && self.deficit.is_some()
    }

    /// Write the engine-owned fields of a profile record
    ///
    /// Fields this plan could not compute are cleared, so stale targets never
    /// outlive the inputs they were derived from.
    pub fn apply_to(&self, record: &mut ProfileRecord) {
        record.clear_derived();
        record.bmr = self.energy.bmr_kcal.map(round_kcal);
        record.tdee = self.energy.tdee_kcal.map(round_kcal);
        record.daily_calorie_target = self.target_calories;
        record.calorie_deficit = self.deficit.map(|deficit| deficit.daily_kcal_delta);
        if let Some(macros) = &self.macros {
            record.protein_target_g = Some(macros.protein_g);
            record.carbs_target_g = Some(macros.carb_g);
            record.fats_target_g = Some(macros.fat_g);
            record.protein_percentage = Some(macros.protein_pct);
            record.carbs_percentage = Some(macros.carb_pct);
            record.fats_percentage = Some(macros.fat_pct);
        }
    }

    /// Daily goals record for `date`, when the plan is complete
    #[must_use]
    pub fn daily_goals(&self, user_id: Uuid, date: NaiveDate) -> Option<DailyGoalsRecord> {
        let (Some(target_calories), Some(macros), Some(deficit)) =
            (self.target_calories, self.macros.as_ref(), self.deficit)
        else {
            return None;
        };

        let is_realistic_goal = self.realism.is_realistic;
        let warning_message = (!is_realistic_goal).then(|| {
            self.realism
                .warning
                .clone()
                .unwrap_or_else(|| format!("This goal looks {}", self.realism.label))
        });

        Some(DailyGoalsRecord {
            user_id,
            date,
            daily_calorie_target: target_calories,
            protein_target_g: macros.protein_g,
            carbs_target_g: macros.carb_g,
            fats_target_g: macros.fat_g,
            protein_percentage: macros.protein_pct,
            carbs_percentage: macros.carb_pct,
            fats_percentage: macros.fat_pct,
            weight_difference_kg: deficit.weight_difference_kg,
            weeks_to_goal: (deficit.weeks_to_goal * 10.0).round() / 10.0,
            days_to_goal: deficit.days_to_goal,
            weekly_calorie_deficit: deficit.weekly_kcal_delta,
            total_calories_needed: deficit.total_kcal_needed,
            weekly_fat_loss_g: (deficit.weekly_kcal_delta / self.kcal_per_kg
                * GRAMS_PER_KG)
                .round(),
            is_gaining_weight: deficit.is_gaining,
            goal_type: self.goal_type.unwrap_or(GoalType::Weight).to_string(),
            realism_score: self.realism.score,
            is_realistic_goal,
            warning_message,
        })
    }
}

/// Run every calculator in dependency order
///
/// Target calories are `tdee +/- daily delta` in the direction implied by the
/// weight comparison. Without a deficit plan the target is maintenance
/// (`tdee`).
#[must_use]
pub fn plan(inputs: &PlanInputs, today: NaiveDate, config: &IntelligenceConfig) -> NutritionPlan {
    let energy = nutrition_calculator::estimate_energy(
        inputs.weight_kg,
        inputs.height_cm,
        inputs.age,
        inputs.gender,
        inputs.activity_level,
        &config.nutrition,
    );

    let deficit = goal_solver::solve_deficit(
        inputs.weight_kg,
        inputs.target_weight_kg,
        inputs.target_date,
        today,
        &config.goals.solver,
    );

    let direction = deficit.as_ref().map_or(WeightGoal::Maintain, |deficit| {
        goal_solver::resolve_direction(inputs.goal, deficit)
    });

    let target_calories = energy.tdee_kcal.and_then(|tdee| {
        let delta = deficit.map_or(0.0, |deficit| deficit.daily_kcal_delta);
        let calories = round_kcal(goal_solver::calculate_target_calories(tdee, direction, delta));
        (calories.is_finite() && calories > 0.0).then_some(calories)
    });

    let intensity = inputs.intensity.unwrap_or(DEFAULT_INTENSITY);
    let macros = inputs.weight_kg.zip(target_calories).and_then(|(weight, calories)| {
        macro_allocator::allocate(intensity, weight, calories, &config.nutrition.macros)
    });

    let realism = feasibility::assess(
        &GoalSnapshot {
            current_weight_kg: inputs.weight_kg,
            target_weight_kg: inputs.target_weight_kg,
            current_body_fat_pct: inputs.body_fat_pct,
            target_body_fat_pct: inputs.target_body_fat_pct,
            target_date: inputs.target_date,
        },
        today,
        &config.goals,
    );

    debug!(
        bmr = ?energy.bmr_kcal,
        tdee = ?energy.tdee_kcal,
        target_calories = ?target_calories,
        direction = %direction,
        intensity = %intensity,
        realism_score = realism.score,
        "Recomputed nutrition plan"
    );

    NutritionPlan {
        energy,
        deficit,
        direction,
        target_calories,
        intensity,
        macros,
        realism,
        goal_type: inputs.goal_type,
        kcal_per_kg: config.goals.solver.kcal_per_kg,
    }
}

fn round_kcal(kcal: f64) -> f64 {
    kcal.round()
}
