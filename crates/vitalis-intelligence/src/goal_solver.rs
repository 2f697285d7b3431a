// ABOUTME: Deficit and surplus solver deriving daily energy deltas from a weight goal and date
// ABOUTME: Goal definition types, direction resolution, and target calorie computation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Solver
//!
//! Converts "go from `current` kg to `target` kg by `date`" into an energy
//! budget. The deficit is always stored as a magnitude; which way the weight
//! moves is carried by [`DeficitPlan::is_gaining`]. Keeping the two apart
//! avoids double negation when the plan is combined with the user's declared
//! goal, which can disagree with the raw weight comparison.

use crate::config::GoalSolverConfig;
use crate::normalize_choice;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use vitalis_core::constants::DAYS_PER_WEEK;
use vitalis_core::errors::AppError;

/// Direction the user declared for their weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    /// Caloric deficit
    Lose,
    /// Caloric balance
    Maintain,
    /// Caloric surplus
    Gain,
}

impl WeightGoal {
    /// Sign applied to the daily delta when computing target calories
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Lose => -1.0,
            Self::Maintain => 0.0,
            Self::Gain => 1.0,
        }
    }
}

impl FromStr for WeightGoal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "lose" => Ok(Self::Lose),
            "maintain" => Ok(Self::Maintain),
            "gain" => Ok(Self::Gain),
            _ => Err(AppError::invalid_domain_value("goal", s)),
        }
    }
}

impl fmt::Display for WeightGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        })
    }
}

/// What the goal is expressed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    /// Target body weight only
    Weight,
    /// Target body fat only
    BodyFat,
    /// Both targets
    Both,
}

impl GoalType {
    /// Whether a target weight is required
    #[must_use]
    pub const fn needs_weight(self) -> bool {
        matches!(self, Self::Weight | Self::Both)
    }

    /// Whether a target body fat is required
    #[must_use]
    pub const fn needs_body_fat(self) -> bool {
        matches!(self, Self::BodyFat | Self::Both)
    }
}

impl FromStr for GoalType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "weight" => Ok(Self::Weight),
            "body_fat" => Ok(Self::BodyFat),
            "both" => Ok(Self::Both),
            _ => Err(AppError::invalid_domain_value("goal type", s)),
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weight => "weight",
            Self::BodyFat => "body_fat",
            Self::Both => "both",
        })
    }
}

/// User goal as entered on the profile form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    /// What the goal is expressed in
    pub goal_type: GoalType,
    /// Weight when the goal was started (kg)
    pub start_weight_kg: Option<f64>,
    /// Target weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Target body fat (%)
    pub target_body_fat_pct: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
}

/// Result of checking a [`GoalSpec`] against its own invariants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalSpecReport {
    /// Fields required by the goal type that are not set
    pub missing_fields: Vec<&'static str>,
    /// Target date set and not in the past
    pub date_actionable: bool,
}

impl GoalSpecReport {
    /// Complete and dated today or later
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.missing_fields.is_empty() && self.date_actionable
    }
}

impl GoalSpec {
    /// Check required targets for the goal type and the target date
    #[must_use]
    pub fn validate(&self, today: NaiveDate) -> GoalSpecReport {
        let mut missing_fields = Vec::new();
        if self.goal_type.needs_weight() && self.target_weight_kg.is_none() {
            missing_fields.push("target_weight_kg");
        }
        if self.goal_type.needs_body_fat() && self.target_body_fat_pct.is_none() {
            missing_fields.push("target_body_fat_pct");
        }
        if self.target_date.is_none() {
            missing_fields.push("target_date");
        }

        GoalSpecReport {
            missing_fields,
            date_actionable: self.target_date.is_some_and(|date| date >= today),
        }
    }
}

/// Energy budget for reaching a target weight by a date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeficitPlan {
    /// Daily deficit or surplus magnitude (kcal/day, never negative)
    pub daily_kcal_delta: f64,
    /// Weekly deficit or surplus magnitude (kcal/week)
    pub weekly_kcal_delta: f64,
    /// Energy to burn or add over the whole period (kcal)
    pub total_kcal_needed: f64,
    /// Days until the target date
    pub days_to_goal: i64,
    /// Weeks until the target date
    pub weeks_to_goal: f64,
    /// Absolute distance between current and target weight (kg)
    pub weight_difference_kg: f64,
    /// Target weight is above current weight
    pub is_gaining: bool,
}

impl DeficitPlan {
    /// Direction implied by the weight comparison
    #[must_use]
    pub fn direction(&self) -> WeightGoal {
        if self.weight_difference_kg == 0.0 {
            WeightGoal::Maintain
        } else if self.is_gaining {
            WeightGoal::Gain
        } else {
            WeightGoal::Lose
        }
    }

    /// Daily delta with sign: negative for a deficit, positive for a surplus
    #[must_use]
    pub fn signed_daily_kcal(&self) -> f64 {
        self.direction().sign() * self.daily_kcal_delta
    }
}

/// Solve the daily deficit/surplus needed to reach `target_weight` by `target_date`
///
/// Algorithm:
/// - `total = |current - target| x kcal_per_kg`
/// - `daily = round(total / days_remaining)`, `weekly = daily x 7`
/// - `is_gaining = target > current`
///
/// Returns `None` if either weight is missing or not positive, or if the
/// target date is not after `today` (guards the division).
#[must_use]
pub fn solve_deficit(
    current_weight_kg: Option<f64>,
    target_weight_kg: Option<f64>,
    target_date: Option<NaiveDate>,
    today: NaiveDate,
    config: &GoalSolverConfig,
) -> Option<DeficitPlan> {
    let current = current_weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let target = target_weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
    let days_remaining = (target_date? - today).num_days();
    if days_remaining <= 0 {
        return None;
    }

    let weight_difference_kg = (current - target).abs();
    let total_kcal_needed = weight_difference_kg * config.kcal_per_kg;
    let daily_kcal_delta = (total_kcal_needed / days_remaining as f64).round();

    Some(DeficitPlan {
        daily_kcal_delta,
        weekly_kcal_delta: daily_kcal_delta * DAYS_PER_WEEK,
        total_kcal_needed,
        days_to_goal: days_remaining,
        weeks_to_goal: days_remaining as f64 / DAYS_PER_WEEK,
        weight_difference_kg,
        is_gaining: target > current,
    })
}

/// Target calories: `tdee + sign(goal) x |daily_delta|`
#[must_use]
pub fn calculate_target_calories(tdee: f64, goal: WeightGoal, daily_delta: f64) -> f64 {
    goal.sign().mul_add(daily_delta.abs(), tdee)
}

/// Direction that governs target calories
///
/// The plan's `is_gaining` flag wins over the stored goal; a disagreement is
/// logged so stale profile data can be spotted.
#[must_use]
pub fn resolve_direction(declared: Option<WeightGoal>, plan: &DeficitPlan) -> WeightGoal {
    let implied = plan.direction();
    if let Some(declared) = declared {
        if declared != implied {
            warn!(
                declared = %declared,
                implied = %implied,
                "Declared goal disagrees with weight comparison; using weight comparison"
            );
        }
    }
    implied
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_solve_deficit_reference_case() {
        let plan = solve_deficit(
            Some(90.0),
            Some(80.0),
            Some(today() + Duration::days(70)),
            today(),
            &GoalSolverConfig::default(),
        )
        .unwrap();

        assert!((plan.total_kcal_needed - 77_000.0).abs() < 1e-6);
        assert!((plan.daily_kcal_delta - 1100.0).abs() < 1e-9);
        assert!((plan.weekly_kcal_delta - 7700.0).abs() < 1e-9);
        assert!(!plan.is_gaining);
        assert_eq!(plan.days_to_goal, 70);
        assert!((plan.weeks_to_goal - 10.0).abs() < 1e-9);
        assert_eq!(plan.direction(), WeightGoal::Lose);
        assert!((plan.signed_daily_kcal() + 1100.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_deficit_gaining() {
        let plan = solve_deficit(
            Some(60.0),
            Some(63.0),
            Some(today() + Duration::days(84)),
            today(),
            &GoalSolverConfig::default(),
        )
        .unwrap();
        assert!(plan.is_gaining);
        assert_eq!(plan.direction(), WeightGoal::Gain);
        assert!((plan.daily_kcal_delta - 275.0).abs() < 1e-9);
        assert!(plan.signed_daily_kcal() > 0.0);
    }

    #[test]
    fn test_solve_deficit_degenerate_inputs() {
        let config = GoalSolverConfig::default();
        let future = Some(today() + Duration::days(30));
        assert!(solve_deficit(None, Some(80.0), future, today(), &config).is_none());
        assert!(solve_deficit(Some(90.0), None, future, today(), &config).is_none());
        assert!(solve_deficit(Some(90.0), Some(80.0), None, today(), &config).is_none());
        assert!(solve_deficit(Some(90.0), Some(80.0), Some(today()), today(), &config).is_none());
        assert!(solve_deficit(
            Some(90.0),
            Some(80.0),
            Some(today() - Duration::days(3)),
            today(),
            &config
        )
        .is_none());
    }

    #[test]
    fn test_kcal_per_kg_is_configurable() {
        let config = GoalSolverConfig { kcal_per_kg: 7000.0 };
        let plan = solve_deficit(
            Some(90.0),
            Some(80.0),
            Some(today() + Duration::days(70)),
            today(),
            &config,
        )
        .unwrap();
        assert!((plan.daily_kcal_delta - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_calories_sign_per_goal() {
        assert!((calculate_target_calories(2500.0, WeightGoal::Lose, 500.0) - 2000.0).abs() < 1e-9);
        assert!((calculate_target_calories(2500.0, WeightGoal::Gain, 300.0) - 2800.0).abs() < 1e-9);
        assert!(
            (calculate_target_calories(2500.0, WeightGoal::Maintain, 300.0) - 2500.0).abs() < 1e-9
        );
        // Magnitude only: a negative delta does not flip the direction
        assert!(
            (calculate_target_calories(2500.0, WeightGoal::Lose, -500.0) - 2000.0).abs() < 1e-9
        );
    }

    #[test]
    fn test_plan_direction_wins_over_declared_goal() {
        let plan = solve_deficit(
            Some(70.0),
            Some(75.0),
            Some(today() + Duration::days(100)),
            today(),
            &GoalSolverConfig::default(),
        )
        .unwrap();
        assert_eq!(resolve_direction(Some(WeightGoal::Lose), &plan), WeightGoal::Gain);
        assert_eq!(resolve_direction(None, &plan), WeightGoal::Gain);
    }

    #[test]
    fn test_equal_weights_maintain() {
        let plan = solve_deficit(
            Some(70.0),
            Some(70.0),
            Some(today() + Duration::days(10)),
            today(),
            &GoalSolverConfig::default(),
        )
        .unwrap();
        assert_eq!(plan.direction(), WeightGoal::Maintain);
        assert!(plan.daily_kcal_delta.abs() < f64::EPSILON);
    }

    #[test]
    fn test_goal_spec_validation() {
        let spec = GoalSpec {
            goal_type: GoalType::Both,
            start_weight_kg: Some(90.0),
            target_weight_kg: Some(80.0),
            target_body_fat_pct: None,
            target_date: Some(today() - Duration::days(1)),
        };
        let report = spec.validate(today());
        assert_eq!(report.missing_fields, vec!["target_body_fat_pct"]);
        assert!(!report.date_actionable);
        assert!(!report.is_actionable());

        let weight_only = GoalSpec {
            goal_type: GoalType::Weight,
            target_body_fat_pct: None,
            target_date: Some(today()),
            ..spec
        };
        assert!(weight_only.validate(today()).is_actionable());
    }

    #[test]
    fn test_goal_enums_reject_unknown_values() {
        assert!("shred".parse::<WeightGoal>().unwrap_err().code.is_fatal());
        assert!("muscle".parse::<GoalType>().unwrap_err().code.is_fatal());
        assert_eq!("body-fat".parse::<GoalType>().unwrap(), GoalType::BodyFat);
    }
}
