// ABOUTME: Realism scoring for weight and body-fat goals against a target date
// ABOUTME: Piecewise rate penalty curve, timeframe and daily energy caps, labels and prioritized issues
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feasibility Scorer
//!
//! Scores a goal on a 0-100 scale. The weekly rate of change is compared with
//! a safe rate (a percentage of body weight for weight, percentage points for
//! body fat) and run through a piecewise-linear curve:
//!
//! ```text
//! rate / safe   score
//! <= 0.5        100
//!    1.0         80
//!    2.0         20
//! >= 4.0          0
//! ```
//!
//! Two caps apply on top: goals shorter than two weeks with a non-trivial
//! change, and daily deficits or surpluses above the sustainable limit.
//! Every cap and breakpoint comes from [`FeasibilityConfig`].
//!
//! The score never decreases when the timeframe grows and never increases
//! when the distance to travel grows.

use crate::config::{FeasibilityConfig, GoalsConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use vitalis_core::constants::{DAYS_PER_WEEK, PERCENT};

/// Current and target stats scored by [`score`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Current body weight (kg)
    pub current_weight_kg: Option<f64>,
    /// Target body weight (kg)
    pub target_weight_kg: Option<f64>,
    /// Current body fat (%)
    pub current_body_fat_pct: Option<f64>,
    /// Target body fat (%)
    pub target_body_fat_pct: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
}

/// Human-readable category for a score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RealismLabel {
    /// Moderate pace that can be held
    Sustainable,
    /// Achievable with consistent effort
    Challenging,
    /// Possible but demanding
    Ambitious,
    /// Unlikely to be safe or achievable
    TooAggressive,
}

impl RealismLabel {
    /// Display string for the label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sustainable => "moderate/sustainable",
            Self::Challenging => "challenging",
            Self::Ambitious => "ambitious",
            Self::TooAggressive => "too aggressive",
        }
    }
}

impl fmt::Display for RealismLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a goal lost points, in priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeasibilityIssue {
    /// Weight, target weight or target date missing
    IncompleteGoal,
    /// Target date is today or earlier
    TargetDatePassed,
    /// Non-trivial change in less than the minimum timeframe
    TimeframeTooShort {
        /// Days until the target date
        days: i64,
    },
    /// Daily deficit above the sustainable limit
    UnsustainableDeficit {
        /// Required daily deficit (kcal/day)
        daily_kcal: f64,
    },
    /// Daily surplus above the sustainable limit
    UnsustainableSurplus {
        /// Required daily surplus (kcal/day)
        daily_kcal: f64,
    },
    /// Weekly weight change above the safe rate
    WeightRateTooFast {
        /// Required weekly change (% of body weight)
        weekly_percent: f64,
    },
    /// Weekly body-fat change above the safe rate
    BodyFatRateTooFast {
        /// Required weekly change (percentage points)
        weekly_points: f64,
    },
}

impl FeasibilityIssue {
    /// Message suitable for a warning banner
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::IncompleteGoal => {
                "Set your weight, target weight and target date to assess this goal".to_owned()
            }
            Self::TargetDatePassed => "The target date has already passed".to_owned(),
            Self::TimeframeTooShort { days } => {
                format!("{days} days is too short for this change; allow at least two weeks")
            }
            Self::UnsustainableDeficit { daily_kcal } => format!(
                "A daily deficit of {daily_kcal:.0} kcal is not sustainable; extend the target date"
            ),
            Self::UnsustainableSurplus { daily_kcal } => format!(
                "A daily surplus of {daily_kcal:.0} kcal is not sustainable; extend the target date"
            ),
            Self::WeightRateTooFast { weekly_percent } => format!(
                "Changing {weekly_percent:.1}% of body weight per week is faster than recommended"
            ),
            Self::BodyFatRateTooFast { weekly_points } => format!(
                "Changing body fat by {weekly_points:.2} points per week is faster than recommended"
            ),
        }
    }
}

/// Score, label and the reasons behind them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealismAssessment {
    /// Realism score (0-100)
    pub score: u8,
    /// Category for the score
    pub label: RealismLabel,
    /// Score at or above the realistic threshold
    pub is_realistic: bool,
    /// Reasons the goal lost points, highest priority first
    pub issues: Vec<FeasibilityIssue>,
    /// Message of the highest-priority issue
    pub warning: Option<String>,
}

/// Realism score (0-100) for a goal
///
/// Returns 0 when the weight, target weight or target date is missing, or
/// when the target date is not after `today`.
#[must_use]
pub fn score(goal: &GoalSnapshot, today: NaiveDate, config: &GoalsConfig) -> u8 {
    evaluate(goal, today, config).0
}

/// Category for a score
#[must_use]
pub const fn label(score: u8, config: &FeasibilityConfig) -> RealismLabel {
    if score >= config.sustainable_min_score {
        RealismLabel::Sustainable
    } else if score >= config.challenging_min_score {
        RealismLabel::Challenging
    } else if score >= config.ambitious_min_score {
        RealismLabel::Ambitious
    } else {
        RealismLabel::TooAggressive
    }
}

/// Score a goal and explain it
#[must_use]
pub fn assess(goal: &GoalSnapshot, today: NaiveDate, config: &GoalsConfig) -> RealismAssessment {
    let (score, mut issues) = evaluate(goal, today, config);
    issues.sort_by_key(priority);
    let feasibility = &config.feasibility;

    RealismAssessment {
        score,
        label: label(score, feasibility),
        is_realistic: score >= feasibility.realistic_threshold,
        warning: issues.first().map(FeasibilityIssue::message),
        issues,
    }
}

const fn priority(issue: &FeasibilityIssue) -> u8 {
    match issue {
        FeasibilityIssue::IncompleteGoal => 0,
        FeasibilityIssue::TargetDatePassed => 1,
        FeasibilityIssue::TimeframeTooShort { .. } => 2,
        FeasibilityIssue::UnsustainableDeficit { .. }
        | FeasibilityIssue::UnsustainableSurplus { .. } => 3,
        FeasibilityIssue::WeightRateTooFast { .. } => 4,
        FeasibilityIssue::BodyFatRateTooFast { .. } => 5,
    }
}

fn evaluate(
    goal: &GoalSnapshot,
    today: NaiveDate,
    config: &GoalsConfig,
) -> (u8, Vec<FeasibilityIssue>) {
    let feasibility = &config.feasibility;
    let mut issues = Vec::new();

    let (Some(current), Some(target), Some(date)) = (
        goal.current_weight_kg.filter(|w| w.is_finite() && *w > 0.0),
        goal.target_weight_kg.filter(|w| w.is_finite() && *w > 0.0),
        goal.target_date,
    ) else {
        issues.push(FeasibilityIssue::IncompleteGoal);
        return (0, issues);
    };

    let days = (date - today).num_days();
    if days <= 0 {
        issues.push(FeasibilityIssue::TargetDatePassed);
        return (0, issues);
    }
    let days_f = days as f64;
    let weeks = days_f / DAYS_PER_WEEK;
    let short_timeframe = days < feasibility.min_timeframe_days;

    let delta_kg = (current - target).abs();
    let is_gaining = target > current;
    let mut score = PERCENT;

    if delta_kg > 0.0 {
        let weekly_percent = delta_kg / current * PERCENT / weeks;
        let safe_rate = if is_gaining {
            feasibility.safe_weekly_gain_percent
        } else {
            feasibility.safe_weekly_loss_percent
        };
        let ratio = weekly_percent / safe_rate;
        score = score.min(rate_score(ratio, feasibility));
        if ratio > 1.0 {
            issues.push(FeasibilityIssue::WeightRateTooFast { weekly_percent });
        }

        let daily_kcal = delta_kg * config.solver.kcal_per_kg / days_f;
        let limit = if is_gaining {
            feasibility.max_daily_surplus_kcal
        } else {
            feasibility.max_daily_deficit_kcal
        };
        if daily_kcal > limit {
            let cap = (feasibility.unsustainable_score_cap * (2.0 - daily_kcal / limit))
                .clamp(0.0, feasibility.unsustainable_score_cap);
            score = score.min(cap);
            issues.push(if is_gaining {
                FeasibilityIssue::UnsustainableSurplus { daily_kcal }
            } else {
                FeasibilityIssue::UnsustainableDeficit { daily_kcal }
            });
        }
    }

    let mut non_trivial_change = delta_kg > feasibility.trivial_weight_delta_kg;

    if let (Some(current_bf), Some(target_bf)) = (
        goal.current_body_fat_pct.filter(|v| v.is_finite()),
        goal.target_body_fat_pct.filter(|v| v.is_finite()),
    ) {
        let delta_points = (current_bf - target_bf).abs();
        if delta_points > 0.0 {
            let weekly_points = delta_points / weeks;
            let ratio = weekly_points / feasibility.safe_weekly_body_fat_points;
            score = score.min(rate_score(ratio, feasibility));
            if ratio > 1.0 {
                issues.push(FeasibilityIssue::BodyFatRateTooFast { weekly_points });
            }
        }
        non_trivial_change |= delta_points > feasibility.trivial_body_fat_delta;
    }

    if short_timeframe && non_trivial_change {
        score = score.min(feasibility.short_timeframe_score_cap);
        issues.push(FeasibilityIssue::TimeframeTooShort { days });
    }

    (to_score(score), issues)
}

/// Piecewise-linear score for a rate expressed as a multiple of the safe rate
fn rate_score(ratio: f64, config: &FeasibilityConfig) -> f64 {
    let relaxed = config.relaxed_rate_fraction;
    let at_safe = config.score_at_safe_rate;
    let at_double = config.score_at_double_rate;
    let zero_at = config.zero_score_rate_multiple;

    if !ratio.is_finite() {
        0.0
    } else if ratio <= relaxed {
        PERCENT
    } else if ratio <= 1.0 {
        (PERCENT - at_safe).mul_add(-(ratio - relaxed) / (1.0 - relaxed), PERCENT)
    } else if ratio <= 2.0 {
        (at_safe - at_double).mul_add(-(ratio - 1.0), at_safe)
    } else if ratio < zero_at {
        at_double * (zero_at - ratio) / (zero_at - 2.0)
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_score(value: f64) -> u8 {
    // Safe: clamped to [0, 100] before the cast
    value.round().clamp(0.0, PERCENT) as u8
}
