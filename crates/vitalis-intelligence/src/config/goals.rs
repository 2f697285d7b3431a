// ABOUTME: Goal configuration for the deficit solver and the feasibility scorer
// ABOUTME: Holds the kcal-per-kg approximation, safe rate bounds, and the realism penalty curve
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Goal Configuration
//!
//! The realism penalty curve is policy, not physiology. Every threshold is
//! exposed here so a deployment can tune it without touching the scorer.

use crate::config::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Goal configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Deficit/surplus solver settings
    pub solver: GoalSolverConfig,
    /// Realism scoring settings
    pub feasibility: FeasibilityConfig,
}

/// Deficit solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSolverConfig {
    /// Energy equivalent of one kilogram of body mass change (kcal/kg)
    ///
    /// 7700 is the common fat-tissue approximation; it is not metabolically exact.
    pub kcal_per_kg: f64,
}

/// Feasibility (realism) scoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilityConfig {
    /// Weekly loss rate considered safe (% of body weight)
    pub safe_weekly_loss_percent: f64,
    /// Weekly gain rate considered safe (% of body weight)
    pub safe_weekly_gain_percent: f64,
    /// Fraction of the safe rate at or below which a goal scores 100
    pub relaxed_rate_fraction: f64,
    /// Score when the rate equals the safe rate
    pub score_at_safe_rate: f64,
    /// Score when the rate is twice the safe rate
    pub score_at_double_rate: f64,
    /// Multiple of the safe rate at which the score reaches 0
    pub zero_score_rate_multiple: f64,
    /// Shortest timeframe for a non-trivial change (days)
    pub min_timeframe_days: i64,
    /// Score ceiling when the timeframe is shorter than `min_timeframe_days`
    pub short_timeframe_score_cap: f64,
    /// Weight change treated as trivial (kg)
    pub trivial_weight_delta_kg: f64,
    /// Largest sustainable daily deficit when losing (kcal/day)
    pub max_daily_deficit_kcal: f64,
    /// Largest sustainable daily surplus when gaining (kcal/day)
    pub max_daily_surplus_kcal: f64,
    /// Score ceiling just beyond the daily deficit/surplus limit
    pub unsustainable_score_cap: f64,
    /// Body-fat change per week considered safe (percentage points)
    pub safe_weekly_body_fat_points: f64,
    /// Body-fat change treated as trivial (percentage points)
    pub trivial_body_fat_delta: f64,
    /// Lower bound of the "sustainable" label
    pub sustainable_min_score: u8,
    /// Lower bound of the "challenging" label
    pub challenging_min_score: u8,
    /// Lower bound of the "ambitious" label; below is "too aggressive"
    pub ambitious_min_score: u8,
    /// Scores at or above this are reported as realistic
    pub realistic_threshold: u8,
}

impl FeasibilityConfig {
    /// Validate curve ordering and label thresholds
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the curve is not monotonic or thresholds overlap
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.safe_weekly_loss_percent <= 0.0 || self.safe_weekly_gain_percent <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Safe weekly rates must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.relaxed_rate_fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "relaxed_rate_fraction must be in [0.0, 1.0)",
            ));
        }
        if !(self.score_at_double_rate < self.score_at_safe_rate
            && self.score_at_safe_rate <= 100.0
            && self.score_at_double_rate >= 0.0)
        {
            return Err(ConfigError::InvalidRange(
                "score_at_double_rate must be < score_at_safe_rate <= 100",
            ));
        }
        if self.zero_score_rate_multiple <= 2.0 {
            return Err(ConfigError::InvalidRange(
                "zero_score_rate_multiple must be > 2.0",
            ));
        }
        if self.min_timeframe_days < 1 {
            return Err(ConfigError::ValueOutOfRange(
                "min_timeframe_days must be at least 1",
            ));
        }
        if self.max_daily_deficit_kcal <= 0.0 || self.max_daily_surplus_kcal <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "Daily deficit and surplus limits must be positive",
            ));
        }
        if self.safe_weekly_body_fat_points <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "safe_weekly_body_fat_points must be positive",
            ));
        }
        if !(self.ambitious_min_score < self.challenging_min_score
            && self.challenging_min_score < self.sustainable_min_score
            && self.sustainable_min_score <= 100)
        {
            return Err(ConfigError::InvalidRange(
                "Label thresholds must satisfy ambitious < challenging < sustainable <= 100",
            ));
        }
        if self.realistic_threshold > 100 {
            return Err(ConfigError::ValueOutOfRange(
                "realistic_threshold must be <= 100",
            ));
        }
        Ok(())
    }
}

impl Default for GoalSolverConfig {
    fn default() -> Self {
        Self {
            kcal_per_kg: 7700.0,
        }
    }
}

impl Default for FeasibilityConfig {
    fn default() -> Self {
        Self {
            safe_weekly_loss_percent: 1.0,
            safe_weekly_gain_percent: 0.5,
            relaxed_rate_fraction: 0.5,
            score_at_safe_rate: 80.0,
            score_at_double_rate: 20.0,
            zero_score_rate_multiple: 4.0,
            min_timeframe_days: 14,
            short_timeframe_score_cap: 5.0,
            trivial_weight_delta_kg: 0.5,
            max_daily_deficit_kcal: 1000.0,
            max_daily_surplus_kcal: 800.0,
            unsustainable_score_cap: 50.0,
            safe_weekly_body_fat_points: 0.25,
            trivial_body_fat_delta: 0.5,
            sustainable_min_score: 80,
            challenging_min_score: 60,
            ambitious_min_score: 40,
            realistic_threshold: 60,
        }
    }
}
