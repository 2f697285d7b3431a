// ABOUTME: Calculator configuration for energy, goal, macro, and feasibility computations
// ABOUTME: Orchestrates domain-specific configs and provides unified validation and loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Every policy constant the calculators use is reachable from
//! [`IntelligenceConfig`]. Defaults match the documented product behaviour;
//! environment variables prefixed `VITALIS_` override individual values.
//!
//! # Module Structure
//!
//! - `nutrition` - BMR coefficients, activity factors, intensity tiers
//! - `goals` - Deficit solver and realism scoring curve
//! - `error` - Validation errors

pub mod error;
pub mod goals;
pub mod nutrition;

pub use error::ConfigError;
pub use goals::{FeasibilityConfig, GoalSolverConfig, GoalsConfig};
pub use nutrition::{
    ActivityFactorsConfig, BmrConfig, LegacyStrategyMapping, MacroAllocationConfig,
    NutritionConfig, TierConfig, TierTable,
};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Main calculator configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Energy estimation and macro allocation
    pub nutrition: NutritionConfig,
    /// Deficit solving and realism scoring
    pub goals: GoalsConfig,
}

impl IntelligenceConfig {
    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first inconsistent value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bmr = &self.nutrition.bmr;
        if bmr.msj_weight_coef <= 0.0 || bmr.msj_height_coef <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR weight and height coefficients must be positive",
            ));
        }
        if bmr.msj_age_coef >= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "BMR age coefficient must be negative",
            ));
        }

        let factors = &self.nutrition.activity_factors;
        if factors.sedentary < 1.0 || factors.very_active > 2.5 {
            return Err(ConfigError::ValueOutOfRange(
                "Activity factors must be between 1.0 and 2.5",
            ));
        }
        if factors.sedentary >= factors.light
            || factors.light >= factors.moderate
            || factors.moderate >= factors.active
            || factors.active >= factors.very_active
        {
            return Err(ConfigError::InvalidRange(
                "Activity factors must be in ascending order",
            ));
        }

        self.nutrition.macros.validate()?;

        if self.goals.solver.kcal_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("kcal_per_kg must be positive"));
        }
        self.goals.feasibility.validate()?;

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Goal solver
        Self::apply_env_var("VITALIS_KCAL_PER_KG", &mut self.goals.solver.kcal_per_kg)?;

        // Protein anchors
        let tiers = &mut self.nutrition.macros.tiers;
        Self::apply_env_var(
            "VITALIS_PROTEIN_ANCHOR_ROOKIE",
            &mut tiers.rookie.protein_g_per_kg,
        )?;
        Self::apply_env_var(
            "VITALIS_PROTEIN_ANCHOR_WARRIOR",
            &mut tiers.warrior.protein_g_per_kg,
        )?;
        Self::apply_env_var(
            "VITALIS_PROTEIN_ANCHOR_ELITE",
            &mut tiers.elite.protein_g_per_kg,
        )?;
        Self::apply_env_var(
            "VITALIS_PROTEIN_CLAMP_RATIO",
            &mut self.nutrition.macros.protein_clamp_ratio,
        )?;
        Self::apply_env_var(
            "VITALIS_MIN_TARGET_CALORIES",
            &mut self.nutrition.macros.min_target_calories,
        )?;

        // Feasibility curve
        let feasibility = &mut self.goals.feasibility;
        Self::apply_env_var(
            "VITALIS_SAFE_WEEKLY_LOSS_PERCENT",
            &mut feasibility.safe_weekly_loss_percent,
        )?;
        Self::apply_env_var(
            "VITALIS_SAFE_WEEKLY_GAIN_PERCENT",
            &mut feasibility.safe_weekly_gain_percent,
        )?;
        Self::apply_env_var(
            "VITALIS_MAX_DAILY_DEFICIT_KCAL",
            &mut feasibility.max_daily_deficit_kcal,
        )?;
        Self::apply_env_var(
            "VITALIS_MAX_DAILY_SURPLUS_KCAL",
            &mut feasibility.max_daily_surplus_kcal,
        )?;
        Self::apply_env_var(
            "VITALIS_MIN_TIMEFRAME_DAYS",
            &mut feasibility.min_timeframe_days,
        )?;
        Self::apply_env_var(
            "VITALIS_REALISTIC_THRESHOLD",
            &mut feasibility.realistic_threshold,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macro_allocator::MacroIntensity;

    #[test]
    fn test_default_config_is_valid() {
        IntelligenceConfig::default().validate().unwrap();
    }

    #[test]
    fn test_unordered_activity_factors_rejected() {
        let mut config = IntelligenceConfig::default();
        config.nutrition.activity_factors.light = 1.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_tier_split_must_sum_to_one() {
        let mut config = IntelligenceConfig::default();
        config.nutrition.macros.tiers.warrior.fat_share_of_remainder = 0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_legacy_name_cannot_shadow_tier() {
        let mut config = IntelligenceConfig::default();
        config
            .nutrition
            .macros
            .legacy_strategies
            .push(LegacyStrategyMapping {
                legacy: "elite".to_owned(),
                tier: MacroIntensity::Rookie,
            });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMapping(_))
        ));
    }

    #[test]
    fn test_calorie_floor_must_be_positive() {
        for floor in [0.0, -800.0, f64::NAN] {
            let mut config = IntelligenceConfig::default();
            config.nutrition.macros.min_target_calories = floor;
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ValueOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_label_thresholds_must_be_ordered() {
        let mut config = IntelligenceConfig::default();
        config.goals.feasibility.challenging_min_score = 90;
        assert!(config.validate().is_err());
    }
}
