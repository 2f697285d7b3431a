// ABOUTME: Nutrition configuration for energy estimation and macro allocation
// ABOUTME: Configures BMR coefficients, activity factors, intensity tiers, and legacy strategy names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204
//! - Activity factors: `McArdle`, Katch & Katch (2010) Exercise Physiology

use crate::config::error::ConfigError;
use crate::macro_allocator::MacroIntensity;
use serde::{Deserialize, Serialize};

/// Nutrition Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal Metabolic Rate (BMR) calculation settings
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Protein-anchored macro allocation
    pub macros: MacroAllocationConfig,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247. DOI: 10.1093/ajcn/51.2.241
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Mifflin-St Jeor weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Mifflin-St Jeor height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Mifflin-St Jeor age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Mifflin-St Jeor male constant (+5)
    pub msj_male_constant: f64,
    /// Mifflin-St Jeor female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Light (1-3 days/week): 1.375
    pub light: f64,
    /// Moderate (3-5 days/week): 1.55
    pub moderate: f64,
    /// Active (6-7 days/week): 1.725
    pub active: f64,
    /// Very active (hard training 2x/day): 1.9
    pub very_active: f64,
}

/// Protein anchor and remaining-calorie split for one intensity tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TierConfig {
    /// Protein per kilogram of body weight (g/kg)
    pub protein_g_per_kg: f64,
    /// Share of the calories left after protein that goes to carbohydrate (0-1)
    pub carb_share_of_remainder: f64,
    /// Share of the calories left after protein that goes to fat (0-1)
    pub fat_share_of_remainder: f64,
}

/// Intensity tier table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierTable {
    /// Entry tier: moderate protein, carb-leaning remainder
    pub rookie: TierConfig,
    /// Middle tier: athletic protein, balanced remainder
    pub warrior: TierConfig,
    /// Top tier: high protein, fat-leaning remainder
    pub elite: TierConfig,
}

impl TierTable {
    /// Configuration for one tier
    #[must_use]
    pub const fn get(&self, intensity: MacroIntensity) -> &TierConfig {
        match intensity {
            MacroIntensity::Rookie => &self.rookie,
            MacroIntensity::Warrior => &self.warrior,
            MacroIntensity::Elite => &self.elite,
        }
    }
}

/// One legacy `macro_strategy` value and the tier it migrates to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyStrategyMapping {
    /// Normalised legacy name (lowercase, underscores)
    pub legacy: String,
    /// Tier the legacy name resolves to
    pub tier: MacroIntensity,
}

/// Protein-anchored macro allocation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroAllocationConfig {
    /// Per-tier anchors and remainder splits
    pub tiers: TierTable,
    /// Fraction of target calories protein is clamped to when the anchor overshoots
    pub protein_clamp_ratio: f64,
    /// Fat share of calories below which the plan carries a warning (%)
    pub min_fat_percent_of_calories: f64,
    /// Smallest calorie target that gets a macro plan (kcal/day)
    pub min_target_calories: f64,
    /// Migration table for pre-tier strategy names
    pub legacy_strategies: Vec<LegacyStrategyMapping>,
}

impl MacroAllocationConfig {
    /// Tier a legacy name maps to, if the table knows it
    #[must_use]
    pub fn legacy_tier(&self, normalized: &str) -> Option<MacroIntensity> {
        self.legacy_strategies
            .iter()
            .find(|mapping| mapping.legacy == normalized)
            .map(|mapping| mapping.tier)
    }

    /// Validate tier shares and the legacy table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a split does not sum to 1.0, an anchor or the
    /// calorie floor is not positive, or a legacy name shadows a canonical tier
    /// or appears twice.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for intensity in MacroIntensity::ALL {
            let tier = self.tiers.get(intensity);
            if tier.protein_g_per_kg <= 0.0 || tier.protein_g_per_kg > 4.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "Protein anchors must be between 0 and 4 g/kg",
                ));
            }
            if !(0.0..=1.0).contains(&tier.carb_share_of_remainder)
                || !(0.0..=1.0).contains(&tier.fat_share_of_remainder)
            {
                return Err(ConfigError::ValueOutOfRange(
                    "Remainder shares must be between 0.0 and 1.0",
                ));
            }
            let share_sum = tier.carb_share_of_remainder + tier.fat_share_of_remainder;
            if (share_sum - 1.0).abs() > 1e-9 {
                return Err(ConfigError::InvalidWeights(
                    "Carb and fat remainder shares must sum to 1.0",
                ));
            }
        }

        if self.protein_clamp_ratio <= 0.0 || self.protein_clamp_ratio > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "protein_clamp_ratio must be in (0.0, 1.0]",
            ));
        }

        if !(self.min_target_calories.is_finite() && self.min_target_calories > 0.0) {
            return Err(ConfigError::ValueOutOfRange(
                "min_target_calories must be a positive number",
            ));
        }

        for (index, mapping) in self.legacy_strategies.iter().enumerate() {
            if MacroIntensity::from_canonical(&mapping.legacy).is_some() {
                return Err(ConfigError::InvalidMapping(format!(
                    "legacy name '{}' shadows a canonical tier",
                    mapping.legacy
                )));
            }
            if self.legacy_strategies[..index]
                .iter()
                .any(|earlier| earlier.legacy == mapping.legacy)
            {
                return Err(ConfigError::InvalidMapping(format!(
                    "legacy name '{}' is mapped twice",
                    mapping.legacy
                )));
            }
        }

        Ok(())
    }
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            active: 1.725,
            very_active: 1.9,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            rookie: TierConfig {
                protein_g_per_kg: 1.2,
                carb_share_of_remainder: 0.60,
                fat_share_of_remainder: 0.40,
            },
            warrior: TierConfig {
                protein_g_per_kg: 2.0,
                carb_share_of_remainder: 0.55,
                fat_share_of_remainder: 0.45,
            },
            elite: TierConfig {
                protein_g_per_kg: 2.5,
                carb_share_of_remainder: 0.40,
                fat_share_of_remainder: 0.60,
            },
        }
    }
}

impl Default for MacroAllocationConfig {
    fn default() -> Self {
        Self {
            tiers: TierTable::default(),
            protein_clamp_ratio: 0.9,
            min_fat_percent_of_calories: 20.0,
            // Very-low-calorie diet threshold; below it gram rounding skews the shares
            min_target_calories: 800.0,
            legacy_strategies: vec![
                LegacyStrategyMapping {
                    legacy: "high_protein".to_owned(),
                    tier: MacroIntensity::Warrior,
                },
                LegacyStrategyMapping {
                    legacy: "high_carb".to_owned(),
                    tier: MacroIntensity::Rookie,
                },
                LegacyStrategyMapping {
                    legacy: "low_carb".to_owned(),
                    tier: MacroIntensity::Elite,
                },
            ],
        }
    }
}
