// ABOUTME: Protein-anchored macro allocation across rookie, warrior, and elite intensity tiers
// ABOUTME: Splits target calories into gram targets and back-derives percentages from grams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Macro Allocator
//!
//! Protein is anchored to body weight first; the calories left over are split
//! between carbohydrate and fat by a per-tier ratio. Grams are the single
//! source of truth. Percentages are a read-only projection recomputed from the
//! grams every time a plan is built.
//!
//! # Scientific References
//!
//! - Phillips, S.M., & Van Loon, L.J. (2011). Dietary protein for athletes.
//!   *Journal of Sports Sciences*, 29(S1), S29-S38.
//!   <https://doi.org/10.1080/02640414.2011.619204>

use crate::config::MacroAllocationConfig;
use crate::normalize_choice;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use vitalis_core::constants::{KCAL_PER_G_CARB, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN, PERCENT};
use vitalis_core::errors::{AppError, AppResult};

/// Intensity tier selecting the protein anchor and remainder split
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MacroIntensity {
    /// 1.2 g/kg protein by default
    Rookie,
    /// 2.0 g/kg protein by default
    Warrior,
    /// 2.5 g/kg protein by default
    Elite,
}

impl MacroIntensity {
    /// Every tier in ascending order of intensity
    pub const ALL: [Self; 3] = [Self::Rookie, Self::Warrior, Self::Elite];

    /// Canonical tier for a name, without consulting the legacy table
    #[must_use]
    pub fn from_canonical(raw: &str) -> Option<Self> {
        match normalize_choice(raw).as_str() {
            "rookie" => Some(Self::Rookie),
            "warrior" => Some(Self::Warrior),
            "elite" => Some(Self::Elite),
            _ => None,
        }
    }

    /// Resolve a stored `macro_strategy` value to a tier
    ///
    /// Canonical names map to themselves. Legacy names go through the
    /// configured migration table.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomainValue` for a value that is neither canonical nor
    /// a known legacy name. The value is logged before rejecting it.
    pub fn resolve(raw: &str, config: &MacroAllocationConfig) -> AppResult<Self> {
        if let Some(tier) = Self::from_canonical(raw) {
            return Ok(tier);
        }
        if let Some(tier) = config.legacy_tier(&normalize_choice(raw)) {
            return Ok(tier);
        }
        warn!(macro_strategy = raw, "Unmapped macro strategy value");
        Err(AppError::invalid_domain_value("macro strategy", raw))
    }
}

impl FromStr for MacroIntensity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_canonical(s).ok_or_else(|| AppError::invalid_domain_value("intensity", s))
    }
}

impl fmt::Display for MacroIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rookie => "rookie",
            Self::Warrior => "warrior",
            Self::Elite => "elite",
        })
    }
}

/// Daily macronutrient targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroPlan {
    /// Calories the plan was built for (kcal/day)
    pub target_calories: f64,
    /// Protein (g/day)
    pub protein_g: u32,
    /// Carbohydrate (g/day)
    pub carb_g: u32,
    /// Fat (g/day)
    pub fat_g: u32,
    /// Protein share of target calories (%)
    pub protein_pct: f64,
    /// Carbohydrate share of target calories (%)
    pub carb_pct: f64,
    /// Fat share of target calories (%)
    pub fat_pct: f64,
    /// Adjustments made while allocating
    pub warnings: Vec<String>,
}

impl MacroPlan {
    /// Build a plan from grams, deriving the percentages
    #[must_use]
    pub fn from_grams(target_calories: f64, protein_g: u32, carb_g: u32, fat_g: u32) -> Self {
        let share = |kcal: f64| round_one_decimal(kcal / target_calories * PERCENT);
        Self {
            target_calories,
            protein_g,
            carb_g,
            fat_g,
            protein_pct: share(f64::from(protein_g) * KCAL_PER_G_PROTEIN),
            carb_pct: share(f64::from(carb_g) * KCAL_PER_G_CARB),
            fat_pct: share(f64::from(fat_g) * KCAL_PER_G_FAT),
            warnings: Vec::new(),
        }
    }

    /// Rebuild grams from a record that only kept percentages
    ///
    /// Returns `None` when the calories are not positive or a percentage is
    /// negative or not finite.
    #[must_use]
    pub fn from_percentages(
        protein_pct: f64,
        carb_pct: f64,
        fat_pct: f64,
        target_calories: f64,
    ) -> Option<Self> {
        if !(target_calories.is_finite() && target_calories > 0.0) {
            return None;
        }
        let grams = |pct: f64, kcal_per_g: f64| {
            (pct.is_finite() && pct >= 0.0)
                .then(|| kcal_to_grams(pct / PERCENT * target_calories, kcal_per_g))
        };
        Some(Self::from_grams(
            target_calories,
            grams(protein_pct, KCAL_PER_G_PROTEIN)?,
            grams(carb_pct, KCAL_PER_G_CARB)?,
            grams(fat_pct, KCAL_PER_G_FAT)?,
        ))
    }

    /// Energy carried by the gram targets (kcal)
    #[must_use]
    pub fn total_kcal(&self) -> f64 {
        f64::from(self.protein_g) * KCAL_PER_G_PROTEIN
            + f64::from(self.carb_g) * KCAL_PER_G_CARB
            + f64::from(self.fat_g) * KCAL_PER_G_FAT
    }
}

/// Split `target_calories` into protein, carbohydrate and fat grams
///
/// 1. `protein_g = round(weight x anchor[intensity])`
/// 2. If protein alone exceeds the target, clamp it to
///    `floor(target x clamp_ratio / 4)` and record a warning.
/// 3. The remaining calories go to fat then carbohydrate by the tier split.
///    Fat is rounded down when rounding up would overdraw the remainder, so
///    carbohydrate absorbs the rounding and the total lands within 2 kcal of
///    the target.
///
/// Returns `None` if the body weight or target calories are missing,
/// non-positive or not finite, or if the target is below the configured
/// `min_target_calories` floor.
#[must_use]
pub fn allocate(
    intensity: MacroIntensity,
    body_weight_kg: f64,
    target_calories: f64,
    config: &MacroAllocationConfig,
) -> Option<MacroPlan> {
    if !(body_weight_kg.is_finite() && body_weight_kg > 0.0) {
        return None;
    }
    if !(target_calories.is_finite() && target_calories > 0.0) {
        return None;
    }
    if target_calories < config.min_target_calories {
        warn!(
            target_calories,
            min_target_calories = config.min_target_calories,
            "Calorie target below the allocation floor; no macro plan"
        );
        return None;
    }

    let tier = config.tiers.get(intensity);
    let mut warnings = Vec::new();

    let mut protein_g = kcal_to_grams(body_weight_kg * tier.protein_g_per_kg, 1.0);
    if f64::from(protein_g) * KCAL_PER_G_PROTEIN > target_calories {
        protein_g =
            floor_to_grams(target_calories * config.protein_clamp_ratio / KCAL_PER_G_PROTEIN);
        warnings.push("Protein target exceeds available calories; reduced".to_owned());
    }

    let remainder_kcal = f64::from(protein_g).mul_add(-KCAL_PER_G_PROTEIN, target_calories);

    let mut fat_g = kcal_to_grams(remainder_kcal * tier.fat_share_of_remainder, KCAL_PER_G_FAT);
    if fat_g > 0 && f64::from(fat_g) * KCAL_PER_G_FAT > remainder_kcal {
        fat_g -= 1;
    }
    let carb_kcal = f64::from(fat_g).mul_add(-KCAL_PER_G_FAT, remainder_kcal);
    let carb_g = kcal_to_grams(carb_kcal, KCAL_PER_G_CARB);

    let mut plan = MacroPlan::from_grams(target_calories, protein_g, carb_g, fat_g);
    if plan.fat_pct < config.min_fat_percent_of_calories {
        warnings.push(format!(
            "Fat is {:.1}% of calories, below the {:.0}% minimum",
            plan.fat_pct, config.min_fat_percent_of_calories
        ));
    }
    plan.warnings = warnings;
    Some(plan)
}

/// Round kcal to whole grams, saturating at zero
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn kcal_to_grams(kcal: f64, kcal_per_g: f64) -> u32 {
    // Safe: clamped to [0, u32::MAX] before the cast
    (kcal / kcal_per_g).round().clamp(0.0, f64::from(u32::MAX)) as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_to_grams(grams: f64) -> u32 {
    // Safe: clamped to [0, u32::MAX] before the cast
    grams.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
