// ABOUTME: Energy model using the Mifflin-St Jeor equation and activity multipliers
// ABOUTME: BMR and TDEE estimation with typed gender and activity level lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Energy Model
//!
//! Estimates resting and total daily energy expenditure.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//!
//! - `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology.

use crate::config::{ActivityFactorsConfig, BmrConfig, NutritionConfig};
use crate::normalize_choice;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vitalis_core::errors::AppError;

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male (+5 kcal constant)
    Male,
    /// Female (-161 kcal constant)
    Female,
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(AppError::invalid_domain_value("gender", s)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "male",
            Self::Female => "female",
        })
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Hard training twice a day or physical job
    VeryActive,
}

impl ActivityLevel {
    /// Every level in ascending order of energy expenditure
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::Active,
        Self::VeryActive,
    ];

    /// TDEE multiplier for this level
    #[must_use]
    pub const fn factor(self, config: &ActivityFactorsConfig) -> f64 {
        match self {
            Self::Sedentary => config.sedentary,
            Self::Light => config.light,
            Self::Moderate => config.moderate,
            Self::Active => config.active,
            Self::VeryActive => config.very_active,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "active" => Ok(Self::Active),
            "very_active" => Ok(Self::VeryActive),
            _ => Err(AppError::invalid_domain_value("activity level", s)),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        })
    }
}

/// BMR and TDEE, each absent when the inputs are incomplete
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr_kcal: Option<f64>,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee_kcal: Option<f64>,
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation (1990)
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_offset`
/// - Men: +5
/// - Women: -161
///
/// Returns `None` when any input is non-positive or not finite: that is
/// "insufficient data", never zero. The result is only clamped at zero, which
/// no plausible adult input reaches.
///
/// # Reference
/// Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
#[must_use]
pub fn calculate_mifflin_st_jeor(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> Option<f64> {
    if !(weight_kg.is_finite() && weight_kg > 0.0) {
        return None;
    }
    if !(height_cm.is_finite() && height_cm > 0.0) {
        return None;
    }
    if age == 0 {
        return None;
    }

    let weight_component = config.msj_weight_coef * weight_kg;
    let height_component = config.msj_height_coef * height_cm;
    let age_component = config.msj_age_coef * f64::from(age);

    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    let bmr = weight_component + height_component + age_component + gender_constant;
    bmr.is_finite().then_some(bmr.max(0.0))
}

/// Calculate Total Daily Energy Expenditure (TDEE)
///
/// Formula: TDEE = BMR x Activity Factor
///
/// Activity factors based on `McArdle` et al. (2010):
/// - Sedentary: 1.2
/// - Light: 1.375
/// - Moderate: 1.55
/// - Active: 1.725
/// - Very active: 1.9
///
/// The activity level is a closed enum; unknown strings are rejected when
/// parsed into [`ActivityLevel`], never defaulted here.
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    bmr * activity_level.factor(config)
}

/// Estimate BMR and TDEE from possibly incomplete profile fields
///
/// TDEE is only present when BMR is present and an activity level is known.
#[must_use]
pub fn estimate_energy(
    weight_kg: Option<f64>,
    height_cm: Option<u32>,
    age: Option<u32>,
    gender: Option<Gender>,
    activity_level: Option<ActivityLevel>,
    config: &NutritionConfig,
) -> EnergyResult {
    let bmr_kcal = match (weight_kg, height_cm, age, gender) {
        (Some(weight), Some(height), Some(age), Some(gender)) => {
            calculate_mifflin_st_jeor(weight, f64::from(height), age, gender, &config.bmr)
        }
        _ => None,
    };

    let tdee_kcal = bmr_kcal
        .zip(activity_level)
        .map(|(bmr, level)| calculate_tdee(bmr, level, &config.activity_factors));

    EnergyResult {
        bmr_kcal,
        tdee_kcal,
    }
}
