// ABOUTME: Unit conversion constants for energy and calendar measurements
// ABOUTME: Provides named constants to eliminate magic numbers in calculations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Energy density of protein (kcal per gram)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;

/// Energy density of carbohydrate (kcal per gram)
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Energy density of fat (kcal per gram)
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Days per week
pub const DAYS_PER_WEEK: f64 = 7.0;

/// Grams per kilogram
pub const GRAMS_PER_KG: f64 = 1000.0;

/// Percent scale
pub const PERCENT: f64 = 100.0;
