// ABOUTME: Goal-driven nutrition and progress computation engine
// ABOUTME: Pure calculators for energy, deficit, macros, feasibility, and transformation progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalis Intelligence
//!
//! Stateless calculators. Every function here is synchronous, does no I/O and
//! holds no shared mutable state, so callers may invoke them from anywhere
//! without locking. Missing inputs yield `None` (or a zero score) instead of
//! an error; only values outside the closed enum sets are errors.
//!
//! Data dependency order used by [`planner::plan`]:
//!
//! ```text
//! nutrition_calculator (BMR, TDEE)
//!   -> goal_solver (deficit plan, target calories)
//!     -> macro_allocator (protein-anchored grams)
//!       -> feasibility (realism score)
//! ```
//!
//! [`progress_calculator`] runs independently on measurement snapshots.

/// Calculator configuration tree
pub mod config;
/// Realism scoring for a goal and timeframe
pub mod feasibility;
/// Deficit/surplus solving against a target date
pub mod goal_solver;
/// Protein-anchored macro allocation across intensity tiers
pub mod macro_allocator;
/// BMR and TDEE estimation
pub mod nutrition_calculator;
/// Full planning pipeline in data-dependency order
pub mod planner;
/// Percent-of-goal progress per tracked metric
pub mod progress_calculator;

pub use config::IntelligenceConfig;
pub use feasibility::{FeasibilityIssue, GoalSnapshot, RealismAssessment, RealismLabel};
pub use goal_solver::{DeficitPlan, GoalSpec, GoalType, WeightGoal};
pub use macro_allocator::{MacroIntensity, MacroPlan};
pub use nutrition_calculator::{ActivityLevel, EnergyResult, Gender};
pub use planner::{NutritionPlan, PlanInputs};
pub use progress_calculator::{ProgressSnapshot, TransformationProgress};

/// Normalise a user- or storage-provided choice string for table lookup
///
/// Lowercases, trims, and folds `-` and spaces into `_` so `"Very Active"`,
/// `"very-active"` and `"very_active"` compare equal.
pub(crate) fn normalize_choice(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
