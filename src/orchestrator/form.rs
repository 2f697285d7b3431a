// ABOUTME: Typed, editable profile form owned by a profile session
// ABOUTME: Converts to and from profile records and validates single-field edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vitalis_core::models::ProfileRecord;
use vitalis_intelligence::config::IntelligenceConfig;
use vitalis_intelligence::goal_solver::{GoalSpec, GoalType, WeightGoal};
use vitalis_intelligence::macro_allocator::MacroIntensity;
use vitalis_intelligence::nutrition_calculator::{ActivityLevel, Gender};
use vitalis_intelligence::planner::PlanInputs;

/// User-entered profile fields
///
/// Enum-like fields are typed here; the record keeps them as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileForm {
    /// Current body weight (kg)
    pub weight: Option<f64>,
    /// Weight when the current goal was started (kg)
    pub start_weight: Option<f64>,
    /// Height (cm)
    pub height: Option<u32>,
    /// Age (years)
    pub age: Option<u32>,
    /// Sex for the BMR constant
    pub gender: Option<Gender>,
    /// Activity multiplier selector
    pub activity_level: Option<ActivityLevel>,
    /// Declared direction
    pub goal: Option<WeightGoal>,
    /// Target body weight (kg)
    pub target_weight: Option<f64>,
    /// Date the goal should be reached by
    pub target_date: Option<NaiveDate>,
    /// What the goal is expressed in
    pub goal_type: Option<GoalType>,
    /// Current body fat (%)
    pub body_fat_percentage: Option<f64>,
    /// Target body fat (%)
    pub target_body_fat_percentage: Option<f64>,
    /// Macro intensity tier
    pub macro_strategy: Option<MacroIntensity>,
}

/// One tracked field change
///
/// `None` clears the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProfileEdit {
    /// Current body weight (kg)
    Weight(Option<f64>),
    /// Start weight (kg)
    StartWeight(Option<f64>),
    /// Height (cm)
    Height(Option<u32>),
    /// Age (years)
    Age(Option<u32>),
    /// Sex
    Gender(Option<Gender>),
    /// Activity level
    ActivityLevel(Option<ActivityLevel>),
    /// Declared direction
    Goal(Option<WeightGoal>),
    /// Target body weight (kg)
    TargetWeight(Option<f64>),
    /// Target date
    TargetDate(Option<NaiveDate>),
    /// Goal type
    GoalType(Option<GoalType>),
    /// Current body fat (%)
    BodyFat(Option<f64>),
    /// Target body fat (%)
    TargetBodyFat(Option<f64>),
    /// Macro intensity tier
    MacroStrategy(Option<MacroIntensity>),
}

impl ProfileEdit {
    /// Field name as stored in the profile record
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Weight(_) => "weight",
            Self::StartWeight(_) => "start_weight",
            Self::Height(_) => "height",
            Self::Age(_) => "age",
            Self::Gender(_) => "gender",
            Self::ActivityLevel(_) => "activity_level",
            Self::Goal(_) => "goal",
            Self::TargetWeight(_) => "target_weight",
            Self::TargetDate(_) => "target_date",
            Self::GoalType(_) => "goal_type",
            Self::BodyFat(_) => "body_fat_percentage",
            Self::TargetBodyFat(_) => "target_body_fat_percentage",
            Self::MacroStrategy(_) => "macro_strategy",
        }
    }

    /// Reject values that could put NaN or nonsense into stored records
    fn validate(&self) -> AppResult<()> {
        let field = self.field_name();
        match *self {
            Self::Weight(Some(kg)) | Self::StartWeight(Some(kg)) | Self::TargetWeight(Some(kg)) => {
                positive(field, kg)
            }
            Self::BodyFat(Some(pct)) | Self::TargetBodyFat(Some(pct)) => {
                positive(field, pct)?;
                if pct >= 100.0 {
                    return Err(AppError::out_of_range(format!(
                        "{field} must be below 100, got {pct}"
                    )));
                }
                Ok(())
            }
            Self::Height(Some(0)) | Self::Age(Some(0)) => Err(AppError::out_of_range(format!(
                "{field} must be greater than zero"
            ))),
            _ => Ok(()),
        }
    }
}

fn positive(field: &str, value: f64) -> AppResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

fn parse_choice<T>(raw: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr<Err = AppError>,
{
    raw.filter(|value| !value.trim().is_empty())
        .map(str::parse)
        .transpose()
}

fn set<T: PartialEq>(slot: &mut Option<T>, value: Option<T>) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

impl ProfileForm {
    /// Read the user-entered fields of a stored record
    ///
    /// Legacy macro strategy names are migrated to their intensity tier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDomainValue` if an enum-like field holds an unknown value
    pub fn from_record(record: &ProfileRecord, config: &IntelligenceConfig) -> AppResult<Self> {
        Ok(Self {
            weight: record.weight,
            start_weight: record.start_weight,
            height: record.height,
            age: record.age,
            gender: parse_choice(record.gender.as_deref())?,
            activity_level: parse_choice(record.activity_level.as_deref())?,
            goal: parse_choice(record.goal.as_deref())?,
            target_weight: record.target_weight,
            target_date: record.target_date,
            goal_type: parse_choice(record.goal_type.as_deref())?,
            body_fat_percentage: record.body_fat_percentage,
            target_body_fat_percentage: record.target_body_fat_percentage,
            macro_strategy: record
                .macro_strategy
                .as_deref()
                .filter(|raw| !raw.trim().is_empty())
                .map(|raw| MacroIntensity::resolve(raw, &config.nutrition.macros))
                .transpose()?,
        })
    }

    /// Write the user-entered fields into a record, leaving derived fields alone
    pub fn write_into(&self, record: &mut ProfileRecord) {
        record.weight = self.weight;
        record.start_weight = self.start_weight;
        record.height = self.height;
        record.age = self.age;
        record.gender = self.gender.as_ref().map(ToString::to_string);
        record.activity_level = self.activity_level.as_ref().map(ToString::to_string);
        record.goal = self.goal.as_ref().map(ToString::to_string);
        record.target_weight = self.target_weight;
        record.target_date = self.target_date;
        record.goal_type = self.goal_type.as_ref().map(ToString::to_string);
        record.body_fat_percentage = self.body_fat_percentage;
        record.target_body_fat_percentage = self.target_body_fat_percentage;
        record.macro_strategy = self.macro_strategy.as_ref().map(ToString::to_string);
    }

    /// Apply one edit
    ///
    /// Returns whether the form changed.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for non-finite, non-positive or impossible values
    pub fn apply(&mut self, edit: ProfileEdit) -> AppResult<bool> {
        edit.validate()?;
        let changed = match edit {
            ProfileEdit::Weight(value) => set(&mut self.weight, value),
            ProfileEdit::StartWeight(value) => set(&mut self.start_weight, value),
            ProfileEdit::Height(value) => set(&mut self.height, value),
            ProfileEdit::Age(value) => set(&mut self.age, value),
            ProfileEdit::Gender(value) => set(&mut self.gender, value),
            ProfileEdit::ActivityLevel(value) => set(&mut self.activity_level, value),
            ProfileEdit::Goal(value) => set(&mut self.goal, value),
            ProfileEdit::TargetWeight(value) => set(&mut self.target_weight, value),
            ProfileEdit::TargetDate(value) => set(&mut self.target_date, value),
            ProfileEdit::GoalType(value) => set(&mut self.goal_type, value),
            ProfileEdit::BodyFat(value) => set(&mut self.body_fat_percentage, value),
            ProfileEdit::TargetBodyFat(value) => set(&mut self.target_body_fat_percentage, value),
            ProfileEdit::MacroStrategy(value) => set(&mut self.macro_strategy, value),
        };
        Ok(changed)
    }

    /// Typed calculator inputs
    #[must_use]
    pub const fn plan_inputs(&self) -> PlanInputs {
        PlanInputs {
            weight_kg: self.weight,
            height_cm: self.height,
            age: self.age,
            gender: self.gender,
            activity_level: self.activity_level,
            goal: self.goal,
            goal_type: self.goal_type,
            target_weight_kg: self.target_weight,
            target_date: self.target_date,
            body_fat_pct: self.body_fat_percentage,
            target_body_fat_pct: self.target_body_fat_percentage,
            intensity: self.macro_strategy,
        }
    }

    /// Fields still needed before a complete plan can be computed
    ///
    /// Missing fields are the normal state for a new user; they are reported,
    /// never raised as errors.
    #[must_use]
    pub fn missing_fields(&self, today: NaiveDate) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.weight.is_none() {
            missing.push("weight");
        }
        if self.height.is_none() {
            missing.push("height");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }

        let report = GoalSpec {
            goal_type: self.goal_type.unwrap_or(GoalType::Weight),
            start_weight_kg: self.start_weight.or(self.weight),
            target_weight_kg: self.target_weight,
            target_body_fat_pct: self.target_body_fat_percentage,
            target_date: self.target_date,
        }
        .validate(today);

        missing.extend(report.missing_fields.iter().map(|field| match *field {
            "target_weight_kg" => "target_weight",
            "target_body_fat_pct" => "target_body_fat_percentage",
            other => other,
        }));
        missing
    }
}
