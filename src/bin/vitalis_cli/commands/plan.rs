// ABOUTME: Plan command running the full nutrition planning pipeline
// ABOUTME: Energy, deficit, target calories, macros, and realism for command-line inputs

use crate::helpers::display::print_json;
use chrono::{NaiveDate, Utc};
use clap::Args;
use vitalis::errors::AppResult;
use vitalis_intelligence::config::IntelligenceConfig;
use vitalis_intelligence::goal_solver::{GoalType, WeightGoal};
use vitalis_intelligence::macro_allocator::MacroIntensity;
use vitalis_intelligence::nutrition_calculator::{ActivityLevel, Gender};
use vitalis_intelligence::planner::{self, PlanInputs};

#[derive(Args)]
pub struct PlanArgs {
    /// Current body weight (kg)
    #[arg(long)]
    weight: f64,

    /// Height (cm)
    #[arg(long)]
    height: u32,

    /// Age (years)
    #[arg(long)]
    age: u32,

    /// male or female
    #[arg(long)]
    gender: Gender,

    /// sedentary, light, moderate, active or very_active
    #[arg(long, default_value = "moderate")]
    activity: ActivityLevel,

    /// Declared direction: lose, maintain or gain
    #[arg(long)]
    goal: Option<WeightGoal>,

    /// weight, body_fat or both
    #[arg(long)]
    goal_type: Option<GoalType>,

    /// Target body weight (kg)
    #[arg(long)]
    target_weight: Option<f64>,

    /// Date the goal should be reached by (YYYY-MM-DD)
    #[arg(long)]
    target_date: Option<NaiveDate>,

    /// Tier (rookie, warrior, elite) or legacy strategy name
    #[arg(long)]
    intensity: Option<String>,

    /// Current body fat (%)
    #[arg(long)]
    body_fat: Option<f64>,

    /// Target body fat (%)
    #[arg(long)]
    target_body_fat: Option<f64>,

    /// Plan as of this day instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// Compute and print the plan
pub fn run(args: &PlanArgs, config: &IntelligenceConfig) -> AppResult<()> {
    let intensity = args
        .intensity
        .as_deref()
        .map(|raw| MacroIntensity::resolve(raw, &config.nutrition.macros))
        .transpose()?;

    let inputs = PlanInputs {
        weight_kg: Some(args.weight),
        height_cm: Some(args.height),
        age: Some(args.age),
        gender: Some(args.gender),
        activity_level: Some(args.activity),
        goal: args.goal,
        goal_type: args.goal_type,
        target_weight_kg: args.target_weight,
        target_date: args.target_date,
        body_fat_pct: args.body_fat,
        target_body_fat_pct: args.target_body_fat,
        intensity,
    };

    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    print_json(&planner::plan(&inputs, today, config))
}
