// ABOUTME: Profile command editing a stored profile through a profile session
// ABOUTME: Loads the record, applies the given fields, saves immediately, and prints the status

use crate::helpers::display::print_json;
use chrono::NaiveDate;
use clap::Args;
use std::sync::Arc;
use uuid::Uuid;
use vitalis::config::environment::SessionConfig;
use vitalis::database_plugins::sqlite::SqliteStore;
use vitalis::errors::AppResult;
use vitalis::orchestrator::{ProfileEdit, ProfileSession};
use vitalis_intelligence::goal_solver::{GoalType, WeightGoal};
use vitalis_intelligence::macro_allocator::MacroIntensity;
use vitalis_intelligence::nutrition_calculator::{ActivityLevel, Gender};

#[derive(Args)]
pub struct ProfileArgs {
    /// User whose profile is edited
    user_id: Uuid,

    /// Current body weight (kg)
    #[arg(long)]
    weight: Option<f64>,

    /// Weight when the goal was started (kg)
    #[arg(long)]
    start_weight: Option<f64>,

    /// Height (cm)
    #[arg(long)]
    height: Option<u32>,

    /// Age (years)
    #[arg(long)]
    age: Option<u32>,

    /// male or female
    #[arg(long)]
    gender: Option<Gender>,

    /// sedentary, light, moderate, active or very_active
    #[arg(long)]
    activity: Option<ActivityLevel>,

    /// lose, maintain or gain
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

    /// Current body fat (%)
    #[arg(long)]
    body_fat: Option<f64>,

    /// Target body fat (%)
    #[arg(long)]
    target_body_fat: Option<f64>,

    /// rookie, warrior or elite
    #[arg(long)]
    intensity: Option<MacroIntensity>,
}

impl ProfileArgs {
    /// Edits for every flag that was passed
    fn edits(&self) -> Vec<ProfileEdit> {
        [
            self.weight.map(|v| ProfileEdit::Weight(Some(v))),
            self.start_weight.map(|v| ProfileEdit::StartWeight(Some(v))),
            self.height.map(|v| ProfileEdit::Height(Some(v))),
            self.age.map(|v| ProfileEdit::Age(Some(v))),
            self.gender.map(|v| ProfileEdit::Gender(Some(v))),
            self.activity.map(|v| ProfileEdit::ActivityLevel(Some(v))),
            self.goal.map(|v| ProfileEdit::Goal(Some(v))),
            self.goal_type.map(|v| ProfileEdit::GoalType(Some(v))),
            self.target_weight.map(|v| ProfileEdit::TargetWeight(Some(v))),
            self.target_date.map(|v| ProfileEdit::TargetDate(Some(v))),
            self.body_fat.map(|v| ProfileEdit::BodyFat(Some(v))),
            self.target_body_fat.map(|v| ProfileEdit::TargetBodyFat(Some(v))),
            self.intensity.map(|v| ProfileEdit::MacroStrategy(Some(v))),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Apply the edits, save, and print the session status
pub async fn edit(
    store: SqliteStore,
    args: &ProfileArgs,
    config: SessionConfig,
) -> AppResult<()> {
    let session = ProfileSession::new(Arc::new(store), args.user_id, config);
    session.load().await?;

    for edit in args.edits() {
        session.apply(edit).await?;
    }
    let saved = session.save_now().await;
    let status = session.status().await;
    session.shutdown().await;

    saved?;
    print_json(&status)
}
