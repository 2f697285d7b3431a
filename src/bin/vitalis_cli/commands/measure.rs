// ABOUTME: Measure command appending weight entries and body measurements
// ABOUTME: Body composition values ride on the weight entry; waist is a separate measurement

use crate::helpers::display::print_json;
use chrono::{DateTime, Utc};
use clap::Args;
use uuid::Uuid;
use vitalis::dashboard::{self, MeasurementInput};
use vitalis::database_plugins::ProfileStore;
use vitalis::errors::AppResult;

#[derive(Args)]
pub struct MeasureArgs {
    /// User the measurement belongs to
    user_id: Uuid,

    /// Body weight (kg)
    #[arg(long)]
    weight: Option<f64>,

    /// Body fat (%), stored with the weight entry
    #[arg(long)]
    body_fat: Option<f64>,

    /// Skeletal muscle (%), stored with the weight entry
    #[arg(long)]
    muscle: Option<f64>,

    /// Waist circumference (cm)
    #[arg(long)]
    waist: Option<f64>,

    /// When the measurement was taken (RFC 3339), defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,
}

/// Append the given measurements
pub async fn record(store: &dyn ProfileStore, args: &MeasureArgs) -> AppResult<()> {
    let input = MeasurementInput {
        weight_kg: args.weight,
        body_fat_percentage: args.body_fat,
        muscle_percentage: args.muscle,
        waist_cm: args.waist,
    };
    let recorded = dashboard::record_measurement(
        store,
        args.user_id,
        input,
        args.at.unwrap_or_else(Utc::now),
    )
    .await?;
    print_json(&recorded)
}
