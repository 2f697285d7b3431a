// ABOUTME: Progress commands: single percent-complete, dashboard targets, and dashboard view
// ABOUTME: Dashboard commands read and write progress records through the record store

use crate::helpers::display::print_json;
use serde_json::json;
use uuid::Uuid;
use vitalis::dashboard;
use vitalis::database_plugins::ProfileStore;
use vitalis::errors::AppResult;
use vitalis_core::models::ProgressMetric;
use vitalis_intelligence::progress_calculator::percent_complete;

/// Print the percent of a goal completed
pub fn percent(start: f64, current: f64, target: f64) -> AppResult<()> {
    print_json(&json!({
        "start": start,
        "current": current,
        "target": target,
        "percent_complete": percent_complete(start, current, target),
    }))
}

/// Set or clear one dashboard target and print the stored targets
pub async fn target(
    store: &dyn ProfileStore,
    user_id: Uuid,
    metric: ProgressMetric,
    value: Option<f64>,
) -> AppResult<()> {
    let targets = dashboard::set_target(store, user_id, metric, value).await?;
    print_json(&targets)
}

/// Print the dashboard progress for a user
pub async fn dashboard(store: &dyn ProfileStore, user_id: Uuid) -> AppResult<()> {
    let progress = dashboard::load_progress(store, user_id).await?;
    print_json(&progress)
}
