// ABOUTME: Vitalis CLI - nutrition planning, progress tracking, and profile editing from the shell
// ABOUTME: Runs the calculators directly or against the configured record store, printing JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full nutrition plan for a set of inputs
//! vitalis-cli plan --weight 90 --height 180 --age 30 --gender male \
//!     --activity moderate --target-weight 80 --target-date 2026-12-31 --intensity warrior
//!
//! # Percent of goal completed
//! vitalis-cli progress --start 80 --current 75 --target 70
//!
//! # Resolve a legacy macro strategy name
//! vitalis-cli strategy high_protein
//!
//! # Stored records (DATABASE_URL or --database-url)
//! vitalis-cli --database-url sqlite:vitalis.db profile <user-id> --weight 88.5
//! vitalis-cli --database-url sqlite:vitalis.db measure <user-id> --weight 88.1 --body-fat 24
//! vitalis-cli --database-url sqlite:vitalis.db target <user-id> belly 85
//! vitalis-cli --database-url sqlite:vitalis.db dashboard <user-id>
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use tracing::debug;
use uuid::Uuid;
use vitalis::config::environment::SessionConfig;
use vitalis::database_plugins::sqlite::SqliteStore;
use vitalis::logging::LoggingConfig;
use vitalis_core::models::ProgressMetric;

#[derive(Parser)]
#[command(
    name = "vitalis-cli",
    about = "Vitalis nutrition and progress CLI",
    long_about = "Command-line access to the Vitalis calculators and the profile record store."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute a full nutrition plan from the given inputs
    Plan(commands::plan::PlanArgs),

    /// Percent of a goal completed
    Progress {
        /// Value when tracking started
        #[arg(long, allow_negative_numbers = true)]
        start: f64,

        /// Latest value
        #[arg(long, allow_negative_numbers = true)]
        current: f64,

        /// Goal value
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
    },

    /// Resolve a macro strategy name to its intensity tier
    Strategy {
        /// Tier or legacy strategy name
        raw: String,
    },

    /// Edit a stored profile and save it immediately
    Profile(commands::profile::ProfileArgs),

    /// Record a weight entry and/or body measurement
    Measure(commands::measure::MeasureArgs),

    /// Set or clear a dashboard target
    Target {
        /// User the target belongs to
        user_id: Uuid,

        /// weight, body_fat, muscle or belly
        metric: ProgressMetric,

        /// New target; omit to clear
        value: Option<f64>,
    },

    /// Show transformation progress for a user
    Dashboard {
        /// User to load
        user_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    LoggingConfig::for_cli(cli.verbose).init()?;

    let mut config = SessionConfig::from_env()?;
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    match cli.command {
        Command::Plan(args) => commands::plan::run(&args, &config.intelligence)?,
        Command::Progress {
            start,
            current,
            target,
        } => commands::progress::percent(start, current, target)?,
        Command::Strategy { raw } => commands::strategy::resolve(&raw, &config.intelligence)?,
        Command::Profile(args) => {
            let store = connect(&config).await?;
            commands::profile::edit(store, &args, config).await?;
        }
        Command::Measure(args) => {
            let store = connect(&config).await?;
            commands::measure::record(&store, &args).await?;
        }
        Command::Target {
            user_id,
            metric,
            value,
        } => {
            let store = connect(&config).await?;
            commands::progress::target(&store, user_id, metric, value).await?;
        }
        Command::Dashboard { user_id } => {
            let store = connect(&config).await?;
            commands::progress::dashboard(&store, user_id).await?;
        }
    }

    Ok(())
}

async fn connect(config: &SessionConfig) -> anyhow::Result<SqliteStore> {
    debug!(database_url = %config.database_url, "Connecting to record store");
    Ok(SqliteStore::connect(&config.database_url).await?)
}
