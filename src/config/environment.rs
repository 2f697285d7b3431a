// ABOUTME: Environment configuration for profile sessions and the record store
// ABOUTME: Parses the save debounce delay, database URL, and calculator overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use crate::errors::{AppError, AppResult};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vitalis_intelligence::config::IntelligenceConfig;

/// Default delay between the last edit and the automatic save (ms)
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 1000;

/// Default record store
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Profile session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period after the last edit before saving
    pub save_debounce: Duration,
    /// Record store connection string
    pub database_url: String,
    /// Calculator policy constants
    pub intelligence: Arc<IntelligenceConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_debounce: Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS),
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            intelligence: Arc::new(IntelligenceConfig::default()),
        }
    }
}

impl SessionConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `VITALIS_SAVE_DEBOUNCE_MS`, `DATABASE_URL` and the `VITALIS_*`
    /// calculator overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set but cannot be parsed or the
    /// calculator configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        let debounce_ms = match env::var("VITALIS_SAVE_DEBOUNCE_MS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::config(format!("Invalid VITALIS_SAVE_DEBOUNCE_MS value '{raw}': {e}"))
            })?,
            Err(_) => DEFAULT_SAVE_DEBOUNCE_MS,
        };

        let config = Self {
            save_debounce: Duration::from_millis(debounce_ms),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            intelligence: Arc::new(IntelligenceConfig::load()?),
        };

        info!(
            save_debounce_ms = debounce_ms,
            database_url = %config.database_url,
            "Session configuration loaded"
        );
        Ok(config)
    }

    /// Same configuration with a different debounce delay
    #[must_use]
    pub fn with_save_debounce(mut self, save_debounce: Duration) -> Self {
        self.save_debounce = save_debounce;
        self
    }
}
