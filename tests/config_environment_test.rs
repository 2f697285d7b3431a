// ABOUTME: Unit tests for session environment configuration
// ABOUTME: Validates debounce parsing, database URL defaults, and calculator override errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use std::time::Duration;
use vitalis::config::environment::{SessionConfig, DEFAULT_DATABASE_URL, DEFAULT_SAVE_DEBOUNCE_MS};
use vitalis::errors::ErrorCode;

const VARS: [&str; 4] = [
    "VITALIS_SAVE_DEBOUNCE_MS",
    "DATABASE_URL",
    "VITALIS_KCAL_PER_KG",
    "VITALIS_PROTEIN_ANCHOR_WARRIOR",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = SessionConfig::from_env().unwrap();

    assert_eq!(
        config.save_debounce,
        Duration::from_millis(DEFAULT_SAVE_DEBOUNCE_MS)
    );
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.intelligence.goals.solver.kcal_per_kg, 7700.0);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("VITALIS_SAVE_DEBOUNCE_MS", " 250 ");
    env::set_var("DATABASE_URL", "sqlite:./vitalis.db");
    env::set_var("VITALIS_KCAL_PER_KG", "7000");
    env::set_var("VITALIS_PROTEIN_ANCHOR_WARRIOR", "2.2");

    let config = SessionConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.save_debounce, Duration::from_millis(250));
    assert_eq!(config.database_url, "sqlite:./vitalis.db");
    assert_eq!(config.intelligence.goals.solver.kcal_per_kg, 7000.0);
    assert_eq!(
        config.intelligence.nutrition.macros.tiers.warrior.protein_g_per_kg,
        2.2
    );
}

#[test]
#[serial]
fn test_invalid_debounce_is_rejected() {
    for raw in ["soon", "-5", "1.5"] {
        clear_env();
        env::set_var("VITALIS_SAVE_DEBOUNCE_MS", raw);
        let error = SessionConfig::from_env().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigError);
        assert!(error.message.contains("VITALIS_SAVE_DEBOUNCE_MS"));
    }
    clear_env();
}

#[test]
#[serial]
fn test_invalid_calculator_override_is_rejected() {
    clear_env();
    env::set_var("VITALIS_KCAL_PER_KG", "-1");
    let error = SessionConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);

    env::set_var("VITALIS_KCAL_PER_KG", "lots");
    let error = SessionConfig::from_env().unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    clear_env();
}

#[test]
fn test_with_save_debounce_replaces_only_the_delay() {
    let config = SessionConfig::default().with_save_debounce(Duration::from_millis(10));
    assert_eq!(config.save_debounce, Duration::from_millis(10));
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
}
