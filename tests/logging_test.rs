// ABOUTME: Unit tests for logging configuration
// ABOUTME: Validates environment parsing, production defaults, and filter construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use std::env;
use vitalis::logging::{LogFormat, LoggingConfig, SERVICE_NAME};

const VARS: [&str; 6] = [
    "RUST_LOG",
    "LOG_FORMAT",
    "ENVIRONMENT",
    "SERVICE_NAME",
    "LOG_INCLUDE_LOCATION",
    "LOG_INCLUDE_THREAD",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "vitalis-test");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "vitalis-test");
    // Production always carries location and thread
    assert!(config.include_location);
    assert!(config.include_thread);
}

#[test]
#[serial]
fn test_development_location_is_opt_in() {
    clear_env();
    env::set_var("LOG_INCLUDE_LOCATION", "1");

    let config = LoggingConfig::from_env();
    clear_env();

    assert!(config.include_location);
    assert!(!config.include_thread);
    assert_eq!(config.format, LogFormat::Pretty);
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert_eq!(config.service_name, SERVICE_NAME);
    assert!(!config.include_location);
}

#[test]
#[serial]
fn test_env_filter_uses_configured_level() {
    clear_env();
    let filter = LoggingConfig::for_cli(true).env_filter().to_string();

    assert!(filter.contains("vitalis=debug"));
    assert!(filter.contains("sqlx=warn"));
}

#[test]
#[serial]
fn test_env_filter_keeps_target_directives_from_rust_log() {
    clear_env();
    env::set_var("RUST_LOG", "vitalis=debug,sqlx=info");

    let config = LoggingConfig::from_env();
    let filter = config.env_filter().to_string();
    clear_env();

    let directives: Vec<&str> = filter.split(',').map(str::trim).collect();
    assert!(directives.contains(&"vitalis=debug"), "{filter}");
    assert!(directives.contains(&"sqlx=warn"), "{filter}");
    // No catch-all level sneaks in next to the target directives
    assert!(!directives.iter().any(|d| !d.contains('=')), "{filter}");
}

#[test]
#[serial]
fn test_env_filter_applies_bare_level_to_engine_crates() {
    clear_env();
    env::set_var("RUST_LOG", "trace");

    let filter = LoggingConfig::from_env().env_filter().to_string();
    clear_env();

    assert!(filter.contains("vitalis=trace"), "{filter}");
    assert!(filter.contains("vitalis_intelligence=trace"), "{filter}");
}
