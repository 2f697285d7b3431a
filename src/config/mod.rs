// ABOUTME: Configuration module for the profile session and record store
// ABOUTME: Re-exports environment configuration and the calculator configuration tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration
//!
//! - **environment**: session and storage settings from environment variables
//! - calculator policy constants live in `vitalis_intelligence::config`

/// Environment-driven session configuration
pub mod environment;

pub use environment::SessionConfig;
pub use vitalis_intelligence::config::{ConfigError, IntelligenceConfig};
