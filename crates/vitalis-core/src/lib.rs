// ABOUTME: Core types and constants for the Vitalis nutrition engine
// ABOUTME: Foundation crate with error handling, persisted records, and unit constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalis Core
//!
//! Foundation crate shared by the calculators and the profile session.
//! It changes rarely, which keeps incremental builds of the workspace cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Unit constants (energy density of macronutrients, days per week)
//! - **models**: Records exchanged with the profile store

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit and energy constants
pub mod constants;

/// Persisted records (profile, daily goals, measurements, progress)
pub mod models;
