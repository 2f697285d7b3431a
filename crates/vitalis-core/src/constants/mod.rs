// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for energy density and calendar units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Policy values (deficit limits, protein anchors, the kcal-per-kg
//! approximation) are configuration and live in the intelligence config tree.
//! Only physical unit constants belong here.

/// Unit conversion and energy density constants
pub mod units;

pub use units::*;
