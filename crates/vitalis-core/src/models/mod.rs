// ABOUTME: Persisted record types exchanged between the engine and the record store
// ABOUTME: Profile, daily goals, measurement feed, and progress baseline/target records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record types
//!
//! These mirror what the hosted record store keeps. Enum-like fields stay as
//! raw strings at this boundary: legacy rows may carry values the calculators
//! no longer accept, and rejecting them is the job of the typed parsers in
//! `vitalis-intelligence`, not of deserialization.

/// Daily goals record upserted once per calendar day
pub mod daily_goals;
/// Weight and body measurement entries
pub mod measurement;
/// User profile record with engine-owned derived fields
pub mod profile;
/// Progress baselines and targets per tracked metric
pub mod progress;

pub use daily_goals::DailyGoalsRecord;
pub use measurement::{BodyMeasurementEntry, MeasurementFeed, MetricBounds, WeightEntry};
pub use profile::ProfileRecord;
pub use progress::{ProgressBaselines, ProgressMetric, ProgressTargets};
