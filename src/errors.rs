// ABOUTME: Unified error handling re-exported from vitalis-core
// ABOUTME: AppError, ErrorCode, and AppResult for the session, stores, and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! The error types live in `vitalis-core` so the calculators and the stateful
//! layer share one taxonomy. `sqlx::Error` converts into [`AppError`] through
//! the `database-errors` feature of that crate.

pub use vitalis_core::errors::{AppError, AppResult, ErrorCode, ErrorContext};
