// ABOUTME: Main library entry point for the Vitalis nutrition and progress engine
// ABOUTME: Profile session orchestration, record storage, dashboard progress, and logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalis
//!
//! Goal-driven nutrition planning and transformation progress.
//!
//! The pure calculators live in `vitalis-intelligence`; this crate holds the
//! stateful pieces around them:
//!
//! - **orchestrator**: `ProfileSession`, which owns the editable profile form,
//!   debounces edits and serializes saves
//! - **`database_plugins`**: the `ProfileStore` seam with in-memory and `SQLite`
//!   implementations
//! - **dashboard**: transformation progress from the measurement feed
//! - **config** / **logging**: environment configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use vitalis::config::environment::SessionConfig;
//! use vitalis::database_plugins::memory::InMemoryStore;
//! use vitalis::errors::AppResult;
//! use vitalis::orchestrator::{ProfileEdit, ProfileSession};
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let session = ProfileSession::new(store, Uuid::new_v4(), SessionConfig::default());
//!     session.load().await?;
//!     session.apply(ProfileEdit::Weight(Some(82.0))).await?;
//!     session.save_now().await?;
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Dashboard transformation progress
pub mod dashboard;

/// Record store abstraction and implementations
pub mod database_plugins;

/// Error types re-exported from `vitalis-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Profile session state machine
pub mod orchestrator;
