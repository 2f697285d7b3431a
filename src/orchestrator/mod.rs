// ABOUTME: Profile orchestration: editable form plus debounced, serialized saves
// ABOUTME: Wires user-entered fields into the planning pipeline and the record store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Typed profile form and single-field edits
pub mod form;
/// Session state machine and save worker
pub mod session;

pub use form::{ProfileEdit, ProfileForm};
pub use session::{ProfileSession, SessionPhase, SessionStatus};
