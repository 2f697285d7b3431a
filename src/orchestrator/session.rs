// ABOUTME: Profile session state machine with debounced, serialized saves
// ABOUTME: One background task owns the debounce timer and performs every save inline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Profile Session
//!
//! A session moves `Idle -> Loading -> Ready`. While `Ready`, every edit that
//! changes the form bumps a generation counter and restarts the debounce
//! timer. When the timer expires the worker recomputes the nutrition plan
//! from the form and persists the profile and today's daily goals.
//!
//! The worker awaits each save before it looks at the next command, so at
//! most one save is ever in flight. Edits that land while a save is running
//! stay in the form; the worker notices the generation moved and starts
//! another debounce cycle. A failed save keeps the form and the computed plan
//! in memory, records the error in the status and retries after the next
//! debounce delay.

use super::form::{ProfileEdit, ProfileForm};
use crate::config::environment::SessionConfig;
use crate::database_plugins::ProfileStore;
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;
use vitalis_core::models::ProfileRecord;
use vitalis_intelligence::config::IntelligenceConfig;
use vitalis_intelligence::planner::{self, NutritionPlan};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Created, nothing loaded yet
    Idle,
    /// Profile record is being read
    Loading,
    /// Form is editable and saves are enabled
    Ready,
    /// Shut down; the worker has stopped
    Closed,
}

/// Point-in-time view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    /// Lifecycle phase
    pub phase: SessionPhase,
    /// A save is in flight
    pub saving: bool,
    /// Current form values
    pub form: ProfileForm,
    /// Most recently computed plan
    pub last_plan: Option<NutritionPlan>,
    /// Time of the last successful save
    pub last_saved: Option<DateTime<Utc>>,
    /// Last save failure, cleared by the next successful save
    pub last_error: Option<String>,
    /// Edits exist that have not been saved yet
    pub pending_edits: bool,
    /// Fields still needed for a complete plan
    pub missing_fields: Vec<&'static str>,
}

struct SessionState {
    phase: SessionPhase,
    saving: bool,
    form: ProfileForm,
    record: ProfileRecord,
    generation: u64,
    saved_generation: u64,
    last_plan: Option<NutritionPlan>,
    last_saved: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl SessionState {
    fn new(user_id: Uuid) -> Self {
        Self {
            phase: SessionPhase::Idle,
            saving: false,
            form: ProfileForm::default(),
            record: ProfileRecord::empty(user_id),
            generation: 0,
            saved_generation: 0,
            last_plan: None,
            last_saved: None,
            last_error: None,
        }
    }

    const fn has_pending_edits(&self) -> bool {
        self.generation != self.saved_generation
    }
}

enum SessionCommand {
    Changed,
    SaveNow(oneshot::Sender<AppResult<()>>),
}

/// Everything the worker needs to perform a save
#[derive(Clone)]
struct SaveContext {
    user_id: Uuid,
    store: Arc<dyn ProfileStore>,
    state: Arc<RwLock<SessionState>>,
    intelligence: Arc<IntelligenceConfig>,
}

impl SaveContext {
    /// Recompute the plan from the current form and persist it
    async fn save(&self) -> AppResult<()> {
        let (form, generation, mut record) = {
            let mut state = self.state.write().await;
            if state.phase != SessionPhase::Ready {
                return Err(AppError::not_ready("Profile session is not ready to save"));
            }
            state.saving = true;
            (state.form.clone(), state.generation, state.record.clone())
        };

        let today = Utc::now().date_naive();
        let missing = form.missing_fields(today);
        if !missing.is_empty() {
            debug!(user_id = %self.user_id, ?missing, "Saving incomplete profile");
        }

        let plan = planner::plan(&form.plan_inputs(), today, &self.intelligence);
        form.write_into(&mut record);
        plan.apply_to(&mut record);
        let saved_at = Utc::now();
        record.updated_at = Some(saved_at);

        let result = if record.derived_values_finite() {
            self.persist(&record, &plan, today).await
        } else {
            Err(AppError::internal("Refusing to persist non-finite derived values"))
        }
        .map_err(|error| error.with_user_id(self.user_id));

        let mut state = self.state.write().await;
        state.saving = false;
        state.last_plan = Some(plan);
        match &result {
            Ok(()) => {
                state.record = record;
                state.saved_generation = generation;
                state.last_saved = Some(saved_at);
                state.last_error = None;
                let pending = state.has_pending_edits();
                drop(state);
                info!(user_id = %self.user_id, generation, pending, "Profile saved");
            }
            Err(error) => {
                state.last_error = Some(error.to_string());
                drop(state);
                warn!(
                    user_id = %self.user_id,
                    generation,
                    error = %error,
                    "Profile save failed; edits kept for retry"
                );
            }
        }
        result
    }

    async fn persist(
        &self,
        record: &ProfileRecord,
        plan: &NutritionPlan,
        today: NaiveDate,
    ) -> AppResult<()> {
        self.store.put_profile(record).await?;
        if let Some(goals) = plan.daily_goals(self.user_id, today) {
            self.store.upsert_daily_goals(&goals).await?;
        }
        Ok(())
    }

    /// Whether another debounce cycle is needed after a save attempt
    async fn needs_followup(&self, result: &AppResult<()>) -> bool {
        let state = self.state.read().await;
        state.phase == SessionPhase::Ready && (result.is_err() || state.has_pending_edits())
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

/// Worker loop: debounce timer plus inline saves
async fn run_worker(
    context: SaveContext,
    debounce: Duration,
    mut commands: mpsc::UnboundedReceiver<SessionCommand>,
    mut shutdown_rx: mpsc::Receiver<()>,
) {
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.recv() => {
                if deadline.is_some() {
                    debug!(user_id = %context.user_id, "Pending profile save cancelled");
                }
                break;
            }

            command = commands.recv() => match command {
                Some(SessionCommand::Changed) => {
                    deadline = Some(Instant::now() + debounce);
                }
                Some(SessionCommand::SaveNow(reply)) => {
                    deadline = None;
                    let result = context.save().await;
                    if context.needs_followup(&result).await {
                        deadline = Some(Instant::now() + debounce);
                    }
                    // Caller may have stopped waiting
                    let _ = reply.send(result);
                }
                None => break,
            },

            () = sleep_until_deadline(deadline) => {
                deadline = None;
                let result = context.save().await;
                if context.needs_followup(&result).await {
                    deadline = Some(Instant::now() + debounce);
                }
            }
        }
    }

    debug!(user_id = %context.user_id, "Profile session worker stopped");
}

/// Stateful owner of one user's editable profile
///
/// Must be created inside a tokio runtime; the worker task is spawned
/// immediately.
pub struct ProfileSession {
    context: SaveContext,
    commands: mpsc::UnboundedSender<SessionCommand>,
    shutdown_tx: mpsc::Sender<()>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl ProfileSession {
    /// Create an idle session and start its worker
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>, user_id: Uuid, config: SessionConfig) -> Self {
        let context = SaveContext {
            user_id,
            store,
            state: Arc::new(RwLock::new(SessionState::new(user_id))),
            intelligence: config.intelligence,
        };

        let (commands, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        let worker = tokio::spawn(run_worker(
            context.clone(),
            config.save_debounce,
            command_rx,
            shutdown_rx,
        ));

        Self {
            context,
            commands,
            shutdown_tx,
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Owning user
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.context.user_id
    }

    /// Read the profile record and make the form editable
    ///
    /// A user without a stored record starts from an empty form.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` unless the session is idle, the store's
    /// error if the read fails, or `InvalidDomainValue` if the record holds an
    /// enum value the calculators do not know. On error the session returns
    /// to idle.
    pub async fn load(&self) -> AppResult<()> {
        {
            let mut state = self.context.state.write().await;
            if state.phase != SessionPhase::Idle {
                return Err(AppError::new(
                    ErrorCode::ResourceUnavailable,
                    format!("Cannot load a profile session in phase {:?}", state.phase),
                ));
            }
            state.phase = SessionPhase::Loading;
        }

        let user_id = self.context.user_id;
        let loaded = self
            .context
            .store
            .get_profile(user_id)
            .await
            .and_then(|record| {
                let record = record.unwrap_or_else(|| ProfileRecord::empty(user_id));
                let form = ProfileForm::from_record(&record, &self.context.intelligence)?;
                Ok((record, form))
            });

        let mut state = self.context.state.write().await;
        match loaded {
            Ok((record, form)) => {
                let today = Utc::now().date_naive();
                state.last_plan = Some(planner::plan(
                    &form.plan_inputs(),
                    today,
                    &self.context.intelligence,
                ));
                state.last_saved = record.updated_at;
                state.record = record;
                state.form = form;
                state.generation = 0;
                state.saved_generation = 0;
                state.phase = SessionPhase::Ready;
                drop(state);
                info!(user_id = %user_id, "Profile session ready");
                Ok(())
            }
            Err(error) => {
                state.phase = SessionPhase::Idle;
                drop(state);
                warn!(user_id = %user_id, error = %error, "Profile session load failed");
                Err(error)
            }
        }
    }

    /// Apply one field edit and restart the debounce timer if it changed anything
    ///
    /// Returns whether the form changed.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` unless the session is ready, or
    /// `ValueOutOfRange` if the value is rejected
    pub async fn apply(&self, edit: ProfileEdit) -> AppResult<bool> {
        let mut state = self.context.state.write().await;
        if state.phase != SessionPhase::Ready {
            return Err(AppError::not_ready(format!(
                "Cannot edit {} before the profile is loaded",
                edit.field_name()
            )));
        }

        if !state.form.apply(edit)? {
            return Ok(false);
        }
        state.generation += 1;
        drop(state);

        debug!(user_id = %self.context.user_id, field = edit.field_name(), "Profile field edited");
        self.commands
            .send(SessionCommand::Changed)
            .map_err(|_| AppError::not_ready("Profile session worker has stopped"))?;
        Ok(true)
    }

    /// Recompute the plan for the current form without saving
    pub async fn preview(&self) -> NutritionPlan {
        let form = self.context.state.read().await.form.clone();
        planner::plan(
            &form.plan_inputs(),
            Utc::now().date_naive(),
            &self.context.intelligence,
        )
    }

    /// Snapshot of the session state
    pub async fn status(&self) -> SessionStatus {
        let state = self.context.state.read().await;
        SessionStatus {
            phase: state.phase,
            saving: state.saving,
            form: state.form.clone(),
            last_plan: state.last_plan.clone(),
            last_saved: state.last_saved,
            last_error: state.last_error.clone(),
            pending_edits: state.has_pending_edits(),
            missing_fields: state.form.missing_fields(Utc::now().date_naive()),
        }
    }

    /// Save immediately, skipping the debounce delay
    ///
    /// The save runs on the worker, after any save already in flight.
    ///
    /// # Errors
    ///
    /// Returns `ResourceUnavailable` unless the session is ready, or the
    /// store's error if the save fails
    pub async fn save_now(&self) -> AppResult<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(SessionCommand::SaveNow(reply))
            .map_err(|_| AppError::not_ready("Profile session worker has stopped"))?;
        response
            .await
            .map_err(|_| AppError::not_ready("Profile session worker stopped before saving"))?
    }

    /// Stop the worker, cancelling a pending debounced save
    ///
    /// A save already in flight completes first.
    pub async fn shutdown(&self) {
        // Full channel means a shutdown is already queued
        let _ = self.shutdown_tx.try_send(());
        if let Some(worker) = self.worker.lock().await.take() {
            if let Err(e) = worker.await {
                warn!(user_id = %self.context.user_id, error = %e, "Profile session worker panicked");
            }
        }

        let mut state = self.context.state.write().await;
        state.phase = SessionPhase::Closed;
        let unsaved_edits = state.has_pending_edits();
        drop(state);
        info!(user_id = %self.context.user_id, unsaved_edits, "Profile session closed");
    }
}

impl Drop for ProfileSession {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.try_send(());
    }
}
