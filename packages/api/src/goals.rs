//! Goal list and goal form controllers.
//!
//! Both are cheap to clone: clones share one state cell and one
//! [`TaskScope`], so a UI can hand a clone to a spawned task and keep reading
//! [`GoalListController::state`] from the render path. Neither controller
//! looks at the session: callers pass the bearer token in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::error::FieldErrors;
use crate::events::{GoalEvents, GoalSubscriber};
use crate::models::{Goal, GoalDraft};
use crate::tasks::TaskScope;

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_TARGET: &str = "target";
pub const FIELD_UNIT: &str = "unit";

pub const GOAL_CREATED: &str = "Goal created successfully!";

fn lock<T>(cell: &Mutex<T>) -> MutexGuard<'_, T> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============= Goal list =============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalListState {
    /// In server response order.
    pub goals: Vec<Goal>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct GoalListController {
    client: ApiClient,
    state: Arc<Mutex<GoalListState>>,
    scope: TaskScope,
}

impl GoalListController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(GoalListState::default())),
            scope: TaskScope::new(),
        }
    }

    pub fn state(&self) -> GoalListState {
        lock(&self.state).clone()
    }

    /// Replace the cached goals with a fresh fetch.
    pub async fn refresh(&self, bearer: Option<&str>) {
        {
            let mut state = lock(&self.state);
            state.loading = true;
            state.error = None;
        }

        let Ok(result) = self.scope.run(self.client.list_goals(bearer)).await else {
            debug!("goal fetch cancelled");
            lock(&self.state).loading = false;
            return;
        };

        let mut state = lock(&self.state);
        match result {
            Ok(goals) => {
                debug!(count = goals.len(), "goals loaded");
                state.goals = goals;
            }
            Err(err) => {
                state.error = Some(format!("Failed to load goals: {}", err.message()));
            }
        }
        state.loading = false;
    }

    /// Delete one goal. The cached list only changes once the server confirms.
    pub async fn delete(&self, bearer: Option<&str>, id: i64) -> bool {
        let Ok(result) = self.scope.run(self.client.delete_goal(bearer, id)).await else {
            debug!(id, "goal delete cancelled");
            return false;
        };

        let mut state = lock(&self.state);
        match result {
            Ok(()) => {
                state.goals.retain(|goal| goal.id != id);
                info!(id, "goal deleted");
                true
            }
            Err(err) => {
                state.error = Some(format!("Failed to delete goal: {}", err.message()));
                false
            }
        }
    }

    /// Refetch after every goals-changed event until the channel closes or
    /// the controller is disposed. `token` is read at each refetch and
    /// `on_update` receives the state after it.
    pub async fn follow<F, U>(&self, mut events: GoalSubscriber, token: F, mut on_update: U)
    where
        F: Fn() -> Option<String>,
        U: FnMut(GoalListState),
    {
        while let Ok(true) = self.scope.run(events.changed()).await {
            let bearer = token();
            self.refresh(bearer.as_deref()).await;
            on_update(self.state());
        }
        debug!("stopped following goal events");
    }

    pub fn dispose(&self) {
        self.scope.cancel();
    }
}

// ============= Goal form =============

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoalFormState {
    pub draft: GoalDraft,
    pub errors: FieldErrors,
    pub submitting: bool,
    /// Failure text from the last submit.
    pub message: Option<String>,
    /// Success text from the last submit.
    pub notice: Option<String>,
}

/// Check every field of `draft`. All violations are reported together.
pub fn validate_draft(draft: &GoalDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.name.is_empty() {
        errors.insert(FIELD_NAME, "Goal name is required");
    }
    if draft.description.is_empty() {
        errors.insert(FIELD_DESCRIPTION, "Description is required");
    }
    if !draft.target.is_some_and(f64::is_finite) {
        errors.insert(FIELD_TARGET, "Target value must be a number");
    }
    if draft.unit.is_empty() {
        errors.insert(FIELD_UNIT, "Unit is required");
    }
    errors
}

#[derive(Clone)]
pub struct GoalFormController {
    client: ApiClient,
    state: Arc<Mutex<GoalFormState>>,
    scope: TaskScope,
}

impl GoalFormController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(GoalFormState::default())),
            scope: TaskScope::new(),
        }
    }

    pub fn state(&self) -> GoalFormState {
        lock(&self.state).clone()
    }

    fn edit(&self, field: &'static str, apply: impl FnOnce(&mut GoalDraft)) {
        let mut state = lock(&self.state);
        apply(&mut state.draft);
        state.errors.clear_field(field);
    }

    pub fn set_name(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FIELD_NAME, |draft| draft.name = value);
    }

    pub fn set_description(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FIELD_DESCRIPTION, |draft| draft.description = value);
    }

    pub fn set_target(&self, value: Option<f64>) {
        self.edit(FIELD_TARGET, |draft| draft.target = value);
    }

    /// Set the target from raw input text. Anything that is not a finite
    /// number leaves the target absent.
    pub fn set_target_input(&self, input: &str) {
        self.set_target(GoalDraft::parse_target(input));
    }

    pub fn set_unit(&self, value: impl Into<String>) {
        let value = value.into();
        self.edit(FIELD_UNIT, |draft| draft.unit = value);
    }

    /// Validate the current draft and store the result. Returns `true` when
    /// the draft may be submitted.
    pub fn validate(&self) -> bool {
        let mut state = lock(&self.state);
        state.errors = validate_draft(&state.draft);
        state.errors.is_empty()
    }

    /// Validate and create the goal. On success the draft is reset and
    /// `events` is notified.
    pub async fn submit(&self, bearer: Option<&str>, events: &GoalEvents) -> bool {
        if !self.validate() {
            debug!("goal draft rejected by validation");
            return false;
        }

        let draft = {
            let mut state = lock(&self.state);
            state.submitting = true;
            state.message = None;
            state.notice = None;
            state.draft.clone()
        };

        let Ok(result) = self.scope.run(self.client.create_goal(bearer, &draft)).await else {
            debug!("goal create cancelled");
            lock(&self.state).submitting = false;
            return false;
        };

        let mut state = lock(&self.state);
        state.submitting = false;
        match result {
            Ok(()) => {
                state.draft = GoalDraft::default();
                state.errors = FieldErrors::new();
                state.notice = Some(GOAL_CREATED.to_string());
                drop(state);
                info!(name = %draft.name, "goal created");
                events.publish();
                true
            }
            Err(err) => {
                state.message = Some(format!("Failed to create goal: {}", err.message()));
                false
            }
        }
    }

    pub fn dispose(&self) {
        self.scope.cancel();
    }
}
