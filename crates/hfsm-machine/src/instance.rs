//! # FSM Instance
//!
//! The per-consumer runtime record. It is deliberately tiny: the current
//! state path is the only durable field. The staged next state and the
//! re-entry flag exist only while a single `init` or `process_message` call
//! is running, and are never serialized.
//!
//! ## Persistence
//!
//! An `Instance` serializes as its current-state string, e.g. `"A.B"`.
//! Restoring one sets the field directly. Enter hooks are **not** re-run on
//! restore; only `init` runs them.

use serde::{Deserialize, Serialize};

use hfsm_core::StatePath;

/// Runtime state of one bound consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instance {
    current_state: StatePath,
    #[serde(skip)]
    pending_next_state: Option<String>,
    #[serde(skip)]
    force_reenter: bool,
}

impl Instance {
    /// A fresh instance sitting at the root. Call `CompiledSpec::init` to
    /// enter the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance restored to `state` without running any hooks.
    pub fn restored(state: StatePath) -> Self {
        Self {
            current_state: state,
            ..Self::default()
        }
    }

    /// The current state path.
    pub fn current_state(&self) -> &StatePath {
        &self.current_state
    }

    /// The staged, not yet resolved, next state name.
    pub fn pending_next_state(&self) -> Option<&str> {
        self.pending_next_state.as_deref()
    }

    /// Whether the staged transition must re-enter a shared ancestor.
    pub fn is_forcing_reenter(&self) -> bool {
        self.force_reenter
    }

    /// Stage a transition to `name`, which may be relative to the current
    /// state. Replaces any transition already staged. An empty name stages
    /// nothing when the engine settles.
    pub fn set_next_state(&mut self, name: impl Into<String>) {
        self.pending_next_state = Some(name.into());
        self.force_reenter = false;
    }

    /// Stage a transition to `name` that leaves and re-enters the target
    /// even when it is the current state or one of its ancestors.
    pub fn set_next_state_always_entering(&mut self, name: impl Into<String>) {
        self.pending_next_state = Some(name.into());
        self.force_reenter = true;
    }

    /// Overwrite the current state without running hooks, clearing any
    /// staged transition.
    pub fn restore(&mut self, state: StatePath) {
        self.current_state = state;
        self.pending_next_state = None;
        self.force_reenter = false;
    }

    pub(crate) fn set_current(&mut self, state: StatePath) {
        self.current_state = state;
    }

    pub(crate) fn take_pending(&mut self) -> Option<String> {
        self.pending_next_state.take()
    }

    pub(crate) fn take_reenter(&mut self) -> bool {
        std::mem::take(&mut self.force_reenter)
    }
}
