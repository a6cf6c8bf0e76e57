//! # Handler Context
//!
//! Every handler and hook runs with a `Context`: mutable access to the host,
//! read access to the compiled spec, and the defer cursor.
//!
//! ## Defer Cursor
//!
//! The cursor records which state is "handling" the message right now. It
//! starts at the current state (or, for hooks, at the hook's own state).
//! `defer_message` moves it to the parent for the duration of the deferred
//! call and restores it afterwards, so a deferred handler that defers again
//! climbs one more level and nested defers unwind correctly. The cursor lives
//! on the call stack, never on the shared spec, so unrelated instances can
//! never observe each other's cursors.

use hfsm_core::{DispatchError, Message, StatePath};

use crate::behavior::{Behavior, FsmHost};
use crate::compiled::CompiledSpec;

/// Execution context handed to handlers and hooks.
pub struct Context<'a, B: Behavior> {
    spec: &'a CompiledSpec<B>,
    host: &'a mut B::Host,
    defer_from: StatePath,
}

impl<'a, B: Behavior> Context<'a, B> {
    pub(crate) fn new(spec: &'a CompiledSpec<B>, host: &'a mut B::Host, defer_from: StatePath) -> Self {
        Self {
            spec,
            host,
            defer_from,
        }
    }

    /// The consumer object.
    pub fn host(&self) -> &B::Host {
        &*self.host
    }

    /// Mutable access to the consumer object.
    pub fn host_mut(&mut self) -> &mut B::Host {
        &mut *self.host
    }

    /// The compiled spec driving this call.
    pub fn spec(&self) -> &'a CompiledSpec<B> {
        self.spec
    }

    /// The instance's current state.
    pub fn current_state(&self) -> &StatePath {
        self.host.fsm().current_state()
    }

    /// The state whose handler is running, as seen by `defer_message`.
    pub fn handling_state(&self) -> &StatePath {
        &self.defer_from
    }

    /// Stage a transition to `name`, resolved relative to the current state
    /// once the running handler returns.
    pub fn set_next_state(&mut self, name: impl Into<String>) {
        self.host.fsm_mut().set_next_state(name);
    }

    /// Stage a transition to `name` that leaves and re-enters the target
    /// even if the instance is already in it.
    pub fn set_next_state_always_entering(&mut self, name: impl Into<String>) {
        self.host.fsm_mut().set_next_state_always_entering(name);
    }

    /// Hand `msg` to the parent state's handler for the same kind.
    ///
    /// Returns `None`, after logging, when there is no parent or the parent
    /// has no handler; the message is dropped.
    pub fn defer_message(&mut self, msg: &B::Message) -> Option<B::Output> {
        match self.try_defer_message(msg) {
            Ok(output) => Some(output),
            Err(err) => {
                tracing::error!(state = %self.current_state(), %err, "deferred message dropped");
                None
            }
        }
    }

    /// Like `defer_message`, but returns the failure instead of logging it.
    pub fn try_defer_message(&mut self, msg: &B::Message) -> Result<B::Output, DispatchError> {
        let kind = msg.kind();
        let spec = self.spec;
        let Some(parent) = self.defer_from.parent() else {
            return Err(DispatchError::DeferFromRoot {
                kind: format!("{kind:?}"),
            });
        };
        let Some(handler) = spec.state(&parent).and_then(|s| s.handler(&kind)) else {
            return Err(DispatchError::NoDeferTarget {
                from: self.defer_from.to_string(),
                parent: parent.to_string(),
                kind: format!("{kind:?}"),
            });
        };

        tracing::trace!(from = %self.defer_from, to = %parent, ?kind, "deferring message");
        let saved = std::mem::replace(&mut self.defer_from, parent);
        let output = handler(&mut *self, msg);
        self.defer_from = saved;
        Ok(output)
    }
}
