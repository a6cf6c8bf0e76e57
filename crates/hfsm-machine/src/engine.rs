//! # Transition and Dispatch Engine
//!
//! Runtime operations on a `(CompiledSpec, host)` pair. Everything here runs
//! to completion synchronously. The spec is only read; all mutation happens
//! on the host's `Instance`.
//!
//! ## Transition Algorithm
//!
//! ```text
//! from = decompose[current]       e.g. [A, A.B, A.B.C]
//! to   = decompose[target]        e.g. [A, A.B, A.B.D]
//! common prefix = 2               A and A.B are neither left nor entered
//!
//! leave A.B.C  (deepest first, down to the common prefix)
//! enter A.B.D  (from the common prefix down to the target)
//! ```
//!
//! A forced re-entry to an ancestor-or-self shortens the common prefix by
//! one, so the shared state itself is left and entered again.
//!
//! A hook that returns `true` aborts the transition where it stands. The
//! host is told about the intermediate state, and whatever transition the
//! hook staged is picked up by the settle loop.
//!
//! ## Unknown Targets
//!
//! A transition to a path that is not in the compiled spec is rejected
//! before any hook runs. The instance keeps its current state. Staging an
//! empty name is not a transition at all: the root is only ever the
//! starting point that `init` leaves.

use hfsm_core::{DispatchError, Message, StatePath, TransitionError};

use crate::behavior::{Behavior, FsmHost};
use crate::compiled::CompiledSpec;
use crate::context::Context;

impl<B: Behavior> CompiledSpec<B> {
    /// Bind `host` to this spec and enter `initial` from the root, running
    /// every enter hook on the way down and any transitions they stage.
    pub fn init(&self, host: &mut B::Host, initial: &str) -> Result<(), TransitionError> {
        let fsm = host.fsm_mut();
        fsm.restore(StatePath::root());
        fsm.set_next_state(initial);
        tracing::debug!(initial, "initialising state machine");
        self.settle(host)
    }

    /// Dispatch `msg` to the current state's handler.
    ///
    /// Returns the handler's result, or `None` when the current state has no
    /// handler for the message kind. Transitions staged by the handler (and
    /// by any hook they trigger) are carried out before returning; they do
    /// not affect the returned value. Failures are logged, never propagated.
    pub fn process_message(&self, host: &mut B::Host, msg: &B::Message) -> Option<B::Output> {
        let output = match self.dispatch(host, msg) {
            Ok(output) => output,
            Err(err) => {
                tracing::error!(%err, "message not processed");
                return None;
            }
        };
        if let Err(err) = self.settle(host) {
            tracing::error!(%err, "staged transition rejected");
        }
        Some(output)
    }

    /// Like `process_message`, but returns failures instead of logging them.
    ///
    /// An `Err(DispatchError::Transition(_))` means the handler ran but the
    /// transition it staged was rejected.
    pub fn try_process_message(
        &self,
        host: &mut B::Host,
        msg: &B::Message,
    ) -> Result<B::Output, DispatchError> {
        let output = self.dispatch(host, msg)?;
        self.settle(host)?;
        Ok(output)
    }

    /// The host's current state.
    pub fn current_state<'h>(&self, host: &'h B::Host) -> &'h StatePath {
        host.fsm().current_state()
    }

    /// Whether the host is in `path` or one of its descendants.
    pub fn is_in_state(&self, host: &B::Host, path: &StatePath) -> bool {
        path.is_ancestor_of(host.fsm().current_state())
    }

    /// Put the host directly into `state`, as when loading a saved game.
    /// No hooks run and the host is not notified.
    pub fn restore(&self, host: &mut B::Host, state: StatePath) -> Result<(), TransitionError> {
        if !self.contains(&state) {
            return Err(TransitionError::UnknownState {
                from: host.fsm().current_state().to_string(),
                target: state.to_string(),
            });
        }
        host.fsm_mut().restore(state);
        Ok(())
    }

    fn dispatch(&self, host: &mut B::Host, msg: &B::Message) -> Result<B::Output, DispatchError> {
        let kind = msg.kind();
        let current = host.fsm().current_state().clone();
        let Some(handler) = self.state(&current).and_then(|s| s.handler(&kind)) else {
            return Err(DispatchError::Unhandled {
                state: current.to_string(),
                kind: format!("{kind:?}"),
            });
        };

        tracing::debug!(state = %current, ?kind, "dispatching message");
        let mut ctx = Context::new(self, host, current);
        Ok(handler(&mut ctx, msg))
    }

    /// Carry out staged transitions until none remain.
    fn settle(&self, host: &mut B::Host) -> Result<(), TransitionError> {
        while let Some(name) = host.fsm_mut().take_pending() {
            if name.is_empty() {
                // An empty name stages nothing; the root is never a target.
                host.fsm_mut().take_reenter();
                tracing::debug!("empty state name staged, ignoring");
                continue;
            }
            let target = self.lookup_state(host.fsm().current_state(), &name);
            self.switch_to(host, &target)?;
        }
        Ok(())
    }

    fn switch_to(&self, host: &mut B::Host, target: &StatePath) -> Result<(), TransitionError> {
        let from = host.fsm().current_state().clone();
        let force_reenter = host.fsm_mut().take_reenter();

        let Some(to_chain) = self.decompose(target) else {
            return Err(TransitionError::UnknownState {
                from: from.to_string(),
                target: target.to_string(),
            });
        };
        let from_chain: &[StatePath] = match self.decompose(&from) {
            Some(chain) => chain,
            None => {
                tracing::warn!(state = %from, "current state is not in the spec; leaving nothing");
                &[]
            }
        };

        let mut common = from_chain
            .iter()
            .zip(to_chain)
            .take_while(|(a, b)| a == b)
            .count();
        if force_reenter && common == to_chain.len() && common > 0 {
            common -= 1;
        }

        tracing::debug!(%from, to = %target, common, force_reenter, "switching state");

        for path in from_chain[common..].iter().rev() {
            if let Some(leave) = self.state(path).and_then(|s| s.leave.as_ref()) {
                host.fsm_mut().set_current(path.clone());
                tracing::trace!(state = %path, "leave");
                if leave(&mut Context::new(self, host, path.clone())) {
                    tracing::debug!(state = %path, "leave hook aborted transition");
                    self.notify(host);
                    return Ok(());
                }
            }
        }

        for path in &to_chain[common..] {
            if let Some(enter) = self.state(path).and_then(|s| s.enter.as_ref()) {
                host.fsm_mut().set_current(path.clone());
                tracing::trace!(state = %path, "enter");
                if enter(&mut Context::new(self, host, path.clone())) {
                    tracing::debug!(state = %path, "enter hook aborted transition");
                    self.notify(host);
                    return Ok(());
                }
            }
        }

        host.fsm_mut().set_current(target.clone());
        self.notify(host);
        Ok(())
    }

    fn notify(&self, host: &mut B::Host) {
        let state = host.fsm().current_state().clone();
        host.fsm_state_name_changed(&state);
    }
}
