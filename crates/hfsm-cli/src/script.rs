//! # Scripted Behaviors
//!
//! The behavior type that declarative documents compile to. Messages are
//! bare kind names, and every handler or hook performs one `Action`.
//!
//! ## Actions
//!
//! | field     | handler | hook | effect                                        |
//! |-----------|---------|------|-----------------------------------------------|
//! | `log`     | yes     | yes  | append a line to the host trace               |
//! | `next`    | yes     | yes  | stage a transition                            |
//! | `reenter` | yes     | yes  | make the staged transition a forced re-entry  |
//! | `reply`   | yes     | no   | value returned to the caller                  |
//! | `defer`   | yes     | no   | hand the message to the parent state first    |
//! | `abort`   | no      | yes  | abort the running transition                  |
//!
//! A deferred reply, when there is one, wins over the handler's own `reply`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hfsm_core::{Message, StatePath};
use hfsm_machine::{Behavior, Context, FsmHost, Handler, Hook, Instance};

/// A message identified only by its kind name, e.g. `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMessage {
    kind: String,
}

impl NamedMessage {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn name(&self) -> &str {
        &self.kind
    }
}

impl Message for NamedMessage {
    type Kind = String;

    fn kind(&self) -> String {
        self.kind.clone()
    }
}

/// Host for scripted behaviors: an instance plus a trace of everything the
/// behavior did, in order.
#[derive(Debug, Default)]
pub struct ScriptHost {
    pub fsm: Instance,
    pub trace: Vec<String>,
}

impl ScriptHost {
    /// Take the trace accumulated so far, leaving it empty.
    pub fn drain_trace(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace)
    }
}

impl FsmHost for ScriptHost {
    fn fsm(&self) -> &Instance {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut Instance {
        &mut self.fsm
    }

    fn fsm_state_name_changed(&mut self, state: &StatePath) {
        self.trace.push(format!("state {}", state_label(state)));
    }
}

/// Behavior marker for documents loaded by the CLI.
pub struct ScriptBehavior;

impl Behavior for ScriptBehavior {
    type Host = ScriptHost;
    type Message = NamedMessage;
    type Output = Option<String>;
}

/// Printable name of a state; the root has an empty path.
pub fn state_label(path: &StatePath) -> &str {
    if path.is_root() {
        "<root>"
    } else {
        path.as_str()
    }
}

/// What a scripted handler or hook does when it runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Action {
    pub log: Option<String>,
    pub reply: Option<String>,
    pub next: Option<String>,
    pub reenter: bool,
    pub defer: bool,
    pub abort: bool,
}

impl Action {
    /// Read an action from a document value. A bare string is a reply and
    /// an empty value does nothing.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::String(reply) => Ok(Self {
                reply: Some(reply.clone()),
                ..Self::default()
            }),
            other => serde_json::from_value(other.clone()),
        }
    }

    pub fn into_handler(self) -> Handler<ScriptBehavior> {
        Arc::new(
            move |ctx: &mut Context<'_, ScriptBehavior>, msg: &NamedMessage| {
                self.run_handler(ctx, msg)
            },
        )
    }

    pub fn into_hook(self, hook: &'static str) -> Hook<ScriptBehavior> {
        Arc::new(move |ctx: &mut Context<'_, ScriptBehavior>| self.run_hook(hook, ctx))
    }

    fn run_handler(
        &self,
        ctx: &mut Context<'_, ScriptBehavior>,
        msg: &NamedMessage,
    ) -> Option<String> {
        self.record(ctx);
        self.stage(ctx);
        let deferred = if self.defer {
            ctx.defer_message(msg).flatten()
        } else {
            None
        };
        deferred.or_else(|| self.reply.clone())
    }

    fn run_hook(&self, hook: &str, ctx: &mut Context<'_, ScriptBehavior>) -> bool {
        let line = format!("{hook} {}", state_label(ctx.handling_state()));
        ctx.host_mut().trace.push(line);
        self.record(ctx);
        self.stage(ctx);
        self.abort
    }

    fn record(&self, ctx: &mut Context<'_, ScriptBehavior>) {
        if let Some(text) = &self.log {
            let state = state_label(ctx.handling_state()).to_string();
            tracing::info!(%state, "{text}");
            ctx.host_mut().trace.push(format!("log {state}: {text}"));
        }
    }

    fn stage(&self, ctx: &mut Context<'_, ScriptBehavior>) {
        match (&self.next, self.reenter) {
            (Some(next), true) => ctx.set_next_state_always_entering(next.clone()),
            (Some(next), false) => ctx.set_next_state(next.clone()),
            (None, _) => {}
        }
    }
}
