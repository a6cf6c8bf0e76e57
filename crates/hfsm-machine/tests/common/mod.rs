//! Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use hfsm_core::{IdentifierGrammar, Message, StatePath};
use hfsm_machine::{Behavior, Context, FsmHost, Instance, StateNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Foo,
    Ping,
    Goto(&'static str),
    Reenter(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MsgKind {
    Foo,
    Ping,
    Goto,
    Reenter,
}

impl Message for Msg {
    type Kind = MsgKind;

    fn kind(&self) -> MsgKind {
        match self {
            Msg::Foo => MsgKind::Foo,
            Msg::Ping => MsgKind::Ping,
            Msg::Goto(_) => MsgKind::Goto,
            Msg::Reenter(_) => MsgKind::Reenter,
        }
    }
}

/// A consumer that records hook activity and state-change notifications.
#[derive(Debug, Default)]
pub struct Unit {
    pub fsm: Instance,
    pub log: Vec<String>,
    pub changes: Vec<String>,
}

impl FsmHost for Unit {
    fn fsm(&self) -> &Instance {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut Instance {
        &mut self.fsm
    }

    fn fsm_state_name_changed(&mut self, state: &StatePath) {
        self.changes.push(state.to_string());
    }
}

pub struct UnitAi;

impl Behavior for UnitAi {
    type Host = Unit;
    type Message = Msg;
    type Output = String;
}

pub type Node = StateNode<UnitAi>;

pub fn node() -> Node {
    StateNode::new()
}

pub fn path(s: &str) -> StatePath {
    StatePath::parse(s, IdentifierGrammar::Uppercase).unwrap()
}

/// Root handlers that stage transitions named in the message.
pub fn navigable() -> Node {
    node()
        .on(MsgKind::Goto, |ctx, msg| {
            if let Msg::Goto(target) = msg {
                ctx.set_next_state(*target);
            }
            "goto".to_string()
        })
        .on(MsgKind::Reenter, |ctx, msg| {
            if let Msg::Reenter(target) = msg {
                ctx.set_next_state_always_entering(*target);
            }
            "reenter".to_string()
        })
}

/// A state whose enter and leave hooks append `enter:<path>` and
/// `leave:<path>` to the host log.
pub fn logged() -> Node {
    node()
        .on_enter(|ctx| {
            let entry = format!("enter:{}", ctx.current_state());
            ctx.host_mut().log.push(entry);
            false
        })
        .on_leave(|ctx| {
            let entry = format!("leave:{}", ctx.current_state());
            ctx.host_mut().log.push(entry);
            false
        })
}

pub fn push(ctx: &mut Context<'_, UnitAi>, entry: &str) {
    ctx.host_mut().log.push(entry.to_string());
}

/// Enable log output for a test run. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
