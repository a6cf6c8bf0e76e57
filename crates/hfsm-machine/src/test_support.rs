//! Shared fixtures for unit tests.

use hfsm_core::{IdentifierGrammar, Message, StatePath};

use crate::behavior::{Behavior, FsmHost};
use crate::instance::Instance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Foo,
    Bar,
    Baz,
}

impl Message for Kind {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        *self
    }
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub fsm: Instance,
    pub log: Vec<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FsmHost for Recorder {
    fn fsm(&self) -> &Instance {
        &self.fsm
    }

    fn fsm_mut(&mut self) -> &mut Instance {
        &mut self.fsm
    }

    fn fsm_state_name_changed(&mut self, state: &StatePath) {
        self.log.push(format!("changed:{state}"));
    }
}

pub struct Probe;

impl Behavior for Probe {
    type Host = Recorder;
    type Message = Kind;
    type Output = String;
}

pub fn path(s: &str) -> StatePath {
    StatePath::parse(s, IdentifierGrammar::Uppercase).unwrap()
}
