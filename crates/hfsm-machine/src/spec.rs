//! # Author-Facing State Specs
//!
//! A behavior is declared as a tree of `StateNode`s. Each node carries its
//! own message handlers, optional `enter` / `leave` hooks, and named
//! children. A child may instead be an alias: the absolute dotted path of a
//! node declared elsewhere in the same tree, whose behavior is reused under
//! the alias's own path.
//!
//! ```ignore
//! let spec = StateNode::<UnitAi>::new()
//!     .on(Kind::Attacked, |ctx, _| { ctx.set_next_state("COMBAT"); true })
//!     .state("IDLE", StateNode::<UnitAi>::new().on_enter(|ctx| { ctx.host_mut().stop(); false }))
//!     .state("COMBAT", StateNode::new()
//!         .state("APPROACHING", StateNode::new())
//!         .state("ATTACKING", StateNode::new()))
//!     .alias("GUARD", "COMBAT");
//! ```
//!
//! Specs are inert data. Nothing is validated until `compile`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::behavior::{Behavior, Handler, Hook, MessageKind};
use crate::context::Context;

/// A child entry in a state spec.
pub enum StateSpec<B: Behavior> {
    /// A state declared in place.
    Node(StateNode<B>),
    /// A reference to another state by absolute dotted path.
    Alias(String),
}

/// One state declaration.
pub struct StateNode<B: Behavior> {
    pub(crate) handlers: HashMap<MessageKind<B>, Handler<B>>,
    pub(crate) enter: Option<Hook<B>>,
    pub(crate) leave: Option<Hook<B>>,
    pub(crate) children: Vec<(String, StateSpec<B>)>,
}

impl<B: Behavior> StateNode<B> {
    /// An empty state with no handlers, hooks, or children.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            enter: None,
            leave: None,
            children: Vec::new(),
        }
    }

    /// Declare the handler for `kind`, replacing any earlier declaration on
    /// this node. Overrides the handler inherited from ancestors.
    pub fn on<F>(mut self, kind: MessageKind<B>, handler: F) -> Self
    where
        F: Fn(&mut Context<'_, B>, &B::Message) -> B::Output + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Arc::new(handler));
        self
    }

    /// Declare the enter hook. Not inherited by children.
    pub fn on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context<'_, B>) -> bool + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(hook));
        self
    }

    /// Declare the leave hook. Not inherited by children.
    pub fn on_leave<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Context<'_, B>) -> bool + Send + Sync + 'static,
    {
        self.leave = Some(Arc::new(hook));
        self
    }

    /// Add a nested child state.
    pub fn state(mut self, name: impl Into<String>, child: StateNode<B>) -> Self {
        self.children.push((name.into(), StateSpec::Node(child)));
        self
    }

    /// Add a child that reuses the state at absolute path `target`.
    pub fn alias(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.children
            .push((name.into(), StateSpec::Alias(target.into())));
        self
    }

    /// Add a child entry built elsewhere.
    pub fn child(mut self, name: impl Into<String>, child: StateSpec<B>) -> Self {
        self.children.push((name.into(), child));
        self
    }

    /// Set a handler in place. Used by builders that assemble nodes
    /// incrementally rather than by chaining.
    pub fn insert_handler(&mut self, kind: MessageKind<B>, handler: Handler<B>) {
        self.handlers.insert(kind, handler);
    }

    /// Set the enter hook in place.
    pub fn set_enter(&mut self, hook: Hook<B>) {
        self.enter = Some(hook);
    }

    /// Set the leave hook in place.
    pub fn set_leave(&mut self, hook: Hook<B>) {
        self.leave = Some(hook);
    }

    /// Append a child entry in place.
    pub fn push_child(&mut self, name: impl Into<String>, child: StateSpec<B>) {
        self.children.push((name.into(), child));
    }
}

impl<B: Behavior> Default for StateNode<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Behavior> std::fmt::Debug for StateNode<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateNode")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl<B: Behavior> std::fmt::Debug for StateSpec<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(node) => node.fmt(f),
            Self::Alias(target) => f.debug_tuple("Alias").field(target).finish(),
        }
    }
}
