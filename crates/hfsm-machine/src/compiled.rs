//! # Compiled Specs
//!
//! The output of the spec compiler: a flat state table and a decomposition
//! table, both keyed by `StatePath`. A `CompiledSpec` is immutable once
//! built and is shared by every instance of the behavior, typically through
//! an `Arc`.
//!
//! ## Invariants
//!
//! - Every state's `handlers` map is the union of its own handlers and every
//!   ancestor handler it did not redeclare. Dispatch is one map lookup.
//! - `decompose[p]` is the root-first chain of non-root ancestors of `p`,
//!   ending in `p` itself. The root decomposes to `[]`.
//! - `refs` of a state maps every descendant's relative dotted name to its
//!   full path.

use std::collections::HashMap;

use hfsm_core::{IdentifierGrammar, StatePath};

use crate::behavior::{Behavior, Handler, Hook, MessageKind};

/// One state of a compiled spec.
pub struct CompiledState<B: Behavior> {
    pub(crate) path: StatePath,
    pub(crate) parent: Option<StatePath>,
    pub(crate) origin: StatePath,
    pub(crate) handlers: HashMap<MessageKind<B>, Handler<B>>,
    pub(crate) enter: Option<Hook<B>>,
    pub(crate) leave: Option<Hook<B>>,
    pub(crate) refs: HashMap<String, StatePath>,
}

impl<B: Behavior> CompiledState<B> {
    /// Full path of this state.
    pub fn path(&self) -> &StatePath {
        &self.path
    }

    /// Path of the enclosing state. `None` for the root.
    pub fn parent(&self) -> Option<&StatePath> {
        self.parent.as_ref()
    }

    /// Path of the declaration this state was compiled from. Equal to
    /// `path()` unless the state, or one of its ancestors, is an alias.
    pub fn origin(&self) -> &StatePath {
        &self.origin
    }

    /// Whether this is an aliased copy of a state declared elsewhere.
    pub fn is_alias(&self) -> bool {
        self.origin != self.path
    }

    /// Whether a message of `kind` has a handler here, declared or inherited.
    pub fn handles(&self, kind: &MessageKind<B>) -> bool {
        self.handlers.contains_key(kind)
    }

    /// Every message kind with a handler here, declared or inherited.
    pub fn handler_kinds(&self) -> impl Iterator<Item = &MessageKind<B>> {
        self.handlers.keys()
    }

    /// Whether this state declares an enter hook.
    pub fn has_enter(&self) -> bool {
        self.enter.is_some()
    }

    /// Whether this state declares a leave hook.
    pub fn has_leave(&self) -> bool {
        self.leave.is_some()
    }

    /// Relative names of all descendants, mapped to their full paths.
    pub fn refs(&self) -> &HashMap<String, StatePath> {
        &self.refs
    }

    pub(crate) fn handler(&self, kind: &MessageKind<B>) -> Option<&Handler<B>> {
        self.handlers.get(kind)
    }
}

impl<B: Behavior> std::fmt::Debug for CompiledState<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledState")
            .field("path", &self.path)
            .field("origin", &self.origin)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("enter", &self.enter.is_some())
            .field("leave", &self.leave.is_some())
            .field("refs", &self.refs)
            .finish()
    }
}

/// A compiled behavior: state table plus decomposition table.
pub struct CompiledSpec<B: Behavior> {
    pub(crate) states: HashMap<StatePath, CompiledState<B>>,
    pub(crate) decompose: HashMap<StatePath, Vec<StatePath>>,
    pub(crate) grammar: IdentifierGrammar,
}

impl<B: Behavior> CompiledSpec<B> {
    /// The compiled state at `path`.
    pub fn state(&self, path: &StatePath) -> Option<&CompiledState<B>> {
        self.states.get(path)
    }

    /// Whether `path` names a compiled state.
    pub fn contains(&self, path: &StatePath) -> bool {
        self.states.contains_key(path)
    }

    /// The root-first ancestor chain of `path`, ending in `path`.
    pub fn decompose(&self, path: &StatePath) -> Option<&[StatePath]> {
        self.decompose.get(path).map(Vec::as_slice)
    }

    /// All state paths in sorted order, root first.
    pub fn paths(&self) -> Vec<&StatePath> {
        let mut paths: Vec<_> = self.states.keys().collect();
        paths.sort();
        paths
    }

    /// Number of compiled states, including the root.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: a compiled spec has at least the root.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Grammar the spec was compiled with.
    pub fn grammar(&self) -> IdentifierGrammar {
        self.grammar
    }

    /// Resolve a possibly relative state name as seen from `current`.
    ///
    /// Climbs from `current` through each ancestor to the root, returning
    /// the first match in that state's `refs`. A name no state recognises
    /// is taken to be an absolute path.
    pub fn lookup_state(&self, current: &StatePath, name: &str) -> StatePath {
        let mut cursor = Some(current.clone());
        while let Some(path) = cursor {
            if let Some(target) = self.states.get(&path).and_then(|s| s.refs.get(name)) {
                return target.clone();
            }
            cursor = path.parent();
        }
        StatePath::from_dotted(name)
    }
}

impl<B: Behavior> std::fmt::Debug for CompiledSpec<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSpec")
            .field("states", &self.paths())
            .field("grammar", &self.grammar)
            .finish()
    }
}
