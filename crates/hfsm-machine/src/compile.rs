//! # Spec Compiler
//!
//! Turns a `StateNode` tree into a `CompiledSpec`. Runs once per behavior
//! definition, never per instance.
//!
//! ## Passes
//!
//! 1. **Index.** Walk the raw tree and build a table from canonical path to
//!    raw entry (node or alias). Child identifiers are validated against
//!    the grammar and duplicate siblings are rejected here.
//! 2. **Compile.** Walk the tree depth-first from the root. Each state starts
//!    from a copy of its parent's *effective* handler set and overwrites it
//!    with its own handlers, so override chains of any depth resolve at
//!    compile time. Aliases are resolved by table lookup and compiled in
//!    place under the alias path. Descendant `refs` are propagated upward
//!    prefixed by the child's identifier.
//!
//! Any structural error aborts compilation; no partial spec is returned.

use std::collections::HashMap;

use hfsm_core::{CompileError, CompileOptions, IdentifierGrammar, StatePath};

use crate::behavior::{Behavior, Handler, MessageKind};
use crate::compiled::{CompiledSpec, CompiledState};
use crate::spec::{StateNode, StateSpec};

/// Compile `root` with default options.
pub fn compile<B: Behavior>(root: &StateNode<B>) -> Result<CompiledSpec<B>, CompileError> {
    compile_with(root, &CompileOptions::default())
}

/// Compile `root` with the given options.
pub fn compile_with<B: Behavior>(
    root: &StateNode<B>,
    options: &CompileOptions,
) -> Result<CompiledSpec<B>, CompileError> {
    if root.enter.is_some() {
        return Err(CompileError::RootHook { hook: "enter" });
    }
    if root.leave.is_some() {
        return Err(CompileError::RootHook { hook: "leave" });
    }

    let mut table = HashMap::new();
    table.insert(StatePath::root(), RawEntry::Node(root));
    index(root, &StatePath::root(), options.grammar, &mut table)?;

    let mut compiler = Compiler {
        table,
        grammar: options.grammar,
        states: HashMap::new(),
        decompose: HashMap::new(),
        expanding: Vec::new(),
    };
    compiler.compile_node(root, StatePath::root(), StatePath::root(), &HashMap::new(), &[])?;

    tracing::debug!(
        states = compiler.states.len(),
        grammar = %options.grammar,
        "compiled state spec"
    );

    Ok(CompiledSpec {
        states: compiler.states,
        decompose: compiler.decompose,
        grammar: options.grammar,
    })
}

// ─── Pass 1: Index ───────────────────────────────────────────────────

enum RawEntry<'a, B: Behavior> {
    Node(&'a StateNode<B>),
    Alias(&'a str),
}

impl<'a, B: Behavior> Clone for RawEntry<'a, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, B: Behavior> Copy for RawEntry<'a, B> {}

fn child_path(
    parent: &StatePath,
    key: &str,
    grammar: IdentifierGrammar,
) -> Result<StatePath, CompileError> {
    parent
        .join(key, grammar)
        .map_err(|_| CompileError::InvalidIdentifier {
            parent: parent.to_string(),
            key: key.to_string(),
            grammar,
        })
}

fn index<'a, B: Behavior>(
    node: &'a StateNode<B>,
    path: &StatePath,
    grammar: IdentifierGrammar,
    table: &mut HashMap<StatePath, RawEntry<'a, B>>,
) -> Result<(), CompileError> {
    for (key, child) in &node.children {
        let full = child_path(path, key, grammar)?;
        let entry = match child {
            StateSpec::Node(n) => RawEntry::Node(n),
            StateSpec::Alias(target) => RawEntry::Alias(target.as_str()),
        };
        if table.insert(full.clone(), entry).is_some() {
            return Err(CompileError::DuplicateState {
                path: full.to_string(),
            });
        }
        if let StateSpec::Node(n) = child {
            index(n, &full, grammar, table)?;
        }
    }
    Ok(())
}

// ─── Pass 2: Compile ─────────────────────────────────────────────────

struct Compiler<'a, B: Behavior> {
    table: HashMap<StatePath, RawEntry<'a, B>>,
    grammar: IdentifierGrammar,
    states: HashMap<StatePath, CompiledState<B>>,
    decompose: HashMap<StatePath, Vec<StatePath>>,
    /// Canonical paths of the raw nodes on the current walk stack.
    expanding: Vec<StatePath>,
}

impl<'a, B: Behavior> Compiler<'a, B> {
    /// Compile `node` at `path` and return its `refs` table for the parent.
    fn compile_node(
        &mut self,
        node: &'a StateNode<B>,
        path: StatePath,
        origin: StatePath,
        inherited: &HashMap<MessageKind<B>, Handler<B>>,
        ancestry: &[StatePath],
    ) -> Result<HashMap<String, StatePath>, CompileError> {
        let mut handlers = inherited.clone();
        for (kind, handler) in &node.handlers {
            handlers.insert(kind.clone(), handler.clone());
        }

        let mut chain = ancestry.to_vec();
        if !path.is_root() {
            chain.push(path.clone());
        }
        self.decompose.insert(path.clone(), chain.clone());

        self.expanding.push(origin.clone());
        let mut refs = HashMap::new();
        for (key, child) in &node.children {
            let full = child_path(&path, key, self.grammar)?;
            let (child_node, child_origin) = match child {
                StateSpec::Node(n) => (n, child_path(&origin, key, self.grammar)?),
                StateSpec::Alias(target) => self.resolve(&full, target)?,
            };
            let child_refs =
                self.compile_node(child_node, full.clone(), child_origin, &handlers, &chain)?;
            refs.insert(key.clone(), full);
            for (relative, full) in child_refs {
                refs.insert(format!("{key}.{relative}"), full);
            }
        }
        self.expanding.pop();

        self.states.insert(
            path.clone(),
            CompiledState {
                parent: path.parent(),
                path,
                origin,
                handlers,
                enter: node.enter.clone(),
                leave: node.leave.clone(),
                refs: refs.clone(),
            },
        );
        Ok(refs)
    }

    /// Follow an alias (and any alias it points at) to a concrete node.
    fn resolve(
        &self,
        requester: &StatePath,
        target: &str,
    ) -> Result<(&'a StateNode<B>, StatePath), CompileError> {
        let mut visited: Vec<StatePath> = Vec::new();
        let mut current = StatePath::from_dotted(target);
        loop {
            match self.table.get(&current).copied() {
                None => {
                    return Err(CompileError::UnresolvedReference {
                        path: requester.to_string(),
                        target: current.to_string(),
                    })
                }
                Some(RawEntry::Node(node)) => {
                    if self.expanding.contains(&current) {
                        return Err(CompileError::RecursiveReference {
                            path: requester.to_string(),
                            target: current.to_string(),
                        });
                    }
                    tracing::trace!(alias = %requester, target = %current, "resolved state reference");
                    return Ok((node, current));
                }
                Some(RawEntry::Alias(next)) => {
                    if visited.contains(&current) {
                        return Err(CompileError::RecursiveReference {
                            path: requester.to_string(),
                            target: current.to_string(),
                        });
                    }
                    visited.push(current);
                    current = StatePath::from_dotted(next);
                }
            }
        }
    }
}
