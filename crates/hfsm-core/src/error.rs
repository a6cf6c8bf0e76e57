//! # Structured Error Hierarchy
//!
//! Defines the error types used throughout the HFSM runtime. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Compile errors are fatal: no partial compiled spec is ever produced.
//! - Dispatch and transition errors are local. The engine logs them and
//!   leaves the instance in a well-defined state; the `try_*` entry points
//!   surface them to callers that want to react.
//! - State names are carried as dotted strings so errors stay readable
//!   without access to the compiled tables.

use thiserror::Error;

use crate::grammar::IdentifierGrammar;

/// Top-level error type for the HFSM runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HfsmError {
    /// Spec compilation failed.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// Message dispatch failed.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// A state transition was rejected.
    #[error("transition error: {0}")]
    Transition(#[from] TransitionError),

    /// A dotted path could not be parsed.
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

/// Structural error in a state spec. Fatal to compilation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A child-state key does not match the configured identifier grammar.
    #[error("invalid state identifier '{key}' under '{parent}' (expected {grammar})")]
    InvalidIdentifier {
        /// Path of the state declaring the child.
        parent: String,
        /// The offending key.
        key: String,
        /// Grammar the key was checked against.
        grammar: IdentifierGrammar,
    },

    /// Two siblings share the same identifier.
    #[error("state '{path}' is declared more than once")]
    DuplicateState {
        /// Full path of the duplicated state.
        path: String,
    },

    /// A state reference names a path that does not exist in the spec.
    #[error("state '{path}' references unknown state '{target}'")]
    UnresolvedReference {
        /// Path of the referencing state.
        path: String,
        /// The referenced path, as written.
        target: String,
    },

    /// A state reference points at a node that encloses it, which would
    /// expand into an infinite tree.
    #[error("state '{path}' references enclosing state '{target}'")]
    RecursiveReference {
        /// Path of the referencing state.
        path: String,
        /// The referenced path.
        target: String,
    },

    /// The root state declares an enter or leave hook. The root is never
    /// entered or left, so such a hook would never run.
    #[error("root state cannot declare an '{hook}' hook")]
    RootHook {
        /// `"enter"` or `"leave"`.
        hook: &'static str,
    },
}

/// A transition request that could not be carried out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The target path is not a compiled state. The instance keeps its
    /// current state; no hook has run.
    #[error("cannot switch from '{from}' to unknown state '{target}'")]
    UnknownState {
        /// State the instance was in.
        from: String,
        /// Resolved target path.
        target: String,
    },
}

/// A message that could not be delivered to a handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No handler for the message kind in the current state.
    #[error("unhandled message {kind} in state '{state}'")]
    Unhandled {
        /// Current state path.
        state: String,
        /// Debug rendering of the message kind.
        kind: String,
    },

    /// A message was deferred from the root, which has no parent.
    #[error("cannot defer message {kind} past the root state")]
    DeferFromRoot {
        /// Debug rendering of the message kind.
        kind: String,
    },

    /// The parent of the defer cursor has no handler for the message kind.
    #[error("deferred message {kind} from '{from}' has no handler in '{parent}'")]
    NoDeferTarget {
        /// State the message was deferred from.
        from: String,
        /// Parent state that was searched.
        parent: String,
        /// Debug rendering of the message kind.
        kind: String,
    },

    /// The handler ran, but the transition it staged was rejected.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Error parsing or extending a dotted state path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A segment does not match the identifier grammar.
    #[error("invalid segment '{segment}' in state path '{path}' (expected {grammar})")]
    InvalidSegment {
        /// The full path as written.
        path: String,
        /// The offending segment.
        segment: String,
        /// Grammar the segment was checked against.
        grammar: IdentifierGrammar,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_converts_into_top_level() {
        let err: HfsmError = CompileError::RootHook { hook: "enter" }.into();
        assert!(matches!(err, HfsmError::Compile(_)));
        assert_eq!(
            err.to_string(),
            "compile error: root state cannot declare an 'enter' hook"
        );
    }

    #[test]
    fn transition_error_is_transparent_inside_dispatch() {
        let err: DispatchError = TransitionError::UnknownState {
            from: "A".into(),
            target: "Z".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "cannot switch from 'A' to unknown state 'Z'"
        );
    }

    #[test]
    fn unhandled_message_names_state_and_kind() {
        let err = DispatchError::Unhandled {
            state: "A.B".into(),
            kind: "Attacked".into(),
        };
        assert_eq!(err.to_string(), "unhandled message Attacked in state 'A.B'");
    }
}
