//! # hfsm-core — Foundational Types for the HFSM Runtime
//!
//! This crate is the leaf of the workspace. It defines the value types shared
//! by the spec compiler and the dispatch engine in `hfsm-machine`, and by the
//! `hfsm` CLI. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`StatePath` newtype.** Every state is addressed by a dotted path such
//!    as `"A.B.C"`. The root is the empty path. Paths are values with
//!    structural equality and hashing, so compiled tables are keyed by
//!    `StatePath` rather than bare strings.
//!
//! 2. **Configurable identifier grammar.** Child-state keys are validated
//!    against an `IdentifierGrammar`. The default accepts uppercase ASCII
//!    letters only.
//!
//! 3. **Typed message kinds.** Handler tables are keyed by `Message::Kind`,
//!    normally a fieldless enum, never by free-form strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hfsm-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod grammar;
pub mod message;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use config::CompileOptions;
pub use error::{CompileError, DispatchError, HfsmError, PathError, TransitionError};
pub use grammar::IdentifierGrammar;
pub use message::Message;
pub use path::StatePath;
