//! # hfsm-cli — Command-Line Interface for Behavior Documents
//!
//! Provides the `hfsm` binary, which works on behaviors declared in YAML or
//! JSON rather than in Rust.
//!
//! ## Subcommands
//!
//! - `hfsm check`: Compile a document and report whether it is valid.
//! - `hfsm inspect`: Print the compiled state and decomposition tables.
//! - `hfsm run`: Drive an instance through a list of messages and print
//!   what happened.
//!
//! ```bash
//! hfsm check behaviors/unit_ai.yaml
//! hfsm inspect behaviors/unit_ai.yaml --format yaml
//! hfsm run behaviors/unit_ai.yaml --initial IDLE walk attacked stop
//! ```
//!
//! ## Exit Codes
//!
//! 0 on success, 1 when the document does not compile (or, for `run
//! --strict`, when a message is rejected), 2 on operational errors such as
//! an unreadable file.

pub mod check;
pub mod document;
pub mod inspect;
pub mod run;
pub mod script;

use std::path::Path;

use anyhow::{Context, Result};

use hfsm_core::IdentifierGrammar;
use hfsm_machine::{compile_with, CompiledSpec};

use crate::document::BehaviorDocument;
use crate::script::ScriptBehavior;

/// Load, build, and compile the document at `path`. A compile failure is
/// an error here; `check` reports it separately.
pub fn load_spec(
    path: &Path,
    grammar: Option<IdentifierGrammar>,
) -> Result<CompiledSpec<ScriptBehavior>> {
    let doc = BehaviorDocument::load(path)?;
    let options = doc.options(grammar);
    let node = doc.build(options.grammar)?;
    let spec = compile_with(&node, &options)
        .with_context(|| format!("failed to compile {}", path.display()))?;
    tracing::debug!(file = %path.display(), states = spec.len(), "compiled behavior");
    Ok(spec)
}
