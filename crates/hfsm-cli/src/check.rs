//! # Check Subcommand
//!
//! Compiles a behavior document and reports the outcome without running
//! anything.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use hfsm_core::IdentifierGrammar;
use hfsm_machine::compile_with;

use crate::document::BehaviorDocument;

/// Arguments for the `hfsm check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Behavior document (YAML, or JSON with a `.json` extension).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 when the document compiles, 1 when it does not.
/// Unreadable or malformed documents are errors.
pub fn run_check(args: &CheckArgs, grammar: Option<IdentifierGrammar>) -> Result<u8> {
    let doc = BehaviorDocument::load(&args.file)?;
    let options = doc.options(grammar);
    let node = doc.build(options.grammar)?;

    match compile_with(&node, &options) {
        Ok(spec) => {
            println!(
                "OK: {} ({} states, grammar {})",
                args.file.display(),
                spec.len(),
                options.grammar.as_str()
            );
            Ok(0)
        }
        Err(err) => {
            tracing::debug!(?err, "compile failed");
            println!("FAIL: {}: {err}", args.file.display());
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(contents: &str, grammar: Option<IdentifierGrammar>) -> Result<u8> {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("behavior.yaml");
        std::fs::write(&file, contents).unwrap();
        run_check(&CheckArgs { file }, grammar)
    }

    #[test]
    fn valid_document_passes() {
        assert_eq!(check("IDLE:\n  walk: { next: WALKING }\nWALKING: {}\n", None).unwrap(), 0);
    }

    #[test]
    fn unresolved_alias_fails() {
        assert_eq!(check("PATROL: NOWHERE\n", None).unwrap(), 1);
    }

    #[test]
    fn recursive_alias_fails() {
        assert_eq!(check("A:\n  B: A\n", None).unwrap(), 1);
    }

    #[test]
    fn root_hook_fails() {
        assert_eq!(check("enter: { log: hi }\n", None).unwrap(), 1);
    }

    #[test]
    fn grammar_override_changes_classification() {
        // Under upper-snake, COMBAT_2 is a state and its alias must resolve.
        let doc = "COMBAT_2: MISSING\n";
        assert_eq!(check(doc, Some(IdentifierGrammar::UpperSnake)).unwrap(), 1);
        // Under uppercase it is a handler replying "MISSING".
        assert_eq!(check(doc, Some(IdentifierGrammar::Uppercase)).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let args = CheckArgs {
            file: PathBuf::from("/nonexistent/behavior.yaml"),
        };
        assert!(run_check(&args, None).is_err());
    }
}
