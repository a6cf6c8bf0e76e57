//! # Inspect Subcommand
//!
//! Prints the compiled form of a behavior document: one record per state
//! with its parent, alias origin, resolved handler set, hooks, ancestor
//! chain, and relative-name table.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use hfsm_core::{IdentifierGrammar, StatePath};
use hfsm_machine::CompiledSpec;

use crate::script::ScriptBehavior;

/// Output format for `hfsm inspect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for the `hfsm inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Behavior document (YAML, or JSON with a `.json` extension).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Compiled tables of one behavior.
#[derive(Debug, Serialize)]
pub struct SpecReport {
    pub grammar: IdentifierGrammar,
    pub states: Vec<StateReport>,
}

/// One row of the compiled state table.
#[derive(Debug, Serialize)]
pub struct StateReport {
    pub path: StatePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<StatePath>,
    /// Declaration this state was copied from, for aliases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<StatePath>,
    pub handlers: Vec<String>,
    pub enter: bool,
    pub leave: bool,
    pub decompose: Vec<StatePath>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub refs: BTreeMap<String, StatePath>,
}

impl SpecReport {
    pub fn from_spec(spec: &CompiledSpec<ScriptBehavior>) -> Self {
        let states = spec
            .paths()
            .into_iter()
            .filter_map(|path| spec.state(path))
            .map(|state| {
                let mut handlers: Vec<String> = state.handler_kinds().cloned().collect();
                handlers.sort();
                StateReport {
                    path: state.path().clone(),
                    parent: state.parent().cloned(),
                    alias_of: state.is_alias().then(|| state.origin().clone()),
                    handlers,
                    enter: state.has_enter(),
                    leave: state.has_leave(),
                    decompose: spec.decompose(state.path()).map(<[_]>::to_vec).unwrap_or_default(),
                    refs: state
                        .refs()
                        .iter()
                        .map(|(name, path)| (name.clone(), path.clone()))
                        .collect(),
                }
            })
            .collect();
        Self {
            grammar: spec.grammar(),
            states,
        }
    }
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs, grammar: Option<IdentifierGrammar>) -> Result<u8> {
    let spec = crate::load_spec(&args.file, grammar)?;
    let report = SpecReport::from_spec(&spec);
    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Yaml => serde_yaml::to_string(&report)?,
    };
    println!("{}", rendered.trim_end());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BehaviorDocument, SourceFormat};
    use hfsm_machine::compile_with;

    fn report(text: &str) -> SpecReport {
        let doc = BehaviorDocument::parse(text, SourceFormat::Yaml).unwrap();
        let options = doc.options(None);
        let spec = compile_with(&doc.build(options.grammar).unwrap(), &options).unwrap();
        SpecReport::from_spec(&spec)
    }

    fn row<'r>(report: &'r SpecReport, path: &str) -> &'r StateReport {
        report
            .states
            .iter()
            .find(|s| s.path.as_str() == path)
            .unwrap()
    }

    #[test]
    fn rows_carry_resolved_tables() {
        let report = report(
            r#"
stop: { next: IDLE }
COMBAT:
  hit: ouch
  enter: { log: engaging }
  MELEE: {}
GUARD: COMBAT
IDLE: {}
"#,
        );

        let paths: Vec<_> = report.states.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["", "COMBAT", "COMBAT.MELEE", "GUARD", "GUARD.MELEE", "IDLE"]
        );

        let melee = row(&report, "COMBAT.MELEE");
        assert_eq!(melee.handlers, vec!["hit", "stop"]);
        assert!(!melee.enter);
        assert_eq!(
            melee.decompose,
            vec![StatePath::from_dotted("COMBAT"), StatePath::from_dotted("COMBAT.MELEE")]
        );
        assert_eq!(melee.parent, Some(StatePath::from_dotted("COMBAT")));

        let guard = row(&report, "GUARD");
        assert_eq!(guard.alias_of, Some(StatePath::from_dotted("COMBAT")));
        assert!(guard.enter);
        assert_eq!(guard.refs.get("MELEE"), Some(&StatePath::from_dotted("GUARD.MELEE")));

        let root = row(&report, "");
        assert!(root.decompose.is_empty());
        assert!(root.parent.is_none());
        assert_eq!(root.refs.get("COMBAT.MELEE"), Some(&StatePath::from_dotted("COMBAT.MELEE")));
    }

    #[test]
    fn json_rendering_omits_empty_fields() {
        let report = report("IDLE: {}\n");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["grammar"], "uppercase");
        let idle = &value["states"][1];
        assert_eq!(idle["path"], "IDLE");
        assert_eq!(idle["parent"], "");
        assert!(idle.get("alias_of").is_none());
        assert!(idle.get("refs").is_none());
    }

    #[test]
    fn inspect_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("behavior.yaml");
        std::fs::write(&file, "IDLE: {}\n").unwrap();
        let args = InspectArgs {
            file,
            format: OutputFormat::Yaml,
        };
        assert_eq!(run_inspect(&args, None).unwrap(), 0);
    }

    #[test]
    fn inspect_rejects_uncompilable_document() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("behavior.yaml");
        std::fs::write(&file, "PATROL: NOWHERE\n").unwrap();
        let args = InspectArgs {
            file,
            format: OutputFormat::Json,
        };
        let err = run_inspect(&args, None).unwrap_err();
        assert!(err.to_string().contains("failed to compile"));
    }
}
