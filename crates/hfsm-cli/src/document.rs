//! # Behavior Documents
//!
//! Loads a behavior from YAML or JSON and builds the `StateNode` tree the
//! compiler takes. The top-level mapping is the root state. Inside any state
//! mapping:
//!
//! - `enter` and `leave` are hooks.
//! - A key matching the identifier grammar is a child state. Its value is a
//!   mapping (a nested state), a string (an alias to another state's
//!   absolute path), or empty (a state with nothing declared).
//! - Any other key is a handler for the message kind of the same name.
//!
//! The root mapping may also carry `grammar`, the identifier grammar to
//! compile with.
//!
//! ```yaml
//! grammar: upper-snake
//! stop: { next: IDLE }
//! IDLE:
//!   walk: { next: WALKING, reply: ok }
//! WALKING:
//!   enter: { log: started moving }
//! PATROL: WALKING
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use hfsm_core::{CompileOptions, IdentifierGrammar, StatePath};
use hfsm_machine::{StateNode, StateSpec};

use crate::script::{state_label, Action, ScriptBehavior};

/// Serialization format of a behavior document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Json,
}

impl SourceFormat {
    /// `.json` files are JSON; everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// A parsed, not yet built, behavior document.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorDocument {
    grammar: Option<IdentifierGrammar>,
    root: Map<String, Value>,
}

impl BehaviorDocument {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&text, SourceFormat::from_path(path))
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(text: &str, format: SourceFormat) -> Result<Self> {
        let value: Value = match format {
            SourceFormat::Yaml => serde_yaml::from_str(text)?,
            SourceFormat::Json => serde_json::from_str(text)?,
        };
        let mut root = match value {
            Value::Object(root) => root,
            // An empty YAML document is an empty root.
            Value::Null => Map::new(),
            other => bail!("top level must be a mapping, found {}", value_kind(&other)),
        };
        let grammar = root
            .remove("grammar")
            .map(serde_json::from_value)
            .transpose()
            .context("invalid 'grammar'")?;
        Ok(Self { grammar, root })
    }

    /// The grammar named by the document, if any.
    pub fn grammar(&self) -> Option<IdentifierGrammar> {
        self.grammar
    }

    /// Compile options for this document. `grammar` overrides the
    /// document's own choice.
    pub fn options(&self, grammar: Option<IdentifierGrammar>) -> CompileOptions {
        CompileOptions::with_grammar(grammar.or(self.grammar).unwrap_or_default())
    }

    /// Build the state tree, classifying keys with `grammar`.
    pub fn build(&self, grammar: IdentifierGrammar) -> Result<StateNode<ScriptBehavior>> {
        build_node(&self.root, grammar, &StatePath::root())
    }
}

fn build_node(
    map: &Map<String, Value>,
    grammar: IdentifierGrammar,
    at: &StatePath,
) -> Result<StateNode<ScriptBehavior>> {
    let mut node = StateNode::<ScriptBehavior>::new();
    for (key, value) in map {
        match key.as_str() {
            hook @ ("enter" | "leave") => {
                let action = hook_action(value)
                    .with_context(|| format!("invalid '{hook}' hook in state '{}'", state_label(at)))?;
                if hook == "enter" {
                    node.set_enter(action.into_hook("enter"));
                } else {
                    node.set_leave(action.into_hook("leave"));
                }
            }
            name if grammar.accepts(name) => {
                let path = at.join(name, grammar)?;
                let child = match value {
                    Value::String(target) => StateSpec::Alias(target.clone()),
                    Value::Object(inner) => StateSpec::Node(build_node(inner, grammar, &path)?),
                    Value::Null => StateSpec::Node(StateNode::new()),
                    other => bail!(
                        "state '{path}' must be a mapping or an alias string, found {}",
                        value_kind(other)
                    ),
                };
                node.push_child(name, child);
            }
            kind => {
                let action = handler_action(value).with_context(|| {
                    format!("invalid handler '{kind}' in state '{}'", state_label(at))
                })?;
                node.insert_handler(kind.to_string(), action.into_handler());
            }
        }
    }
    Ok(node)
}

fn hook_action(value: &Value) -> Result<Action> {
    let action = Action::from_value(value)?;
    if action.reply.is_some() || action.defer {
        bail!("hooks cannot reply or defer");
    }
    Ok(action)
}

fn handler_action(value: &Value) -> Result<Action> {
    let action = Action::from_value(value)?;
    if action.abort {
        bail!("only hooks can abort");
    }
    Ok(action)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hfsm_machine::compile_with;

    fn yaml(text: &str) -> BehaviorDocument {
        BehaviorDocument::parse(text, SourceFormat::Yaml).unwrap()
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.json")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.JSON")), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("a.yaml")), SourceFormat::Yaml);
        assert_eq!(SourceFormat::from_path(Path::new("behavior")), SourceFormat::Yaml);
    }

    #[test]
    fn keys_are_classified_by_grammar() {
        let doc = yaml(
            r#"
stop: { next: IDLE }
IDLE:
  walk: { next: WALKING }
WALKING:
  enter: { log: moving }
PATROL: WALKING
"#,
        );
        let spec = compile_with(&doc.build(IdentifierGrammar::Uppercase).unwrap(), &doc.options(None))
            .unwrap();

        let paths: Vec<_> = spec.paths().into_iter().map(|p| p.to_string()).collect();
        assert_eq!(paths, vec!["", "IDLE", "PATROL", "WALKING"]);

        let walking = spec.state(&StatePath::from_dotted("WALKING")).unwrap();
        assert!(walking.has_enter());
        assert!(walking.handles(&"stop".to_string()));

        let patrol = spec.state(&StatePath::from_dotted("PATROL")).unwrap();
        assert!(patrol.is_alias());
        assert!(patrol.has_enter());
    }

    #[test]
    fn grammar_key_selects_grammar() {
        let doc = yaml("grammar: upper-snake\nCOMBAT_2: {}\n");
        assert_eq!(doc.grammar(), Some(IdentifierGrammar::UpperSnake));
        assert_eq!(doc.options(None).grammar, IdentifierGrammar::UpperSnake);
        assert_eq!(
            doc.options(Some(IdentifierGrammar::Alphanumeric)).grammar,
            IdentifierGrammar::Alphanumeric
        );

        let spec = compile_with(&doc.build(IdentifierGrammar::UpperSnake).unwrap(), &doc.options(None))
            .unwrap();
        assert!(spec.contains(&StatePath::from_dotted("COMBAT_2")));
    }

    #[test]
    fn unknown_grammar_rejected() {
        let err = BehaviorDocument::parse("grammar: lowercase\n", SourceFormat::Yaml).unwrap_err();
        assert!(format!("{err:#}").contains("grammar"));
    }

    #[test]
    fn empty_child_is_empty_state() {
        let doc = yaml("IDLE:\n");
        let node = doc.build(IdentifierGrammar::Uppercase).unwrap();
        let spec = compile_with(&node, &doc.options(None)).unwrap();
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn scalar_child_rejected() {
        let doc = yaml("IDLE: 3\n");
        let err = doc.build(IdentifierGrammar::Uppercase).unwrap_err();
        assert!(err.to_string().contains("'IDLE'"), "{err}");
    }

    #[test]
    fn hook_cannot_reply() {
        let doc = yaml("IDLE:\n  enter: hello\n");
        let err = doc.build(IdentifierGrammar::Uppercase).unwrap_err();
        assert!(format!("{err:#}").contains("hooks cannot reply"), "{err:#}");
    }

    #[test]
    fn handler_cannot_abort() {
        let doc = yaml("tick: { abort: true }\n");
        let err = doc.build(IdentifierGrammar::Uppercase).unwrap_err();
        assert!(format!("{err:#}").contains("only hooks can abort"), "{err:#}");
    }

    #[test]
    fn top_level_must_be_mapping() {
        assert!(BehaviorDocument::parse("- IDLE\n", SourceFormat::Yaml).is_err());
        assert!(BehaviorDocument::parse("[]", SourceFormat::Json).is_err());
    }

    #[test]
    fn json_documents_parse() {
        let doc = BehaviorDocument::parse(
            r#"{ "ping": "pong", "IDLE": { "walk": { "next": "IDLE" } } }"#,
            SourceFormat::Json,
        )
        .unwrap();
        let options = doc.options(None);
        let spec = compile_with(&doc.build(options.grammar).unwrap(), &options).unwrap();
        assert!(spec.contains(&StatePath::from_dotted("IDLE")));
        assert!(spec.state(&StatePath::root()).unwrap().handles(&"ping".to_string()));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("unit.json");
        std::fs::write(&file, r#"{ "IDLE": {} }"#).unwrap();
        let doc = BehaviorDocument::load(&file).unwrap();
        assert_eq!(doc.grammar(), None);

        let missing = BehaviorDocument::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(missing.to_string().contains("failed to read"));
    }
}
