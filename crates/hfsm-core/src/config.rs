//! # Compile Options
//!
//! Settings that shape how a state spec is compiled. Deserializable so that
//! declarative behavior documents can carry them alongside the states.

use serde::{Deserialize, Serialize};

use crate::grammar::IdentifierGrammar;

/// Options for the spec compiler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileOptions {
    /// Grammar that child-state identifiers must match.
    pub grammar: IdentifierGrammar,
}

impl CompileOptions {
    /// Options using the given identifier grammar.
    pub fn with_grammar(grammar: IdentifierGrammar) -> Self {
        Self { grammar }
    }
}
