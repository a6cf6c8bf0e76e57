//! # Identifier Grammar
//!
//! Child states and message handlers live side by side in a state
//! declaration. The identifier grammar is what tells them apart: a key that
//! matches the grammar names a child state, anything else is data.
//!
//! A segment never contains `.`, which is reserved as the path separator, and
//! is never empty.

use serde::{Deserialize, Serialize};

/// The accepted shape of a single state-path segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierGrammar {
    /// `[A-Z]+`, e.g. `WALKING`.
    #[default]
    Uppercase,
    /// `[A-Z][A-Z0-9_]*`, e.g. `COMBAT_2`.
    UpperSnake,
    /// `[A-Za-z][A-Za-z0-9_]*`, e.g. `Walking`.
    Alphanumeric,
}

impl IdentifierGrammar {
    /// Whether `segment` is a valid identifier under this grammar.
    pub fn accepts(&self, segment: &str) -> bool {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        match self {
            Self::Uppercase => segment.chars().all(|c| c.is_ascii_uppercase()),
            Self::UpperSnake => {
                first.is_ascii_uppercase()
                    && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            }
            Self::Alphanumeric => {
                first.is_ascii_alphabetic()
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
        }
    }

    /// The configuration name of this grammar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::UpperSnake => "upper-snake",
            Self::Alphanumeric => "alphanumeric",
        }
    }
}

impl std::fmt::Display for IdentifierGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pattern = match self {
            Self::Uppercase => "[A-Z]+",
            Self::UpperSnake => "[A-Z][A-Z0-9_]*",
            Self::Alphanumeric => "[A-Za-z][A-Za-z0-9_]*",
        };
        f.write_str(pattern)
    }
}

impl std::str::FromStr for IdentifierGrammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uppercase" => Ok(Self::Uppercase),
            "upper-snake" => Ok(Self::UpperSnake),
            "alphanumeric" => Ok(Self::Alphanumeric),
            other => Err(format!(
                "unknown identifier grammar '{other}' (expected uppercase, upper-snake or alphanumeric)"
            )),
        }
    }
}
