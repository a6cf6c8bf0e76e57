//! # State Paths
//!
//! A `StatePath` is the fully-qualified, dot-separated name of a state, e.g.
//! `"INDIVIDUAL.COMBAT.ATTACKING"`. The root of every spec is the empty path.
//!
//! ## Persistence
//!
//! A path serializes as its dotted string and nothing else. Saving an
//! instance of an arbitrarily deep behavior tree therefore means saving one
//! string. Deserialization does not consult a grammar; whether the restored
//! path names a real state is a question for the compiled spec it is bound
//! to.

use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::grammar::IdentifierGrammar;

const SEPARATOR: char = '.';

/// Fully-qualified dotted identifier of a state. The root is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatePath(String);

impl StatePath {
    /// The root path.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a dotted path, validating every segment against `grammar`.
    ///
    /// The empty string parses to the root.
    pub fn parse(path: &str, grammar: IdentifierGrammar) -> Result<Self, PathError> {
        if path.is_empty() {
            return Ok(Self::root());
        }
        for segment in path.split(SEPARATOR) {
            if !grammar.accepts(segment) {
                return Err(PathError::InvalidSegment {
                    path: path.to_string(),
                    segment: segment.to_string(),
                    grammar,
                });
            }
        }
        Ok(Self(path.to_string()))
    }

    /// Wrap a dotted string without validating it.
    ///
    /// Used for names that are resolved against a compiled spec, where an
    /// unknown path is reported by the lookup rather than here.
    pub fn from_dotted(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Append a single segment, validating it against `grammar`.
    pub fn join(&self, segment: &str, grammar: IdentifierGrammar) -> Result<Self, PathError> {
        if !grammar.accepts(segment) {
            return Err(PathError::InvalidSegment {
                path: self.0.clone(),
                segment: segment.to_string(),
                grammar,
            });
        }
        Ok(self.child_unchecked(segment))
    }

    pub(crate) fn child_unchecked(&self, segment: &str) -> Self {
        if self.is_root() {
            Self(segment.to_string())
        } else {
            Self(format!("{}{SEPARATOR}{segment}", self.0))
        }
    }

    /// The path with its last segment removed. `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => Some(Self::root()),
        }
    }

    /// Iterate over the segments, outermost first. Empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|s| !s.is_empty())
    }

    /// The innermost segment. `None` for the root.
    pub fn last_segment(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit(SEPARATOR).next()
    }

    /// Number of segments. The root has depth 0.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `self` equals `other` or is one of its ancestors.
    pub fn is_ancestor_of(&self, other: &StatePath) -> bool {
        if self.is_root() || self == other {
            return true;
        }
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(SEPARATOR)
    }

    /// The root-first chain of non-root ancestors, ending in `self`.
    ///
    /// `"A.B.C"` yields `["A", "A.B", "A.B.C"]`; the root yields `[]`.
    pub fn ancestry(&self) -> Vec<StatePath> {
        let mut chain = Vec::with_capacity(self.depth());
        let mut current = Self::root();
        for segment in self.segments() {
            current = current.child_unchecked(segment);
            chain.push(current.clone());
        }
        chain
    }

    /// The dotted string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StatePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StatePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn segment() -> impl Strategy<Value = String> {
        "[A-Z]{1,6}"
    }

    fn path() -> impl Strategy<Value = StatePath> {
        prop::collection::vec(segment(), 0..6).prop_map(|segs| {
            StatePath::parse(&segs.join("."), IdentifierGrammar::Uppercase).unwrap()
        })
    }

    proptest! {
        /// Joining a segment and taking the parent returns the original path.
        #[test]
        fn join_then_parent_is_identity(base in path(), seg in segment()) {
            let child = base.join(&seg, IdentifierGrammar::Uppercase).unwrap();
            prop_assert_eq!(child.parent(), Some(base));
            prop_assert_eq!(child.last_segment(), Some(seg.as_str()));
        }

        /// Ancestry has one entry per segment and ends in the path itself.
        #[test]
        fn ancestry_length_matches_depth(p in path()) {
            let chain = p.ancestry();
            prop_assert_eq!(chain.len(), p.depth());
            if !p.is_root() {
                prop_assert_eq!(chain.last(), Some(&p));
            }
            for window in chain.windows(2) {
                let parent = window[1].parent();
                prop_assert_eq!(parent.as_ref(), Some(&window[0]));
            }
        }

        /// Every ancestry entry is an ancestor of the path.
        #[test]
        fn ancestry_entries_are_ancestors(p in path()) {
            for a in p.ancestry() {
                prop_assert!(a.is_ancestor_of(&p));
            }
        }
    }
}
