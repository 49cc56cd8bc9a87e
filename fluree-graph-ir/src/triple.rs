//! RDF triple

use crate::Term;
use serde::{Deserialize, Serialize};

/// A single (subject, predicate, object) statement
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject (IRI or blank node)
    pub s: Term,
    /// Predicate (always an IRI)
    pub p: Term,
    /// Object (any term)
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }

    /// Check whether this triple matches a pattern (`None` is a wildcard)
    pub fn matches(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> bool {
        s.is_none_or(|s| *s == self.s)
            && p.is_none_or(|p| *p == self.p)
            && o.is_none_or(|o| *o == self.o)
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}
