//! Pattern lookup over a triple collection

use crate::{Term, Triple};

/// Read-only pattern lookup over a set of triples
///
/// `None` in any position is a wildcard. Implementations must return matches
/// in a stable order so that repeated lookups over the same data agree.
pub trait TripleSource {
    /// Find all triples matching the given (subject, predicate, object) pattern
    fn find(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> Vec<&Triple>;

    /// Check whether at least one triple matches the pattern
    fn contains(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> bool {
        !self.find(s, p, o).is_empty()
    }

    /// Objects of all triples with the given subject and predicate
    fn objects(&self, s: &Term, p: &Term) -> Vec<&Term> {
        self.find(Some(s), Some(p), None)
            .into_iter()
            .map(|t| &t.o)
            .collect()
    }

    /// Subjects of all triples with the given predicate and object
    fn subjects(&self, p: &Term, o: &Term) -> Vec<&Term> {
        self.find(None, Some(p), Some(o))
            .into_iter()
            .map(|t| &t.s)
            .collect()
    }
}
