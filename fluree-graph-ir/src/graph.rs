//! RDF graph - a collection of triples
//!
//! The `Graph` type uses `Vec<Triple>` to preserve insertion order, which
//! keeps pattern lookups deterministic. Call `dedupe()` explicitly if you
//! want set semantics.

use crate::{Term, Triple, TripleSource};

/// A collection of RDF triples
///
/// # Example
///
/// ```
/// use fluree_graph_ir::{Graph, Term, TripleSource};
///
/// let mut graph = Graph::new();
/// let alice = Term::iri("http://example.org/alice");
/// let knows = Term::iri("http://xmlns.com/foaf/0.1/knows");
///
/// graph.add_triple(alice.clone(), knows.clone(), Term::iri("http://example.org/bob"));
/// graph.add_triple(alice.clone(), knows.clone(), Term::iri("http://example.org/carol"));
///
/// assert_eq!(graph.objects(&alice, &knows).len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The triples in this graph
    triples: Vec<Triple>,
    /// Base IRI from parsing
    pub base: Option<String>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with a base IRI
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            ..Default::default()
        }
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Remove duplicate triples, keeping the first occurrence of each
    pub fn dedupe(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.triples.retain(|t| seen.insert(t.clone()));
    }
}

impl TripleSource for Graph {
    fn find(&self, s: Option<&Term>, p: Option<&Term>, o: Option<&Term>) -> Vec<&Triple> {
        self.triples.iter().filter(|t| t.matches(s, p, o)).collect()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
            base: None,
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::iri("http://ex/a"),
            Term::iri("http://ex/p"),
            Term::string("one"),
        );
        graph.add_triple(
            Term::iri("http://ex/a"),
            Term::iri("http://ex/q"),
            Term::iri("http://ex/b"),
        );
        graph.add_triple(
            Term::blank("b0"),
            Term::iri("http://ex/p"),
            Term::string("two"),
        );
        graph
    }

    #[test]
    fn test_find_wildcards() {
        let graph = sample();
        assert_eq!(graph.find(None, None, None).len(), 3);

        let p = Term::iri("http://ex/p");
        let found = graph.find(None, Some(&p), None);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].o, Term::string("one"));
        assert_eq!(found[1].o, Term::string("two"));
    }

    #[test]
    fn test_find_fully_bound() {
        let graph = sample();
        let a = Term::iri("http://ex/a");
        let q = Term::iri("http://ex/q");
        let b = Term::iri("http://ex/b");
        assert!(graph.contains(Some(&a), Some(&q), Some(&b)));
        assert!(!graph.contains(Some(&b), Some(&q), Some(&a)));
    }

    #[test]
    fn test_subjects_and_objects() {
        let graph = sample();
        let p = Term::iri("http://ex/p");
        let subjects = graph.subjects(&p, &Term::string("two"));
        assert_eq!(subjects, vec![&Term::blank("b0")]);

        let a = Term::iri("http://ex/a");
        assert_eq!(graph.objects(&a, &p), vec![&Term::string("one")]);
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let mut graph = sample();
        let first = graph.triples()[0].clone();
        graph.add(first.clone());
        assert_eq!(graph.len(), 4);
        graph.dedupe();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.triples()[0], first);
    }
}
