//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types used to hand an already-parsed
//! mapping document to the virtual graph compiler, regardless of the syntax
//! it was written in.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!
//! 2. **Narrow lookup surface** - Consumers query a graph only through
//!    [`TripleSource::find`], a `(subject?, predicate?, object?)` pattern
//!    lookup, so they never depend on a particular storage representation.
//!
//! 3. **Insertion order** - [`Graph`] keeps triples in insertion order, so
//!    pattern lookups return matches deterministically.
//!
//! # Example
//!
//! ```
//! use fluree_graph_ir::{Graph, Term, TripleSource};
//!
//! let mut graph = Graph::new();
//! graph.add_triple(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//!
//! let alice = Term::iri("http://example.org/alice");
//! assert_eq!(graph.find(Some(&alice), None, None).len(), 1);
//! ```

mod graph;
mod source;
mod term;
mod triple;

pub use graph::Graph;
pub use source::TripleSource;
pub use term::{BlankId, Term};
pub use triple::Triple;
