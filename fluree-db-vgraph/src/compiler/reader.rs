//! Statement lookups with diagnostics
//!
//! Helpers over the mapping graph for single- and multi-valued properties.
//! Every shape violation is reported to the sink; callers only see the
//! values that survived.

use std::collections::BTreeMap;

use fluree_graph_ir::Term;

use super::{node_id, CompileRun};
use crate::diagnostics::Diagnostic;
use crate::vocab::D2RQ;

/// Short display form for a vocabulary IRI
pub(crate) fn qname(iri: &str) -> String {
    if let Some(local) = iri.strip_prefix(D2RQ::NS) {
        format!("d2rq:{}", local)
    } else if let Some(local) = iri.strip_prefix(fluree_vocab::rdf::NS) {
        format!("rdf:{}", local)
    } else {
        format!("<{}>", iri)
    }
}

impl CompileRun<'_> {
    pub(super) fn warn(&mut self, message: impl Into<String>, context: &Term) {
        self.report(Diagnostic::warning(message, node_id(context)));
    }

    pub(super) fn error(&mut self, message: impl Into<String>, context: &Term) {
        self.report(Diagnostic::error(message, node_id(context)));
    }

    pub(super) fn fatal(&mut self, message: impl Into<String>, context: &Term) {
        self.report(Diagnostic::fatal(message, node_id(context)));
    }

    pub(super) fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.trace();
        self.reported += 1;
        self.sink.report(diagnostic);
    }

    /// All objects of `(subject, predicate, ?)`, in graph order
    pub(super) fn objects(&self, subject: &Term, predicate: &str) -> Vec<Term> {
        self.graph
            .objects(subject, &Term::iri(predicate))
            .into_iter()
            .cloned()
            .collect()
    }

    /// All `(subject, object)` pairs of `(?, predicate, ?)`, in graph order
    pub(super) fn pairs(&self, predicate: &str) -> Vec<(Term, Term)> {
        self.graph
            .find(None, Some(&Term::iri(predicate)), None)
            .into_iter()
            .map(|t| (t.s.clone(), t.o.clone()))
            .collect()
    }

    /// Subjects typed with `class`, in graph order
    pub(super) fn instances_of(&self, class: &str) -> Vec<Term> {
        let mut seen = Vec::new();
        for subject in self
            .graph
            .subjects(&Term::iri(D2RQ::RDF_TYPE), &Term::iri(class))
        {
            if !seen.contains(subject) {
                seen.push(subject.clone());
            }
        }
        seen
    }

    pub(super) fn has_type(&self, node: &Term, class: &str) -> bool {
        self.graph.contains(
            Some(node),
            Some(&Term::iri(D2RQ::RDF_TYPE)),
            Some(&Term::iri(class)),
        )
    }

    /// At most one value; extra values are ignored with a warning
    pub(super) fn zero_or_one_node(&mut self, subject: &Term, predicate: &str) -> Option<Term> {
        let mut values = self.objects(subject, predicate).into_iter();
        let first = values.next()?;
        if values.next().is_some() {
            self.warn(
                format!("Ignoring multiple {} on {}", qname(predicate), subject),
                subject,
            );
        }
        Some(first)
    }

    /// Exactly one value; a missing value is an error
    pub(super) fn one_node(&mut self, subject: &Term, predicate: &str) -> Option<Term> {
        let value = self.zero_or_one_node(subject, predicate);
        if value.is_none() {
            self.error(format!("Missing {} in {}", qname(predicate), subject), subject);
        }
        value
    }

    fn literal_of(&mut self, subject: &Term, predicate: &str, node: Term) -> Option<String> {
        match node.as_literal() {
            Some(lexical) => Some(lexical.to_string()),
            None => {
                self.error(
                    format!("{} for {} must be literal", qname(predicate), subject),
                    subject,
                );
                None
            }
        }
    }

    fn literal_or_uri_of(&mut self, subject: &Term, predicate: &str, node: Term) -> Option<String> {
        match &node {
            Term::Literal { lexical, .. } => Some(lexical.to_string()),
            Term::Iri(iri) => Some(iri.to_string()),
            Term::BlankNode(_) => {
                self.error(
                    format!("{} for {} must be literal or URI", qname(predicate), subject),
                    subject,
                );
                None
            }
        }
    }

    pub(super) fn zero_or_one_literal(&mut self, subject: &Term, predicate: &str) -> Option<String> {
        let node = self.zero_or_one_node(subject, predicate)?;
        self.literal_of(subject, predicate, node)
    }

    pub(super) fn zero_or_one_literal_or_uri(
        &mut self,
        subject: &Term,
        predicate: &str,
    ) -> Option<String> {
        let node = self.zero_or_one_node(subject, predicate)?;
        self.literal_or_uri_of(subject, predicate, node)
    }

    pub(super) fn one_literal(&mut self, subject: &Term, predicate: &str) -> Option<String> {
        let node = self.one_node(subject, predicate)?;
        self.literal_of(subject, predicate, node)
    }

    pub(super) fn one_literal_or_uri(&mut self, subject: &Term, predicate: &str) -> Option<String> {
        let node = self.one_node(subject, predicate)?;
        self.literal_or_uri_of(subject, predicate, node)
    }

    /// Every literal value; non-literals are reported and skipped
    pub(super) fn literals(&mut self, subject: &Term, predicate: &str) -> Vec<String> {
        let mut literals = Vec::new();
        for node in self.objects(subject, predicate) {
            if let Some(lexical) = self.literal_of(subject, predicate, node) {
                literals.push(lexical);
            }
        }
        literals
    }

    /// Literal-valued properties of `subject`, keyed by predicate IRI
    pub(super) fn literal_properties(&self, subject: &Term) -> BTreeMap<String, String> {
        self.graph
            .find(Some(subject), None, None)
            .into_iter()
            .filter_map(|t| Some((t.p.as_iri()?.to_string(), t.o.as_literal()?.to_string())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qname() {
        assert_eq!(qname(D2RQ::URI_PATTERN), "d2rq:uriPattern");
        assert_eq!(qname(D2RQ::RDF_TYPE), "rdf:type");
        assert_eq!(qname("http://ex/p"), "<http://ex/p>");
    }
}
