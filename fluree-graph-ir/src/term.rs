//! RDF term types: IRI, blank node, and literal
//!
//! Terms are the building blocks of triples. A term can be:
//! - An IRI (always expanded, never prefixed)
//! - A blank node (with stable identifier)
//! - A literal (lexical form + optional datatype + optional language tag)

use fluree_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Blank node identifier
///
/// Blank node IDs are stable within a graph but have no global meaning.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlankId(Arc<str>);

impl BlankId {
    /// Create a blank node ID from a label
    ///
    /// The label should NOT include the `_:` prefix.
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    /// Get the label (without `_:` prefix)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:{}", self.0)
    }
}

/// An RDF term (subject, predicate, or object position)
///
/// # Invariants
///
/// - `Term::Iri` always contains an **expanded** IRI, never a prefixed form.
/// - A literal carries either a language tag or a datatype, never both.
///   Plain literals carry neither.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    /// Full expanded IRI (e.g., "http://schema.org/Person")
    Iri(Arc<str>),

    /// Blank node with stable identifier
    BlankNode(BlankId),

    /// Literal value
    Literal {
        /// Lexical form
        lexical: Arc<str>,
        /// Datatype IRI, `None` for plain and language-tagged literals
        datatype: Option<Arc<str>>,
        /// Language tag
        language: Option<Arc<str>>,
    },
}

impl Term {
    /// Create an IRI term from an expanded IRI string
    pub fn iri(iri: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(iri.as_ref()))
    }

    /// Create a blank node term
    pub fn blank(label: impl AsRef<str>) -> Self {
        Term::BlankNode(BlankId::new(label))
    }

    /// Create a plain literal
    pub fn string(value: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: None,
            language: None,
        }
    }

    /// Create a language-tagged literal
    pub fn lang_string(value: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: None,
            language: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Create a typed literal
    ///
    /// `xsd:string` is normalized to a plain literal.
    pub fn typed(value: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        let datatype = datatype.as_ref();
        Term::Literal {
            lexical: Arc::from(value.as_ref()),
            datatype: (datatype != xsd::STRING).then(|| Arc::from(datatype)),
            language: None,
        }
    }

    /// Check if this is an IRI term
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this is a blank node
    pub fn is_blank(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }

    /// Try to get as IRI string
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Try to get as blank node ID
    pub fn as_blank(&self) -> Option<&BlankId> {
        match self {
            Term::BlankNode(id) => Some(id),
            _ => None,
        }
    }

    /// Try to get the lexical form of a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal { lexical, .. } => Some(lexical),
            _ => None,
        }
    }

    /// Datatype IRI of a literal, if any
    pub fn datatype(&self) -> Option<&str> {
        match self {
            Term::Literal { datatype, .. } => datatype.as_deref(),
            _ => None,
        }
    }

    /// Language tag of a literal, if any
    pub fn language(&self) -> Option<&str> {
        match self {
            Term::Literal { language, .. } => language.as_deref(),
            _ => None,
        }
    }

    /// The string a value source encodes for this term
    ///
    /// IRI text for IRIs, the label for blank nodes, the lexical form for literals.
    pub fn lexical(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::BlankNode(id) => id.as_str(),
            Term::Literal { lexical, .. } => lexical,
        }
    }

    /// Check whether this term is the `rdf:type` predicate
    pub fn is_rdf_type(&self) -> bool {
        self.as_iri() == Some(rdf::TYPE)
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::BlankNode(id) => write!(f, "{}", id),
            Term::Literal {
                lexical,
                datatype,
                language,
            } => {
                write!(f, "\"{}\"", lexical)?;
                if let Some(lang) = language {
                    write!(f, "@{}", lang)
                } else if let Some(dt) = datatype {
                    write!(f, "^^<{}>", dt)
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_id() {
        let id = BlankId::new("b0");
        assert_eq!(id.as_str(), "b0");
        assert_eq!(format!("{}", id), "_:b0");
    }

    #[test]
    fn test_term_constructors() {
        let iri = Term::iri("http://example.org/foo");
        assert!(iri.is_iri());
        assert_eq!(iri.as_iri(), Some("http://example.org/foo"));
        assert_eq!(iri.lexical(), "http://example.org/foo");

        let blank = Term::blank("b0");
        assert!(blank.is_blank());
        assert_eq!(blank.lexical(), "b0");

        let lang = Term::lang_string("bonjour", "fr");
        assert!(lang.is_literal());
        assert_eq!(lang.language(), Some("fr"));
        assert_eq!(lang.datatype(), None);
    }

    #[test]
    fn test_typed_string_is_plain() {
        assert_eq!(Term::typed("x", xsd::STRING), Term::string("x"));
        assert_eq!(Term::typed("4", xsd::INTEGER).datatype(), Some(xsd::INTEGER));
    }

    #[test]
    fn test_term_display() {
        assert_eq!(
            format!("{}", Term::iri("http://example.org")),
            "<http://example.org>"
        );
        assert_eq!(format!("{}", Term::blank("b0")), "_:b0");
        assert_eq!(format!("{}", Term::string("hello")), "\"hello\"");
        assert_eq!(
            format!("{}", Term::lang_string("bonjour", "fr")),
            "\"bonjour\"@fr"
        );
        assert_eq!(
            format!("{}", Term::typed("42", xsd::INTEGER)),
            "\"42\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let terms = vec![
            Term::iri("http://example.org/a"),
            Term::blank("b0"),
            Term::lang_string("bonjour", "fr"),
            Term::typed("42", xsd::INTEGER),
        ];
        let json = serde_json::to_string(&terms).unwrap();
        let back: Vec<Term> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, terms);
    }

    #[test]
    fn test_rdf_type() {
        assert!(Term::iri(rdf::TYPE).is_rdf_type());
        assert!(!Term::string(rdf::TYPE).is_rdf_type());
    }
}
