//! Term kinds produced by node makers

use std::fmt;

use fluree_graph_ir::Term;
use fluree_vocab::xsd;

/// What kind of RDF term a node maker builds from its lexical value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Uri,
    Blank,
    PlainLiteral { language: Option<String> },
    TypedLiteral { datatype: String },
}

impl NodeKind {
    pub fn plain_literal() -> Self {
        NodeKind::PlainLiteral { language: None }
    }

    pub fn lang_literal(language: impl Into<String>) -> Self {
        NodeKind::PlainLiteral {
            language: Some(language.into()),
        }
    }

    /// Typed literal kind; `xsd:string` collapses to a plain literal
    pub fn typed_literal(datatype: impl Into<String>) -> Self {
        let datatype = datatype.into();
        if datatype == xsd::STRING {
            NodeKind::plain_literal()
        } else {
            NodeKind::TypedLiteral { datatype }
        }
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, NodeKind::Uri)
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::PlainLiteral { .. } | NodeKind::TypedLiteral { .. }
        )
    }

    /// Whether `term` has this kind, ignoring its lexical value
    pub fn matches(&self, term: &Term) -> bool {
        match self {
            NodeKind::Uri => term.is_iri(),
            NodeKind::Blank => term.is_blank(),
            NodeKind::PlainLiteral { language } => {
                term.is_literal()
                    && term.datatype().is_none()
                    && term.language() == language.as_deref()
            }
            NodeKind::TypedLiteral { datatype } => term.datatype() == Some(datatype.as_str()),
        }
    }

    pub fn make_term(&self, lexical: &str) -> Term {
        match self {
            NodeKind::Uri => Term::iri(lexical),
            NodeKind::Blank => Term::blank(lexical),
            NodeKind::PlainLiteral { language: None } => Term::string(lexical),
            NodeKind::PlainLiteral {
                language: Some(lang),
            } => Term::lang_string(lexical, lang),
            NodeKind::TypedLiteral { datatype } => Term::typed(lexical, datatype),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Uri => f.write_str("URI"),
            NodeKind::Blank => f.write_str("Blank"),
            NodeKind::PlainLiteral { language: None } => f.write_str("Literal"),
            NodeKind::PlainLiteral {
                language: Some(lang),
            } => write!(f, "Literal@{}", lang),
            NodeKind::TypedLiteral { datatype } => write!(f, "Literal^^{}", datatype),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_by_kind() {
        let iri = Term::iri("http://ex/a");
        let plain = Term::string("a");
        let en = Term::lang_string("a", "en");
        let int = Term::typed("1", xsd::INTEGER);

        assert!(NodeKind::Uri.matches(&iri));
        assert!(!NodeKind::Uri.matches(&plain));
        assert!(NodeKind::plain_literal().matches(&plain));
        assert!(!NodeKind::plain_literal().matches(&en));
        assert!(NodeKind::lang_literal("en").matches(&en));
        assert!(NodeKind::typed_literal(xsd::INTEGER).matches(&int));
        assert!(!NodeKind::typed_literal(xsd::INTEGER).matches(&plain));
        assert!(NodeKind::Blank.matches(&Term::blank("b0")));
    }

    #[test]
    fn test_xsd_string_is_plain() {
        let kind = NodeKind::typed_literal(xsd::STRING);
        assert_eq!(kind, NodeKind::plain_literal());
        assert!(kind.matches(&Term::typed("x", xsd::STRING)));
    }

    #[test]
    fn test_make_term_round_trips_kind() {
        for kind in [
            NodeKind::Uri,
            NodeKind::Blank,
            NodeKind::plain_literal(),
            NodeKind::lang_literal("de"),
            NodeKind::typed_literal(xsd::DATE),
        ] {
            let term = kind.make_term("2006-01-01");
            assert!(kind.matches(&term), "{}", kind);
            assert_eq!(term.lexical(), "2006-01-01");
        }
    }
}
