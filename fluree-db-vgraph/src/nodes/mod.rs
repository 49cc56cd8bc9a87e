//! Node makers
//!
//! A [`NodeMaker`] turns a value source into RDF terms of one kind, or stands
//! for a single fixed term (predicates, `rdf:type` objects, additional
//! property values).

mod kind;

pub use kind::NodeKind;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fluree_graph_ir::Term;

use crate::algebra::Attribute;
use crate::values::{ColumnIndexer, ColumnValues, Pattern, Row, ValueSource};

/// How a node maker derives its values, as seen by bridge ordering
///
/// `Pattern` and `Column` are only reported for URI makers; restriction
/// decorators are looked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Pattern,
    Fixed,
    Column,
    Other,
}

#[derive(Debug, Clone)]
pub enum NodeMaker {
    Fixed(Term),
    Typed {
        kind: NodeKind,
        source: ValueSource,
        /// Whether each row yields a distinct node
        unique: bool,
    },
}

impl NodeMaker {
    pub fn fixed(term: Term) -> Self {
        NodeMaker::Fixed(term)
    }

    pub fn typed(kind: NodeKind, source: ValueSource, unique: bool) -> Self {
        NodeMaker::Typed {
            kind,
            source,
            unique,
        }
    }

    pub fn uri_pattern(pattern: Pattern, unique: bool) -> Self {
        Self::typed(NodeKind::Uri, ValueSource::Pattern(pattern), unique)
    }

    pub fn uri_column(column: Attribute, unique: bool) -> Self {
        Self::typed(NodeKind::Uri, ValueSource::Column(column), unique)
    }

    pub fn kind(&self) -> Option<&NodeKind> {
        match self {
            NodeMaker::Fixed(_) => None,
            NodeMaker::Typed { kind, .. } => Some(kind),
        }
    }

    pub fn source(&self) -> Option<&ValueSource> {
        match self {
            NodeMaker::Fixed(_) => None,
            NodeMaker::Typed { source, .. } => Some(source),
        }
    }

    pub fn fixed_term(&self) -> Option<&Term> {
        match self {
            NodeMaker::Fixed(term) => Some(term),
            NodeMaker::Typed { .. } => None,
        }
    }

    pub fn is_unique(&self) -> bool {
        match self {
            NodeMaker::Fixed(_) => true,
            NodeMaker::Typed { unique, .. } => *unique,
        }
    }

    /// Conservative test whether this maker could ever produce `term`
    pub fn could_fit(&self, term: &Term) -> bool {
        match self {
            NodeMaker::Fixed(fixed) => fixed == term,
            NodeMaker::Typed { kind, source, .. } => {
                kind.matches(term) && source.could_fit(Some(term.lexical()))
            }
        }
    }

    pub fn columns(&self) -> BTreeSet<Attribute> {
        match self {
            NodeMaker::Fixed(_) => BTreeSet::new(),
            NodeMaker::Typed { source, .. } => source.columns(),
        }
    }

    /// Build the term for one row; `None` when a contributing cell is NULL
    pub fn make_node(&self, row: &Row, indexer: &dyn ColumnIndexer) -> Option<Term> {
        match self {
            NodeMaker::Fixed(term) => Some(term.clone()),
            NodeMaker::Typed { kind, source, .. } => {
                source.value(row, indexer).map(|v| kind.make_term(&v))
            }
        }
    }

    /// Column equalities that select exactly the rows producing `term`
    ///
    /// Empty for a matching fixed term; `None` if `term` cannot be produced.
    pub fn column_values(&self, term: &Term) -> Option<ColumnValues> {
        match self {
            NodeMaker::Fixed(fixed) => (fixed == term).then(BTreeMap::new),
            NodeMaker::Typed { kind, source, .. } => {
                if !kind.matches(term) {
                    return None;
                }
                source.column_values(term.lexical())
            }
        }
    }

    pub fn slot_kind(&self) -> SlotKind {
        match self {
            NodeMaker::Fixed(_) => SlotKind::Fixed,
            NodeMaker::Typed {
                kind: NodeKind::Uri,
                source,
                ..
            } => match source.base() {
                ValueSource::Pattern(_) => SlotKind::Pattern,
                ValueSource::Column(_) => SlotKind::Column,
                _ => SlotKind::Other,
            },
            NodeMaker::Typed { .. } => SlotKind::Other,
        }
    }

    pub fn is_uri_pattern(&self) -> bool {
        self.slot_kind() == SlotKind::Pattern
    }

    pub fn is_uri_column(&self) -> bool {
        self.slot_kind() == SlotKind::Column
    }
}

impl fmt::Display for NodeMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeMaker::Fixed(term) => write!(f, "Fixed({})", term),
            NodeMaker::Typed { kind, source, .. } => match source.base() {
                ValueSource::Column(attr) => write!(f, "{}(column {})", kind, attr),
                ValueSource::Pattern(pattern) => write!(f, "{}(pattern {})", kind, pattern),
                ValueSource::BlankNodeId(id) => {
                    write!(f, "{}(bNode {})", kind, id.class_map_id())
                }
                _ => write!(f, "{}(translated)", kind),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{BlankNodeId, ValueConstraint};
    use fluree_vocab::xsd;
    use std::collections::HashMap;

    fn attr(s: &str) -> Attribute {
        Attribute::parse(s).unwrap()
    }

    fn person_maker() -> NodeMaker {
        NodeMaker::uri_pattern(Pattern::parse("http://ex/person@@t.id@@").unwrap(), true)
    }

    #[test]
    fn test_uri_pattern_maker() {
        let maker = person_maker();
        let term = Term::iri("http://ex/person7");

        assert!(maker.could_fit(&term));
        assert!(!maker.could_fit(&Term::iri("http://ex/doc7")));
        assert!(!maker.could_fit(&Term::string("http://ex/person7")));
        assert_eq!(
            maker.column_values(&term),
            Some(BTreeMap::from([(attr("t.id"), "7".to_string())]))
        );
        assert_eq!(maker.slot_kind(), SlotKind::Pattern);
        assert_eq!(maker.columns(), BTreeSet::from([attr("t.id")]));
    }

    #[test]
    fn test_make_node_from_row() {
        let idx: HashMap<Attribute, usize> =
            [(attr("t.id"), 0), (attr("t.age"), 1)].into_iter().collect();
        let row = vec![Some("3".to_string()), None];

        assert_eq!(
            person_maker().make_node(&row, &idx),
            Some(Term::iri("http://ex/person3"))
        );
        let age = NodeMaker::typed(
            NodeKind::typed_literal(xsd::INTEGER),
            ValueSource::column(attr("t.age")),
            false,
        );
        assert_eq!(age.make_node(&row, &idx), None);
    }

    #[test]
    fn test_fixed_maker() {
        let maker = NodeMaker::fixed(Term::iri("http://ex/knows"));
        assert!(maker.could_fit(&Term::iri("http://ex/knows")));
        assert!(!maker.could_fit(&Term::iri("http://ex/likes")));
        assert_eq!(
            maker.column_values(&Term::iri("http://ex/knows")),
            Some(BTreeMap::new())
        );
        assert!(maker.columns().is_empty());
        assert_eq!(maker.slot_kind(), SlotKind::Fixed);
        assert!(maker.is_unique());
    }

    #[test]
    fn test_slot_kind_looks_through_restrictions() {
        let restricted = ValueSource::column(attr("t.homepage"))
            .propagate_constraint(&ValueConstraint::new().with_max_length(40));
        let maker = NodeMaker::typed(NodeKind::Uri, restricted, false);
        assert_eq!(maker.slot_kind(), SlotKind::Column);

        let literal = NodeMaker::typed(NodeKind::plain_literal(), ValueSource::column(attr("t.name")), false);
        assert_eq!(literal.slot_kind(), SlotKind::Other);

        let blank = NodeMaker::typed(
            NodeKind::Blank,
            ValueSource::BlankNodeId(BlankNodeId::new("cm", vec![attr("t.a")])),
            true,
        );
        assert_eq!(blank.slot_kind(), SlotKind::Other);
        assert!(blank.could_fit(&Term::blank("cm@@x")));
        assert!(!blank.could_fit(&Term::blank("other@@x")));
    }
}
