//! Compiled property bridges

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use fluree_graph_ir::Term;
use serde::{Deserialize, Serialize};

use crate::algebra::{Attribute, Relation};
use crate::database::Database;
use crate::nodes::NodeMaker;

/// Triple position of a node maker within a bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Subject,
    Predicate,
    Object,
}

/// How the subject and object URIs of a bridge are derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UriMatchPolicy {
    pub subject_based_on_uri_column: bool,
    pub subject_based_on_uri_pattern: bool,
    pub object_based_on_uri_column: bool,
    pub object_based_on_uri_pattern: bool,
}

impl UriMatchPolicy {
    /// Policy flags read off the subject and object makers
    pub fn from_makers(subject: &NodeMaker, object: &NodeMaker) -> Self {
        Self {
            subject_based_on_uri_column: subject.is_uri_column(),
            subject_based_on_uri_pattern: subject.is_uri_pattern(),
            object_based_on_uri_column: object.is_uri_column(),
            object_based_on_uri_pattern: object.is_uri_pattern(),
        }
    }
}

/// One compiled mapping rule: three node makers over one relation
///
/// Immutable once compiled; shared read-only between queries.
#[derive(Debug, Clone)]
pub struct PropertyBridge {
    /// Display form of the declaring mapping node
    pub id: String,
    /// Display form of the class map the subjects belong to
    pub class_map: String,
    pub subject: NodeMaker,
    pub predicate: NodeMaker,
    pub object: NodeMaker,
    pub database: Arc<Database>,
    pub relation: Relation,
    pub policy: UriMatchPolicy,
}

impl PropertyBridge {
    pub fn node_maker(&self, position: Position) -> &NodeMaker {
        match position {
            Position::Subject => &self.subject,
            Position::Predicate => &self.predicate,
            Position::Object => &self.object,
        }
    }

    /// Every column read by any of the three node makers
    pub fn columns(&self) -> BTreeSet<Attribute> {
        let mut columns = self.subject.columns();
        columns.extend(self.predicate.columns());
        columns.extend(self.object.columns());
        columns
    }

    /// Columns resolved to their original tables through the relation's aliases
    pub fn original_columns(&self) -> BTreeSet<Attribute> {
        self.columns()
            .iter()
            .map(|c| self.relation.aliases().original_of(c))
            .collect()
    }

    /// Whether the bridge could produce `term` at `position`
    pub fn could_fit(&self, position: Position, term: &Term) -> bool {
        self.node_maker(position).could_fit(term)
    }

    /// The relation narrowed to rows producing `term` at `position`
    ///
    /// `None` when the node maker cannot produce `term` or the pushed-down
    /// equalities contradict existing ones.
    pub fn restrict_to(&self, position: Position, term: &Term) -> Option<Relation> {
        let values = self.node_maker(position).column_values(term)?;
        self.relation.select(&values)
    }
}

impl fmt::Display for PropertyBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PropertyBridge {} [{} {} {}]",
            self.id, self.subject, self.predicate, self.object
        )
    }
}
