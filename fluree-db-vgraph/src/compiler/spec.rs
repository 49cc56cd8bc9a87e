//! Node maker specifications
//!
//! A [`NodeMakerSpec`] collects everything the mapping says about one node
//! (class map, property bridge object, fixed term) before it is turned into
//! a [`NodeMaker`] and the relation it reads from.

use std::collections::BTreeSet;
use std::sync::Arc;

use fluree_graph_ir::Term;

use crate::algebra::{AliasMap, Attribute, Join, Relation};
use crate::database::Database;
use crate::error::{VgraphError, VgraphResult};
use crate::nodes::{NodeKind, NodeMaker};
use crate::values::{
    BlankNodeId, Pattern, TranslationTable, ValueConstraint, ValueFilter, ValueSource,
};

/// How a node's values are identified
#[derive(Debug, Clone)]
enum Identifier {
    UriColumn(Attribute),
    UriPattern(Pattern),
    BlankColumns(Vec<Attribute>),
    LiteralColumn(Attribute),
    LiteralPattern(Pattern),
    Fixed(Term),
}

impl Identifier {
    fn describe(&self) -> &'static str {
        match self {
            Identifier::UriColumn(_) => "d2rq:uriColumn",
            Identifier::UriPattern(_) => "d2rq:uriPattern",
            Identifier::BlankColumns(_) => "d2rq:bNodeIdColumns",
            Identifier::LiteralColumn(_) => "d2rq:column",
            Identifier::LiteralPattern(_) => "d2rq:pattern",
            Identifier::Fixed(_) => "a fixed value",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeMakerSpec {
    id: String,
    database: Option<Arc<Database>>,
    identifier: Option<Identifier>,
    datatype: Option<String>,
    lang: Option<String>,
    constraint: ValueConstraint,
    translation_table: Option<Arc<TranslationTable>>,
    joins: BTreeSet<Join>,
    conditions: BTreeSet<String>,
    aliases: AliasMap,
    unique: bool,
}

impl NodeMakerSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            database: None,
            identifier: None,
            datatype: None,
            lang: None,
            constraint: ValueConstraint::new(),
            translation_table: None,
            joins: BTreeSet::new(),
            conditions: BTreeSet::new(),
            aliases: AliasMap::new(),
            unique: false,
        }
    }

    /// Spec for a constant term; always unique
    pub fn fixed(term: Term) -> Self {
        let mut spec = Self::new(term.to_string());
        spec.identifier = Some(Identifier::Fixed(term));
        spec.unique = true;
        spec
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn database(&self) -> Option<&Arc<Database>> {
        self.database.as_ref()
    }

    pub fn set_database(&mut self, database: Option<Arc<Database>>) {
        self.database = database;
    }

    fn set_identifier(&mut self, identifier: Identifier) -> VgraphResult<()> {
        if let Some(existing) = &self.identifier {
            return Err(VgraphError::ConflictingIdentifier {
                property: identifier.describe().to_string(),
                node: self.id.clone(),
                existing: existing.describe().to_string(),
            });
        }
        self.identifier = Some(identifier);
        Ok(())
    }

    pub fn set_uri_column(&mut self, column: Attribute) -> VgraphResult<()> {
        self.set_identifier(Identifier::UriColumn(column))
    }

    pub fn set_uri_pattern(&mut self, pattern: Pattern) -> VgraphResult<()> {
        self.set_identifier(Identifier::UriPattern(pattern))
    }

    pub fn set_blank_columns(&mut self, columns: Vec<Attribute>) -> VgraphResult<()> {
        self.set_identifier(Identifier::BlankColumns(columns))
    }

    pub fn set_literal_column(&mut self, column: Attribute) -> VgraphResult<()> {
        self.set_identifier(Identifier::LiteralColumn(column))
    }

    pub fn set_literal_pattern(&mut self, pattern: Pattern) -> VgraphResult<()> {
        self.set_identifier(Identifier::LiteralPattern(pattern))
    }

    pub fn set_datatype(&mut self, datatype: impl Into<String>) {
        self.datatype = Some(datatype.into());
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = Some(lang.into());
    }

    pub fn set_max_length(&mut self, max_length: usize) {
        self.constraint.max_length = Some(max_length);
    }

    pub fn set_contains(&mut self, contains: impl Into<String>) {
        self.constraint.contains = Some(contains.into());
    }

    pub fn set_regex(&mut self, regex: &str) -> VgraphResult<()> {
        self.constraint.regex = Some(ValueFilter::regex(regex)?);
        Ok(())
    }

    pub fn set_translation_table(&mut self, table: Arc<TranslationTable>) {
        self.translation_table = Some(table);
    }

    pub fn add_joins(&mut self, joins: impl IntoIterator<Item = Join>) {
        self.joins.extend(joins);
    }

    pub fn add_conditions(&mut self, conditions: impl IntoIterator<Item = String>) {
        self.conditions.extend(conditions);
    }

    pub fn set_aliases(&mut self, aliases: AliasMap) {
        self.aliases = self.aliases.merge(&aliases);
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.unique = unique;
    }

    pub fn is_uri_column_spec(&self) -> bool {
        matches!(self.identifier, Some(Identifier::UriColumn(_)))
    }

    pub fn is_uri_pattern_spec(&self) -> bool {
        matches!(self.identifier, Some(Identifier::UriPattern(_)))
    }

    pub fn is_literal_spec(&self) -> bool {
        matches!(
            self.identifier,
            Some(Identifier::LiteralColumn(_) | Identifier::LiteralPattern(_))
        )
    }

    pub fn has_identifier(&self) -> bool {
        self.identifier.is_some()
    }

    /// Adopt the identity and relational context of another (class map) spec
    ///
    /// Used for `d2rq:refersToClassMap`. This spec's own joins, conditions and
    /// aliases are kept alongside the referenced ones.
    pub fn wrap_existing(&mut self, other: &NodeMakerSpec) -> VgraphResult<()> {
        if let Some(identifier) = &other.identifier {
            self.set_identifier(identifier.clone())?;
        }
        if self.translation_table.is_none() {
            self.translation_table = other.translation_table.clone();
        }
        self.constraint.max_length = match (self.constraint.max_length, other.constraint.max_length)
        {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        if self.constraint.contains.is_none() {
            self.constraint.contains = other.constraint.contains.clone();
        }
        if self.constraint.regex.is_none() {
            self.constraint.regex = other.constraint.regex.clone();
        }
        self.joins.extend(other.joins.iter().cloned());
        self.conditions.extend(other.conditions.iter().cloned());
        self.aliases = self.aliases.merge(&other.aliases);
        Ok(())
    }

    fn literal_kind(&self) -> NodeKind {
        match (&self.datatype, &self.lang) {
            (Some(datatype), _) => NodeKind::typed_literal(datatype.clone()),
            (None, Some(lang)) => NodeKind::lang_literal(lang.clone()),
            (None, None) => NodeKind::plain_literal(),
        }
    }

    /// Build the node maker
    pub fn build(&self) -> VgraphResult<NodeMaker> {
        let Some(identifier) = &self.identifier else {
            return Err(VgraphError::MissingIdentifier(self.id.clone()));
        };
        let (kind, source) = match identifier {
            Identifier::Fixed(term) => return Ok(NodeMaker::fixed(term.clone())),
            Identifier::UriColumn(column) => (NodeKind::Uri, ValueSource::Column(column.clone())),
            Identifier::UriPattern(pattern) => {
                (NodeKind::Uri, ValueSource::Pattern(pattern.clone()))
            }
            Identifier::BlankColumns(columns) => (
                NodeKind::Blank,
                ValueSource::BlankNodeId(BlankNodeId::new(self.id.clone(), columns.clone())),
            ),
            Identifier::LiteralColumn(column) => {
                (self.literal_kind(), ValueSource::Column(column.clone()))
            }
            Identifier::LiteralPattern(pattern) => {
                (self.literal_kind(), ValueSource::Pattern(pattern.clone()))
            }
        };
        let source = match &self.translation_table {
            Some(table) => ValueSource::translated(source, Arc::clone(table)),
            None => source,
        };
        let source = if self.constraint.is_empty() {
            source
        } else {
            source.propagate_constraint(&self.constraint)
        };
        Ok(NodeMaker::typed(kind, source, self.unique))
    }

    /// Joins, aliases and conditions declared on this node
    pub fn relation(&self) -> Relation {
        Relation::new(
            self.joins.clone(),
            self.aliases.clone(),
            self.conditions.clone(),
            self.unique,
        )
    }
}
