//! Value sources
//!
//! A [`ValueSource`] turns a database row into the lexical value of an RDF
//! term and, in the other direction, decomposes a bound value into the column
//! values that would have produced it. The family is closed:
//!
//! - [`ValueSource::Column`]: a single column, taken verbatim
//! - [`ValueSource::Pattern`]: a `@@table.column@@` template
//! - [`ValueSource::BlankNodeId`]: an opaque composite of several columns
//! - [`ValueSource::Translated`]: a source seen through a translation table
//! - [`ValueSource::LengthRestricted`] / [`ValueSource::Filtered`]: decorators
//!   that only narrow `could_fit`
//!
//! `could_fit` is conservative: `false` means the source provably cannot
//! produce the value. Every other operation fails (returns `None`) for values
//! `could_fit` rejects.

mod blank;
mod pattern;
mod restriction;
mod translation;

pub use blank::BlankNodeId;
pub use pattern::Pattern;
pub use restriction::{ValueConstraint, ValueFilter};
pub use translation::{
    CsvTranslationLoader, TranslationLoader, TranslationTable, Translator, TranslatorRegistry,
};

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::algebra::Attribute;

/// A fetched result row; `None` cells are SQL NULLs
pub type Row = [Option<String>];

/// Column → expected stored value
pub type ColumnValues = BTreeMap<Attribute, String>;

/// Maps qualified columns to positions in a result row
pub trait ColumnIndexer {
    fn index_of(&self, column: &Attribute) -> Option<usize>;

    /// Non-null cell of `row` for `column`
    fn cell<'r>(&self, row: &'r Row, column: &Attribute) -> Option<&'r str> {
        self.index_of(column)
            .and_then(|idx| row.get(idx))
            .and_then(|cell| cell.as_deref())
    }
}

impl ColumnIndexer for HashMap<Attribute, usize> {
    fn index_of(&self, column: &Attribute) -> Option<usize> {
        self.get(column).copied()
    }
}

impl ColumnIndexer for BTreeMap<Attribute, usize> {
    fn index_of(&self, column: &Attribute) -> Option<usize> {
        self.get(column).copied()
    }
}

/// How a term's lexical value is encoded in the database
#[derive(Debug, Clone)]
pub enum ValueSource {
    /// Identity mapping of one column
    Column(Attribute),
    /// Template with embedded column placeholders
    Pattern(Pattern),
    /// Deterministic composite of several columns (blank node identity)
    BlankNodeId(BlankNodeId),
    /// Stored values translated to RDF-side values through a table
    Translated {
        source: Box<ValueSource>,
        table: Arc<TranslationTable>,
    },
    /// Rejects values longer than `max_length` characters
    LengthRestricted {
        source: Box<ValueSource>,
        max_length: usize,
    },
    /// Rejects values failing any of the regex / substring hints
    Filtered {
        source: Box<ValueSource>,
        filters: Vec<ValueFilter>,
    },
}

impl ValueSource {
    pub fn column(attr: Attribute) -> Self {
        ValueSource::Column(attr)
    }

    pub fn translated(source: ValueSource, table: Arc<TranslationTable>) -> Self {
        ValueSource::Translated {
            source: Box::new(source),
            table,
        }
    }

    pub fn length_restricted(source: ValueSource, max_length: usize) -> Self {
        ValueSource::LengthRestricted {
            source: Box::new(source),
            max_length,
        }
    }

    /// Conservative feasibility test; an absent value always fits
    pub fn could_fit(&self, value: Option<&str>) -> bool {
        let Some(value) = value else {
            return true;
        };
        match self {
            ValueSource::Column(_) => true,
            ValueSource::Pattern(pattern) => pattern.could_fit(value),
            ValueSource::BlankNodeId(id) => id.could_fit(value),
            ValueSource::Translated { source, table } => table
                .to_db(value)
                .is_some_and(|db_value| source.could_fit(Some(&db_value))),
            ValueSource::LengthRestricted { source, max_length } => {
                value.chars().count() <= *max_length && source.could_fit(Some(value))
            }
            ValueSource::Filtered { source, filters } => {
                filters.iter().all(|f| f.matches(value)) && source.could_fit(Some(value))
            }
        }
    }

    /// Every column this source reads
    pub fn columns(&self) -> BTreeSet<Attribute> {
        match self {
            ValueSource::Column(attr) => BTreeSet::from([attr.clone()]),
            ValueSource::Pattern(pattern) => pattern.columns().iter().cloned().collect(),
            ValueSource::BlankNodeId(id) => id.columns().iter().cloned().collect(),
            ValueSource::Translated { source, .. }
            | ValueSource::LengthRestricted { source, .. }
            | ValueSource::Filtered { source, .. } => source.columns(),
        }
    }

    /// Decompose a bound value into the column values that encode it
    ///
    /// `None` if the value cannot be produced by this source.
    pub fn column_values(&self, value: &str) -> Option<ColumnValues> {
        match self {
            ValueSource::Column(attr) => Some(BTreeMap::from([(attr.clone(), value.to_string())])),
            ValueSource::Pattern(pattern) => pattern.column_values(value),
            ValueSource::BlankNodeId(id) => id.column_values(value),
            ValueSource::Translated { source, table } => {
                let db_value = table.to_db(value)?;
                source.column_values(&db_value)
            }
            ValueSource::LengthRestricted { source, max_length } => {
                if value.chars().count() > *max_length {
                    return None;
                }
                source.column_values(value)
            }
            ValueSource::Filtered { source, filters } => {
                if !filters.iter().all(|f| f.matches(value)) {
                    return None;
                }
                source.column_values(value)
            }
        }
    }

    /// Build the lexical value from a row; `None` on NULLs or untranslatable values
    pub fn value(&self, row: &Row, indexer: &dyn ColumnIndexer) -> Option<String> {
        match self {
            ValueSource::Column(attr) => indexer.cell(row, attr).map(str::to_string),
            ValueSource::Pattern(pattern) => pattern.value(row, indexer),
            ValueSource::BlankNodeId(id) => id.value(row, indexer),
            ValueSource::Translated { source, table } => {
                let db_value = source.value(row, indexer)?;
                table.to_rdf(&db_value)
            }
            ValueSource::LengthRestricted { source, .. } | ValueSource::Filtered { source, .. } => {
                source.value(row, indexer)
            }
        }
    }

    /// Push a node-level constraint onto this source
    ///
    /// The result accepts a subset of what `self` accepts. Length bounds
    /// intersect with any existing bound; filters accumulate.
    pub fn propagate_constraint(self, constraint: &ValueConstraint) -> ValueSource {
        let mut source = self;
        if let Some(max_length) = constraint.max_length {
            source = source.restrict_length(max_length);
        }
        let filters = constraint.filters();
        if !filters.is_empty() {
            source = source.add_filters(filters);
        }
        source
    }

    fn restrict_length(self, bound: usize) -> ValueSource {
        match self {
            ValueSource::LengthRestricted { source, max_length } => {
                ValueSource::LengthRestricted {
                    source,
                    max_length: max_length.min(bound),
                }
            }
            ValueSource::Filtered { source, filters } => ValueSource::Filtered {
                source: Box::new(source.restrict_length(bound)),
                filters,
            },
            other => ValueSource::length_restricted(other, bound),
        }
    }

    fn add_filters(self, new_filters: Vec<ValueFilter>) -> ValueSource {
        match self {
            ValueSource::Filtered {
                source,
                mut filters,
            } => {
                filters.extend(new_filters);
                ValueSource::Filtered { source, filters }
            }
            ValueSource::LengthRestricted { source, max_length } => {
                ValueSource::LengthRestricted {
                    source: Box::new(source.add_filters(new_filters)),
                    max_length,
                }
            }
            other => ValueSource::Filtered {
                source: Box::new(other),
                filters: new_filters,
            },
        }
    }

    /// The source with restriction decorators peeled off
    ///
    /// Decorators only narrow `could_fit`; the value derivation is the base's.
    pub fn base(&self) -> &ValueSource {
        match self {
            ValueSource::LengthRestricted { source, .. } | ValueSource::Filtered { source, .. } => {
                source.base()
            }
            other => other,
        }
    }

    /// Effective maximum length, if any decorator bounds it
    pub fn max_length(&self) -> Option<usize> {
        match self {
            ValueSource::LengthRestricted { source, max_length } => Some(
                source
                    .max_length()
                    .map_or(*max_length, |inner| inner.min(*max_length)),
            ),
            ValueSource::Filtered { source, .. } => source.max_length(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(s: &str) -> Attribute {
        Attribute::parse(s).unwrap()
    }

    fn indexer(cols: &[&str]) -> HashMap<Attribute, usize> {
        cols.iter().enumerate().map(|(i, c)| (attr(c), i)).collect()
    }

    fn all_sources() -> Vec<ValueSource> {
        let table = Arc::new(TranslationTable::from_pairs(
            "_:tt",
            [("1", "one"), ("2", "two")],
        ));
        vec![
            ValueSource::column(attr("t.name")),
            ValueSource::Pattern(Pattern::parse("http://ex/p@@t.id@@").unwrap()),
            ValueSource::BlankNodeId(BlankNodeId::new("cm", vec![attr("t.a"), attr("t.b")])),
            ValueSource::translated(ValueSource::column(attr("t.code")), table),
            ValueSource::length_restricted(ValueSource::column(attr("t.name")), 3),
        ]
    }

    #[test]
    fn test_absent_value_always_fits() {
        for source in all_sources() {
            assert!(source.could_fit(None), "{:?}", source);
        }
    }

    #[test]
    fn test_could_fit_false_implies_decomposition_fails() {
        let candidates = ["http://ex/p7", "one", "cm@@x@@y", "four", "toolong", "x"];
        for source in all_sources() {
            for value in candidates {
                if !source.could_fit(Some(value)) {
                    assert!(
                        source.column_values(value).is_none(),
                        "{:?} decomposed {}",
                        source,
                        value
                    );
                }
            }
        }
    }

    #[test]
    fn test_length_restricted_matches_wrapped_below_bound() {
        let inner = ValueSource::Pattern(Pattern::parse("a@@t.x@@").unwrap());
        let restricted = ValueSource::length_restricted(inner.clone(), 4);
        for value in ["a", "ab", "abc", "abcd", "xbcd", "abcde", "abcdefg"] {
            let expected = value.chars().count() <= 4 && inner.could_fit(Some(value));
            assert_eq!(restricted.could_fit(Some(value)), expected, "{}", value);
        }
    }

    #[test]
    fn test_length_restricted_does_not_alter_decode() {
        let restricted = ValueSource::length_restricted(ValueSource::column(attr("t.name")), 2);
        let idx = indexer(&["t.name"]);
        let row = vec![Some("longer than two".to_string())];
        assert_eq!(restricted.value(&row, &idx).as_deref(), Some("longer than two"));
        assert_eq!(restricted.columns(), BTreeSet::from([attr("t.name")]));
    }

    #[test]
    fn test_translated_round_trip() {
        let table = Arc::new(TranslationTable::from_pairs("_:tt", [("1", "one")]));
        let source = ValueSource::translated(ValueSource::column(attr("t.code")), table);
        let idx = indexer(&["t.code"]);

        assert_eq!(source.value(&[Some("1".to_string())], &idx).as_deref(), Some("one"));
        assert_eq!(source.value(&[Some("9".to_string())], &idx), None);
        assert_eq!(
            source.column_values("one"),
            Some(BTreeMap::from([(attr("t.code"), "1".to_string())]))
        );
        assert!(!source.could_fit(Some("nine")));
    }

    #[test]
    fn test_propagate_constraint_intersects_length() {
        let source = ValueSource::length_restricted(ValueSource::column(attr("t.name")), 10);
        let narrowed = source.propagate_constraint(&ValueConstraint::new().with_max_length(4));
        assert_eq!(narrowed.max_length(), Some(4));
        assert!(!narrowed.could_fit(Some("abcde")));

        let widened = narrowed.propagate_constraint(&ValueConstraint::new().with_max_length(8));
        assert_eq!(widened.max_length(), Some(4));
    }

    #[test]
    fn test_propagate_constraint_wraps_plain_source() {
        let source = ValueSource::column(attr("t.mail"));
        let constraint = ValueConstraint::new()
            .with_max_length(20)
            .with_contains("@")
            .with_regex("[a-z@.]+")
            .unwrap();
        let restricted = source.propagate_constraint(&constraint);

        assert!(restricted.could_fit(Some("a@b.org")));
        assert!(!restricted.could_fit(Some("ab.org")));
        assert!(!restricted.could_fit(Some("A@B.ORG")));
        assert!(!restricted.could_fit(Some("averyveryverylong@b.org")));
        assert!(matches!(restricted.base(), ValueSource::Column(_)));
        assert_eq!(restricted.columns(), BTreeSet::from([attr("t.mail")]));
    }
}
