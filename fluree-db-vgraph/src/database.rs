//! Database descriptors and their column type registry

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::algebra::Attribute;
use crate::error::{VgraphError, VgraphResult};
use crate::vocab::D2RQ;

/// Declared SQL type family of a column
///
/// Drives literal quoting when bound values are pushed into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Numeric,
    Date,
}

/// Column type marker property → column type
pub const COLUMN_TYPE_MARKERS: [(&str, ColumnType); 3] = [
    (D2RQ::TEXT_COLUMN, ColumnType::Text),
    (D2RQ::NUMERIC_COLUMN, ColumnType::Numeric),
    (D2RQ::DATE_COLUMN, ColumnType::Date),
];

impl ColumnType {
    /// Resolve a column type marker property IRI
    pub fn from_marker(iri: &str) -> Option<Self> {
        COLUMN_TYPE_MARKERS
            .iter()
            .find(|(marker, _)| *marker == iri)
            .map(|(_, ty)| *ty)
    }

    /// Whether values of this type are quoted in SQL literals
    pub fn is_quoted(&self) -> bool {
        !matches!(self, ColumnType::Numeric)
    }
}

/// How to reach the database; kept verbatim, never used to connect here
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    pub odbc_dsn: Option<String>,
    pub jdbc_dsn: Option<String>,
    pub jdbc_driver: Option<String>,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
}

/// A relational database referenced by class maps
///
/// Immutable after compilation; bridges share it through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Display form of the declaring mapping node
    pub id: String,
    pub connection: ConnectionDescriptor,
    column_types: BTreeMap<Attribute, ColumnType>,
    allow_distinct: bool,
    expression_translator: Option<String>,
}

impl Database {
    pub fn new(id: impl Into<String>, connection: ConnectionDescriptor) -> Self {
        Self {
            id: id.into(),
            connection,
            column_types: BTreeMap::new(),
            allow_distinct: true,
            expression_translator: None,
        }
    }

    pub fn with_column_type(mut self, column: Attribute, ty: ColumnType) -> Self {
        self.column_types.insert(column, ty);
        self
    }

    pub fn with_allow_distinct(mut self, allow: bool) -> Self {
        self.allow_distinct = allow;
        self
    }

    pub fn with_expression_translator(mut self, translator: impl Into<String>) -> Self {
        self.expression_translator = Some(translator.into());
        self
    }

    pub fn column_type(&self, column: &Attribute) -> Option<ColumnType> {
        self.column_types.get(column).copied()
    }

    pub fn has_type(&self, column: &Attribute) -> bool {
        self.column_types.contains_key(column)
    }

    /// Declared type of a column, or an error naming the database
    pub fn assert_has_type(&self, column: &Attribute) -> VgraphResult<ColumnType> {
        self.column_type(column)
            .ok_or_else(|| VgraphError::UndeclaredColumnType {
                column: column.to_string(),
                database: self.id.clone(),
            })
    }

    pub fn column_types(&self) -> impl Iterator<Item = (&Attribute, ColumnType)> {
        self.column_types.iter().map(|(a, t)| (a, *t))
    }

    /// Whether SELECT DISTINCT may be used against this database
    pub fn allow_distinct(&self) -> bool {
        self.allow_distinct
    }

    pub fn expression_translator(&self) -> Option<&str> {
        self.expression_translator.as_deref()
    }

    /// Render a value as a SQL literal for the given column
    ///
    /// `None` when an unquoted column type gets a value that is not a plain
    /// number; such a value can never be stored in the column.
    pub fn quote_value(&self, column: &Attribute, value: &str) -> Option<String> {
        static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
                .expect("valid regex")
        });
        match self.column_type(column) {
            Some(ty) if !ty.is_quoted() => {
                NUMBER_RE.is_match(value).then(|| value.to_string())
            }
            _ => Some(format!("'{}'", value.replace('\'', "''"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(s: &str) -> Attribute {
        Attribute::parse(s).unwrap()
    }

    #[test]
    fn test_column_type_markers() {
        assert_eq!(ColumnType::from_marker(D2RQ::TEXT_COLUMN), Some(ColumnType::Text));
        assert_eq!(ColumnType::from_marker(D2RQ::NUMERIC_COLUMN), Some(ColumnType::Numeric));
        assert_eq!(ColumnType::from_marker(D2RQ::DATE_COLUMN), Some(ColumnType::Date));
        assert_eq!(ColumnType::from_marker(D2RQ::COLUMN), None);
    }

    #[test]
    fn test_assert_has_type() {
        let db = Database::new("_:db", ConnectionDescriptor::default())
            .with_column_type(attr("t.id"), ColumnType::Numeric);
        assert_eq!(db.assert_has_type(&attr("t.id")).unwrap(), ColumnType::Numeric);
        let err = db.assert_has_type(&attr("t.name")).unwrap_err();
        assert!(err.to_string().contains("t.name"));
        assert!(db.allow_distinct());
    }

    #[test]
    fn test_quote_value() {
        let db = Database::new("_:db", ConnectionDescriptor::default())
            .with_column_type(attr("t.id"), ColumnType::Numeric)
            .with_column_type(attr("t.name"), ColumnType::Text);
        assert_eq!(db.quote_value(&attr("t.id"), "42").as_deref(), Some("42"));
        assert_eq!(db.quote_value(&attr("t.id"), "-1.5e3").as_deref(), Some("-1.5e3"));
        assert_eq!(
            db.quote_value(&attr("t.name"), "O'Hara").as_deref(),
            Some("'O''Hara'")
        );
    }

    #[test]
    fn test_quote_value_rejects_non_numeric() {
        let db = Database::new("_:db", ConnectionDescriptor::default())
            .with_column_type(attr("t.id"), ColumnType::Numeric);
        assert_eq!(db.quote_value(&attr("t.id"), "1 OR 1=1"), None);
        assert_eq!(db.quote_value(&attr("t.id"), "1; DROP TABLE t"), None);
        assert_eq!(db.quote_value(&attr("t.id"), ""), None);
    }

    #[test]
    fn test_quote_value_of_decomposed_iri() {
        use crate::values::Pattern;

        let db = Database::new("_:db", ConnectionDescriptor::default())
            .with_column_type(attr("t.id"), ColumnType::Numeric);
        let pattern = Pattern::parse("http://ex/person@@t.id@@").unwrap();
        let values = pattern.column_values("http://ex/person1 OR 1=1").unwrap();
        let value = &values[&attr("t.id")];
        assert_eq!(value, "1 OR 1=1");
        assert_eq!(db.quote_value(&attr("t.id"), value), None);
    }
}
