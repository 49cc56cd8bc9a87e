//! `@@table.column@@` templates

use std::collections::BTreeMap;

use regex::Regex;

use super::{ColumnIndexer, ColumnValues, Row};
use crate::algebra::Attribute;
use crate::error::{VgraphError, VgraphResult};

/// A template mixing literal text and column placeholders
///
/// `http://example.org/person@@employees.ID@@` produces
/// `http://example.org/person42` from a row whose `employees.ID` is `42`, and
/// decomposes `http://example.org/person42` back into `employees.ID = 42`.
///
/// Decomposition is non-greedy: each placeholder takes the shortest text
/// before the next literal part. A column value containing that literal does
/// not round-trip; with `urn:x:@@t.a@@-@@t.b@@`, `a = x-y, b = z` expands to
/// `urn:x:x-y-z` and decomposes to `a = x, b = y-z`.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: String,
    /// Literal text around the placeholders; always `columns.len() + 1` parts
    literal_parts: Vec<String>,
    columns: Vec<Attribute>,
    matcher: Regex,
}

impl Pattern {
    pub const DELIMITER: &'static str = "@@";

    /// Parse a template; an unbalanced `@@` is an error
    pub fn parse(pattern: &str) -> VgraphResult<Self> {
        let parts: Vec<&str> = pattern.split(Self::DELIMITER).collect();
        if parts.len() % 2 == 0 {
            return Err(VgraphError::InvalidPattern(format!(
                "unbalanced {} in \"{}\"",
                Self::DELIMITER,
                pattern
            )));
        }

        let mut literal_parts = Vec::with_capacity(parts.len() / 2 + 1);
        let mut columns = Vec::with_capacity(parts.len() / 2);
        for (i, part) in parts.iter().enumerate() {
            if i % 2 == 0 {
                literal_parts.push(part.to_string());
            } else {
                let column = Attribute::parse(part).map_err(|_| {
                    VgraphError::InvalidPattern(format!(
                        "bad column \"{}\" in \"{}\"",
                        part, pattern
                    ))
                })?;
                columns.push(column);
            }
        }

        let mut expr = String::from("(?s)^");
        for (i, literal) in literal_parts.iter().enumerate() {
            if i > 0 {
                expr.push_str("(.*?)");
            }
            expr.push_str(&regex::escape(literal));
        }
        expr.push('$');
        let matcher = Regex::new(&expr).map_err(|e| VgraphError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            literal_parts,
            columns,
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Placeholder columns in template order (may repeat)
    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    /// Text before the first placeholder
    pub fn prefix(&self) -> &str {
        &self.literal_parts[0]
    }

    /// Whether the value has the template's shape
    pub fn could_fit(&self, value: &str) -> bool {
        self.matcher.is_match(value)
    }

    /// Extract placeholder values from a value of the template's shape
    ///
    /// A column repeated in the template must match the same text each time.
    pub fn column_values(&self, value: &str) -> Option<ColumnValues> {
        let captures = self.matcher.captures(value)?;
        let mut values = BTreeMap::new();
        for (i, column) in self.columns.iter().enumerate() {
            let text = captures.get(i + 1)?.as_str();
            match values.get(column) {
                Some(existing) if existing != text => return None,
                _ => {
                    values.insert(column.clone(), text.to_string());
                }
            }
        }
        Some(values)
    }

    /// Substitute row values into the template; `None` if any column is NULL
    pub fn value(&self, row: &Row, indexer: &dyn ColumnIndexer) -> Option<String> {
        let mut result = String::with_capacity(self.pattern.len());
        for (i, literal) in self.literal_parts.iter().enumerate() {
            if i > 0 {
                result.push_str(indexer.cell(row, &self.columns[i - 1])?);
            }
            result.push_str(literal);
        }
        Some(result)
    }

    /// Substitute explicit column values into the template
    pub fn expand(&self, values: &ColumnValues) -> Option<String> {
        let mut result = String::with_capacity(self.pattern.len());
        for (i, literal) in self.literal_parts.iter().enumerate() {
            if i > 0 {
                result.push_str(values.get(&self.columns[i - 1])?);
            }
            result.push_str(literal);
        }
        Some(result)
    }

    /// Whether a URI pattern has no scheme and must be resolved against a base
    pub fn is_relative(pattern: &str) -> bool {
        !pattern.contains(':')
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for Pattern {}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attr(s: &str) -> Attribute {
        Attribute::parse(s).unwrap()
    }

    #[test]
    fn test_parse() {
        let p = Pattern::parse("http://ex/person@@t.id@@/@@t.name@@").unwrap();
        assert_eq!(p.columns(), &[attr("t.id"), attr("t.name")]);
        assert_eq!(p.prefix(), "http://ex/person");
        assert_eq!(p.to_string(), "http://ex/person@@t.id@@/@@t.name@@");
    }

    #[test]
    fn test_parse_rejects_unbalanced() {
        assert!(matches!(
            Pattern::parse("http://ex/@@t.id"),
            Err(VgraphError::InvalidPattern(_))
        ));
        assert!(matches!(
            Pattern::parse("http://ex/@@id@@"),
            Err(VgraphError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_could_fit_rejects_wrong_shape() {
        let p = Pattern::parse("http://ex/person@@t.id@@").unwrap();
        assert!(p.could_fit("http://ex/person1"));
        assert!(p.could_fit("http://ex/person"));
        assert!(!p.could_fit("http://ex/foobar"));
        assert!(p.column_values("http://ex/foobar").is_none());
    }

    #[test]
    fn test_round_trip() {
        let p = Pattern::parse("urn:x:@@t.a@@-@@t.b@@.html").unwrap();
        let values: ColumnValues = [
            (attr("t.a"), "left".to_string()),
            (attr("t.b"), "right".to_string()),
        ]
        .into_iter()
        .collect();
        let expanded = p.expand(&values).unwrap();
        assert_eq!(expanded, "urn:x:left-right.html");
        assert_eq!(p.column_values(&expanded), Some(values));
    }

    #[test]
    fn test_decompose_is_non_greedy() {
        let p = Pattern::parse("urn:x:@@t.a@@-@@t.b@@").unwrap();
        let values: ColumnValues = [
            (attr("t.a"), "x-y".to_string()),
            (attr("t.b"), "z".to_string()),
        ]
        .into_iter()
        .collect();
        let expanded = p.expand(&values).unwrap();
        assert_eq!(expanded, "urn:x:x-y-z");

        let decomposed = p.column_values(&expanded).unwrap();
        assert_eq!(decomposed[&attr("t.a")], "x");
        assert_eq!(decomposed[&attr("t.b")], "y-z");
        assert_eq!(p.expand(&decomposed).as_deref(), Some("urn:x:x-y-z"));
    }

    #[test]
    fn test_value_from_row() {
        let p = Pattern::parse("http://ex/person@@t.id@@").unwrap();
        let idx: HashMap<Attribute, usize> = [(attr("t.id"), 1)].into_iter().collect();
        let row = vec![Some("ignored".to_string()), Some("7".to_string())];
        assert_eq!(p.value(&row, &idx).as_deref(), Some("http://ex/person7"));

        let null_row = vec![Some("ignored".to_string()), None];
        assert_eq!(p.value(&null_row, &idx), None);
    }

    #[test]
    fn test_repeated_column_must_agree() {
        let p = Pattern::parse("@@t.id@@/@@t.id@@").unwrap();
        assert!(p.column_values("4/4").is_some());
        assert!(p.column_values("4/5").is_none());
    }

    #[test]
    fn test_special_characters_are_literal() {
        let p = Pattern::parse("http://ex/?q=(@@t.id@@)").unwrap();
        assert!(p.could_fit("http://ex/?q=(12)"));
        assert!(!p.could_fit("http://ex/Xq=(12)"));
    }

    #[test]
    fn test_is_relative() {
        assert!(Pattern::is_relative("person@@t.id@@"));
        assert!(!Pattern::is_relative("http://ex/person@@t.id@@"));
        assert!(!Pattern::is_relative("urn:x@@t.id@@"));
    }
}
