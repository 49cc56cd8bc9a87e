//! Value hints that narrow what a source can produce

use regex::Regex;

use crate::error::{VgraphError, VgraphResult};

/// A single accept/reject test applied to a candidate value
#[derive(Debug, Clone)]
pub enum ValueFilter {
    /// Value must contain this substring
    Contains(String),
    /// Value must match this expression in full
    Regex(Regex),
}

impl ValueFilter {
    /// Compile a regex hint; the expression must match the whole value
    pub fn regex(pattern: &str) -> VgraphResult<Self> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(ValueFilter::Regex)
            .map_err(|e| VgraphError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueFilter::Contains(needle) => value.contains(needle.as_str()),
            ValueFilter::Regex(regex) => regex.is_match(value),
        }
    }
}

/// Node-level constraint pushed down onto a value source
///
/// Built from the `d2rq:valueMaxLength`, `d2rq:valueContains` and
/// `d2rq:valueRegex` hints, or by a query layer that learned something
/// about the values a node can take.
#[derive(Debug, Clone, Default)]
pub struct ValueConstraint {
    pub max_length: Option<usize>,
    pub contains: Option<String>,
    pub regex: Option<ValueFilter>,
}

impl ValueConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_contains(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    pub fn with_regex(mut self, pattern: &str) -> VgraphResult<Self> {
        self.regex = Some(ValueFilter::regex(pattern)?);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.max_length.is_none() && self.contains.is_none() && self.regex.is_none()
    }

    /// Substring and regex parts as filters
    pub fn filters(&self) -> Vec<ValueFilter> {
        let mut filters = Vec::new();
        if let Some(needle) = &self.contains {
            filters.push(ValueFilter::Contains(needle.clone()));
        }
        if let Some(regex) = &self.regex {
            filters.push(regex.clone());
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_is_anchored() {
        let filter = ValueFilter::regex("[0-9]+").unwrap();
        assert!(filter.matches("123"));
        assert!(!filter.matches("a123"));
        assert!(!filter.matches("123a"));
    }

    #[test]
    fn test_invalid_regex() {
        assert!(matches!(
            ValueFilter::regex("(unclosed"),
            Err(VgraphError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_constraint_filters() {
        let constraint = ValueConstraint::new().with_contains("@");
        assert!(!constraint.is_empty());
        assert_eq!(constraint.filters().len(), 1);
        assert!(ValueConstraint::new().is_empty());
    }
}
