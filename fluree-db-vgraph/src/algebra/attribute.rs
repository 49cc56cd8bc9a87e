//! Qualified column references

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{VgraphError, VgraphResult};

/// A qualified column: `table.column` or `schema.table.column`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Attribute {
    pub schema: Option<String>,
    pub table: String,
    pub column: String,
}

impl Attribute {
    pub fn new(schema: Option<&str>, table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            schema: schema.map(str::to_string),
            table: table.into(),
            column: column.into(),
        }
    }

    /// Parse a column reference as written in a mapping
    pub fn parse(qualified: &str) -> VgraphResult<Self> {
        static QUALIFIED_COLUMN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^\s*(?:([^.\s]+)\.)?([^.\s]+)\.([^.\s]+)\s*$").expect("valid regex")
        });

        let caps = QUALIFIED_COLUMN
            .captures(qualified)
            .ok_or_else(|| VgraphError::InvalidColumn(qualified.to_string()))?;
        Ok(Self::new(
            caps.get(1).map(|m| m.as_str()),
            &caps[2],
            &caps[3],
        ))
    }

    /// `schema.table` or `table`
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.table),
            None => self.table.clone(),
        }
    }

    /// Same column on a different table
    pub fn with_table(&self, schema: Option<&str>, table: &str) -> Self {
        Self::new(schema, table, self.column.clone())
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.qualified_table(), self.column)
    }
}
