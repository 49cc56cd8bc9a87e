//! Composite blank node identifiers

use std::collections::BTreeMap;

use super::{ColumnIndexer, ColumnValues, Row};
use crate::algebra::Attribute;
use crate::error::{VgraphError, VgraphResult};
use crate::odometer::Odometer;

/// Opaque identifier composed from the owning class map and several columns
///
/// The lexical form is `classMapId@@v1@@v2...`, so identifiers of different
/// class maps never collide and the column values can be recovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankNodeId {
    class_map_id: String,
    columns: Vec<Attribute>,
}

impl BlankNodeId {
    pub const DELIMITER: &'static str = "@@";

    pub fn new(class_map_id: impl Into<String>, columns: Vec<Attribute>) -> Self {
        Self {
            class_map_id: class_map_id.into(),
            columns,
        }
    }

    pub fn class_map_id(&self) -> &str {
        &self.class_map_id
    }

    pub fn columns(&self) -> &[Attribute] {
        &self.columns
    }

    fn compose<'a>(&self, parts: impl Iterator<Item = &'a str>) -> String {
        let mut id = self.class_map_id.clone();
        for part in parts {
            id.push_str(Self::DELIMITER);
            id.push_str(part);
        }
        id
    }

    fn split<'v>(&self, value: &'v str) -> Option<Vec<&'v str>> {
        let mut parts = value.split(Self::DELIMITER);
        if parts.next()? != self.class_map_id {
            return None;
        }
        let parts: Vec<&str> = parts.collect();
        (parts.len() == self.columns.len()).then_some(parts)
    }

    pub fn could_fit(&self, value: &str) -> bool {
        self.split(value).is_some()
    }

    pub fn column_values(&self, value: &str) -> Option<ColumnValues> {
        let parts = self.split(value)?;
        let mut values = BTreeMap::new();
        for (column, part) in self.columns.iter().zip(parts) {
            match values.get(column) {
                Some(existing) if existing != part => return None,
                _ => {
                    values.insert(column.clone(), part.to_string());
                }
            }
        }
        Some(values)
    }

    pub fn value(&self, row: &Row, indexer: &dyn ColumnIndexer) -> Option<String> {
        let parts = self
            .columns
            .iter()
            .map(|c| indexer.cell(row, c))
            .collect::<Option<Vec<_>>>()?;
        Some(self.compose(parts.into_iter()))
    }

    /// Every identifier reachable from the observed values of each column
    ///
    /// `observed[i]` holds the distinct values seen for `columns()[i]`. One
    /// odometer digit per column, each ranging over that column's values.
    pub fn identifiers(&self, observed: &[Vec<String>]) -> VgraphResult<Vec<String>> {
        if observed.len() != self.columns.len() {
            return Err(VgraphError::InvalidOdometer(format!(
                "{} columns but {} value lists for {}",
                self.columns.len(),
                observed.len(),
                self.class_map_id
            )));
        }
        if observed.is_empty() {
            return Ok(vec![self.class_map_id.clone()]);
        }
        if observed.iter().any(Vec::is_empty) {
            return Ok(Vec::new());
        }

        let mut odometer = Odometer::new(observed.iter().map(Vec::len).collect())?;
        let mut ids = Vec::with_capacity(odometer.combinations());
        loop {
            let parts = odometer
                .counters()
                .iter()
                .zip(observed)
                .map(|(&i, values)| values[i].as_str());
            ids.push(self.compose(parts));
            if odometer.next() == odometer.len() {
                break;
            }
        }
        Ok(ids)
    }
}
