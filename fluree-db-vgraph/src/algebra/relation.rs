//! The relational context a bridge reads its rows from

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{AliasMap, Attribute, Join};

/// Joins, aliases and row conditions shared by the node makers of one bridge
///
/// `attribute_conditions` hold equality constraints pushed down from a bound
/// query term; freshly compiled bridges have none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    joins: BTreeSet<Join>,
    aliases: AliasMap,
    conditions: BTreeSet<String>,
    attribute_conditions: BTreeMap<Attribute, String>,
    unique: bool,
}

impl Relation {
    pub fn new(
        joins: BTreeSet<Join>,
        aliases: AliasMap,
        conditions: BTreeSet<String>,
        unique: bool,
    ) -> Self {
        Self {
            joins,
            aliases,
            conditions,
            attribute_conditions: BTreeMap::new(),
            unique,
        }
    }

    /// Relation with no joins, aliases or conditions
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn joins(&self) -> &BTreeSet<Join> {
        &self.joins
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Raw SQL condition fragments
    pub fn conditions(&self) -> &BTreeSet<String> {
        &self.conditions
    }

    pub fn attribute_conditions(&self) -> &BTreeMap<Attribute, String> {
        &self.attribute_conditions
    }

    /// Whether every row yields a distinct result (no DISTINCT needed)
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Tables referenced by the joins, resolved through aliases
    pub fn join_tables(&self) -> BTreeSet<String> {
        self.joins
            .iter()
            .flat_map(|j| j.tables())
            .map(|t| self.aliases.original_table(&t).to_string())
            .collect()
    }

    /// Union of two relations
    ///
    /// The result is unique only if both sides are.
    pub fn merge(&self, other: &Relation) -> Relation {
        let mut attribute_conditions = self.attribute_conditions.clone();
        attribute_conditions.extend(
            other
                .attribute_conditions
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Relation {
            joins: self.joins.union(&other.joins).cloned().collect(),
            aliases: self.aliases.merge(&other.aliases),
            conditions: self.conditions.union(&other.conditions).cloned().collect(),
            attribute_conditions,
            unique: self.unique && other.unique,
        }
    }

    /// Add equality conditions on columns
    ///
    /// Returns `None` when a column is already constrained to a different
    /// value: the selection is then provably empty.
    pub fn select(&self, column_values: &BTreeMap<Attribute, String>) -> Option<Relation> {
        let mut selected = self.clone();
        for (attr, value) in column_values {
            match selected.attribute_conditions.get(attr) {
                Some(existing) if existing != value => return None,
                Some(_) => {}
                None => {
                    selected
                        .attribute_conditions
                        .insert(attr.clone(), value.clone());
                }
            }
        }
        Some(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(s: &str) -> Attribute {
        Attribute::parse(s).unwrap()
    }

    #[test]
    fn test_merge_unions_everything() {
        let a = Relation::new(
            [Join::parse("a.x = b.y").unwrap()].into_iter().collect(),
            AliasMap::new(),
            ["a.flag = 1".to_string()].into_iter().collect(),
            true,
        );
        let b = Relation::new(
            [Join::parse("b.y = a.x").unwrap(), Join::parse("b.z = c.z").unwrap()]
                .into_iter()
                .collect(),
            AliasMap::parse(["c AS d"]).unwrap(),
            BTreeSet::new(),
            false,
        );
        let merged = a.merge(&b);
        assert_eq!(merged.joins().len(), 2);
        assert_eq!(merged.conditions().len(), 1);
        assert!(merged.aliases().is_alias("d"));
        assert!(!merged.is_unique());
        assert_eq!(
            merged.join_tables().into_iter().collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn test_select_adds_conditions() {
        let rel = Relation::empty();
        let values: BTreeMap<_, _> = [(attr("t.id"), "1".to_string())].into_iter().collect();
        let selected = rel.select(&values).unwrap();
        assert_eq!(selected.attribute_conditions().get(&attr("t.id")).map(String::as_str), Some("1"));

        // Same value again is fine
        assert!(selected.select(&values).is_some());

        // Contradiction is empty
        let other: BTreeMap<_, _> = [(attr("t.id"), "2".to_string())].into_iter().collect();
        assert!(selected.select(&other).is_none());
    }
}
