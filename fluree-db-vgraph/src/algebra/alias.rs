//! Table aliases (`d2rq:alias "employees AS managers"`)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::{VgraphError, VgraphResult};

/// Alias name → original table name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMap {
    aliases: BTreeMap<String, String>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a set of `original AS alias` declarations
    pub fn parse<'a>(declarations: impl IntoIterator<Item = &'a str>) -> VgraphResult<Self> {
        let mut map = Self::new();
        for declaration in declarations {
            let (original, alias) = split_alias(declaration)
                .ok_or_else(|| VgraphError::InvalidAlias(declaration.to_string()))?;
            map.aliases.insert(alias.to_string(), original.to_string());
        }
        Ok(map)
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    pub fn is_alias(&self, table: &str) -> bool {
        self.aliases.contains_key(table)
    }

    /// Original table name of an alias, or the name itself
    pub fn original_table<'a>(&'a self, table: &'a str) -> &'a str {
        self.aliases.get(table).map(String::as_str).unwrap_or(table)
    }

    /// Column rewritten to refer to the original table behind an alias
    pub fn original_of(&self, attr: &Attribute) -> Attribute {
        match self.aliases.get(&attr.qualified_table()) {
            Some(original) => match original.split_once('.') {
                Some((schema, table)) => attr.with_table(Some(schema), table),
                None => attr.with_table(None, original),
            },
            None => attr.clone(),
        }
    }

    /// Union of two alias maps; entries of `other` win on conflict
    pub fn merge(&self, other: &AliasMap) -> AliasMap {
        let mut aliases = self.aliases.clone();
        aliases.extend(other.aliases.iter().map(|(k, v)| (k.clone(), v.clone())));
        AliasMap { aliases }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, o)| (a.as_str(), o.as_str()))
    }
}

/// Split `original AS alias`, with `AS` matched case-insensitively
fn split_alias(declaration: &str) -> Option<(&str, &str)> {
    let words: Vec<&str> = declaration.split_whitespace().collect();
    match words.as_slice() {
        [original, kw, alias] if kw.eq_ignore_ascii_case("as") => Some((*original, *alias)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_of() {
        let aliases = AliasMap::parse(["employees AS managers"]).unwrap();
        let attr = Attribute::parse("managers.ID").unwrap();
        assert_eq!(aliases.original_of(&attr).to_string(), "employees.ID");

        let plain = Attribute::parse("employees.ID").unwrap();
        assert_eq!(aliases.original_of(&plain), plain);
        assert!(aliases.is_alias("managers"));
        assert_eq!(aliases.original_table("managers"), "employees");
    }

    #[test]
    fn test_schema_qualified_original() {
        let aliases = AliasMap::parse(["hr.employees as boss"]).unwrap();
        let attr = Attribute::parse("boss.name").unwrap();
        assert_eq!(aliases.original_of(&attr).to_string(), "hr.employees.name");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            AliasMap::parse(["employees managers"]),
            Err(VgraphError::InvalidAlias(_))
        ));
    }

    #[test]
    fn test_merge() {
        let a = AliasMap::parse(["t AS x"]).unwrap();
        let b = AliasMap::parse(["u AS y"]).unwrap();
        let merged = a.merge(&b);
        assert_eq!(merged.iter().count(), 2);
        assert_eq!(merged.original_table("y"), "u");
    }
}
