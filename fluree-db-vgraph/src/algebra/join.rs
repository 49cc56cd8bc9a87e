//! Equi-join conditions between two columns

use serde::{Deserialize, Serialize};

use super::Attribute;
use crate::error::{VgraphError, VgraphResult};

/// `left = right`, normalized so that `left <= right`
///
/// Normalization makes `a.x = b.y` and `b.y = a.x` the same join, which keeps
/// join sets of independently compiled bridges comparable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Join {
    pub left: Attribute,
    pub right: Attribute,
}

impl Join {
    pub fn new(a: Attribute, b: Attribute) -> Self {
        if a <= b {
            Self { left: a, right: b }
        } else {
            Self { left: b, right: a }
        }
    }

    /// Parse `table1.col1 = table2.col2`
    pub fn parse(expression: &str) -> VgraphResult<Self> {
        let (lhs, rhs) = expression
            .split_once('=')
            .ok_or_else(|| VgraphError::InvalidJoin(expression.to_string()))?;
        if rhs.contains('=') {
            return Err(VgraphError::InvalidJoin(expression.to_string()));
        }
        let left = Attribute::parse(lhs).map_err(|_| VgraphError::InvalidJoin(expression.to_string()))?;
        let right =
            Attribute::parse(rhs).map_err(|_| VgraphError::InvalidJoin(expression.to_string()))?;
        Ok(Self::new(left, right))
    }

    /// Both tables this join connects
    pub fn tables(&self) -> [String; 2] {
        [self.left.qualified_table(), self.right.qualified_table()]
    }

    /// The column on the other side of the join, if `attr` is one side
    pub fn other_side(&self, attr: &Attribute) -> Option<&Attribute> {
        if *attr == self.left {
            Some(&self.right)
        } else if *attr == self.right {
            Some(&self.left)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Join {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_normalize() {
        let a = Join::parse("papers.author = persons.id").unwrap();
        let b = Join::parse("persons.id=papers.author").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.left.to_string(), "papers.author");
        assert_eq!(a.to_string(), "papers.author = persons.id");
    }

    #[test]
    fn test_other_side() {
        let join = Join::parse("a.x = b.y").unwrap();
        let x = Attribute::parse("a.x").unwrap();
        assert_eq!(join.other_side(&x).map(|a| a.to_string()), Some("b.y".to_string()));
        assert!(join.other_side(&Attribute::parse("c.z").unwrap()).is_none());
        assert_eq!(join.tables(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(Join::parse("a.x"), Err(VgraphError::InvalidJoin(_))));
        assert!(matches!(Join::parse("a.x = y"), Err(VgraphError::InvalidJoin(_))));
        assert!(matches!(Join::parse("a.x = b.y = c.z"), Err(VgraphError::InvalidJoin(_))));
    }
}
