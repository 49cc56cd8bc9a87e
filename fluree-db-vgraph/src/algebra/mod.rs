//! Relational building blocks of a bridge
//!
//! Column references, joins, table aliases and the relation that ties a
//! bridge to its (possibly joined) view of the database.

mod alias;
mod attribute;
mod join;
mod relation;

pub use alias::AliasMap;
pub use attribute::Attribute;
pub use join::Join;
pub use relation::Relation;
