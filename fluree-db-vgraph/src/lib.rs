//! Relational-to-RDF virtual graph core
//!
//! Maps a relational database to a virtual graph of triples without
//! materializing it. This crate covers the two parts that decide what a
//! query can touch:
//!
//! - the [`MappingCompiler`], which turns D2RQ mapping statements into
//!   validated [`PropertyBridge`]s, and
//! - the [`UriMakerRule`] optimizer, which rules out bridges that cannot
//!   produce a term bound in a query before any SQL is generated.
//!
//! SQL generation, connections and result streaming live outside this crate;
//! it consumes rows only through [`values::ColumnIndexer`].
//!
//! # Usage
//!
//! Build a [`fluree_graph_ir::Graph`] of mapping statements, compile it with
//! [`MappingCompiler::compile_collecting()`], then ask the resulting
//! [`CompiledMapping`] for `candidates()` of a bound subject or object.

pub mod algebra;
pub mod bridge;
pub mod compiler;
pub mod config;
pub mod database;
pub mod diagnostics;
pub mod error;
pub mod nodes;
pub mod odometer;
pub mod optimizer;
pub mod values;
pub mod vocab;

pub use algebra::{AliasMap, Attribute, Join, Relation};
pub use bridge::{Position, PropertyBridge, UriMatchPolicy};
pub use compiler::{CompiledMapping, MappingCompiler, NodeMakerSpec};
pub use config::CompilerConfig;
pub use database::{ColumnType, ConnectionDescriptor, Database};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, Severity};
pub use error::{VgraphError, VgraphResult};
pub use nodes::{NodeKind, NodeMaker, SlotKind};
pub use odometer::Odometer;
pub use optimizer::{RuleChecker, UriMakerRule};
pub use values::{ValueConstraint, ValueSource};
pub use vocab::D2RQ;
