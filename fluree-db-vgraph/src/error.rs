//! Virtual graph error types

use thiserror::Error;

/// Errors raised while compiling or evaluating a virtual graph mapping
///
/// Ordinary "value does not match" outcomes are not errors; value sources
/// report them as `None` / `false`.
#[derive(Debug, Error)]
pub enum VgraphError {
    /// Odometer constructed with no digits or a zero-width digit
    #[error("Invalid odometer configuration: {0}")]
    InvalidOdometer(String),

    /// Column reference not of the form `table.column` or `schema.table.column`
    #[error("Invalid column reference: {0}")]
    InvalidColumn(String),

    /// Join expression not of the form `a.x = b.y`
    #[error("Invalid join: {0}")]
    InvalidJoin(String),

    /// Alias declaration not of the form `table AS alias`
    #[error("Invalid alias: {0}")]
    InvalidAlias(String),

    /// Malformed value pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// A `d2rq:valueRegex` hint that does not compile
    #[error("Invalid regex hint {pattern}: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Reference to a node that is not a compiled class map
    #[error("{node} is no d2rq:ClassMap")]
    UnknownClassMap { node: String },

    /// Reference to a node that is not a compiled database
    #[error("Unknown d2rq:dataStorage {node}")]
    UnknownDatabase { node: String },

    /// Two node makers of one bridge live in different databases
    #[error("d2rq:dataStorages for {node} don't match")]
    DatabaseMismatch { node: String },

    /// More than one way of building values declared for one node
    #[error("Conflicting {property} on {node}: already identified by {existing}")]
    ConflictingIdentifier {
        property: String,
        node: String,
        existing: String,
    },

    /// A node maker spec ended up without any way to build values
    #[error("No column, pattern or fixed value for {0}")]
    MissingIdentifier(String),

    /// Column used by a bridge but not typed in its database
    #[error("Column {column} has no declared type in database {database}")]
    UndeclaredColumnType { column: String, database: String },

    /// `d2rq:javaClass` naming a translator that was never registered
    #[error("Unknown translator: {0}")]
    UnknownTranslator(String),

    /// Failure reading a translation table resource
    #[error("Cannot load translation table from {href}: {message}")]
    TranslationLoad { href: String, message: String },

    /// Configuration parse error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for virtual graph operations
pub type VgraphResult<T> = Result<T, VgraphError>;
