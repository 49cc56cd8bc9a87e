//! D2RQ mapping vocabulary constants
//!
//! IRIs of the classes and properties a mapping document uses to describe
//! databases, class maps, property bridges and translation tables.
//!
//! # Usage
//!
//! ```
//! use fluree_db_vgraph::D2RQ;
//!
//! let iri = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#ClassMap";
//! assert_eq!(iri, D2RQ::CLASS_MAP);
//! ```

/// D2RQ vocabulary namespace and constants
pub struct D2RQ;

impl D2RQ {
    // ==========================================================================
    // Namespace
    // ==========================================================================

    /// D2RQ namespace IRI
    pub const NS: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#";

    // ==========================================================================
    // Classes
    // ==========================================================================

    /// d2rq:Database - A relational database and its column type registry
    pub const DATABASE: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#Database";

    /// d2rq:ClassMap - Maps rows of a relation to resources
    pub const CLASS_MAP: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#ClassMap";

    /// d2rq:ObjectPropertyBridge - Bridge whose objects are resources
    pub const OBJECT_PROPERTY_BRIDGE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#ObjectPropertyBridge";

    /// d2rq:DatatypePropertyBridge - Bridge whose objects are literals
    pub const DATATYPE_PROPERTY_BRIDGE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#DatatypePropertyBridge";

    /// d2rq:TranslationTable - Value translation table
    pub const TRANSLATION_TABLE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#TranslationTable";

    /// d2rq:ProcessingInstructions - Free-form engine settings
    pub const PROCESSING_INSTRUCTIONS: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#ProcessingInstructions";

    // ==========================================================================
    // Properties - Database
    // ==========================================================================

    /// d2rq:odbcDSN
    pub const ODBC_DSN: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#odbcDSN";

    /// d2rq:jdbcDSN
    pub const JDBC_DSN: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#jdbcDSN";

    /// d2rq:jdbcDriver
    pub const JDBC_DRIVER: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#jdbcDriver";

    /// d2rq:username
    pub const USERNAME: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#username";

    /// d2rq:password
    pub const PASSWORD: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#password";

    /// d2rq:allowDistinct - "true" or "false"
    pub const ALLOW_DISTINCT: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#allowDistinct";

    /// d2rq:expressionTranslator - Name of the SQL expression translation mode
    pub const EXPRESSION_TRANSLATOR: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#expressionTranslator";

    /// d2rq:textColumn - Declares a text-typed column
    pub const TEXT_COLUMN: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#textColumn";

    /// d2rq:numericColumn - Declares a numeric column
    pub const NUMERIC_COLUMN: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#numericColumn";

    /// d2rq:dateColumn - Declares a date column
    pub const DATE_COLUMN: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#dateColumn";

    // ==========================================================================
    // Properties - Class maps and bridges
    // ==========================================================================

    /// d2rq:dataStorage - Links a class map to its database
    pub const DATA_STORAGE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#dataStorage";

    /// d2rq:class - Links a class map to an RDFS class
    pub const CLASS: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#class";

    /// d2rq:classMap - Links an RDFS class to a class map
    pub const CLASS_MAP_PROPERTY: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#classMap";

    /// d2rq:belongsToClassMap - Links a property bridge to its class map
    pub const BELONGS_TO_CLASS_MAP: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#belongsToClassMap";

    /// d2rq:property - The predicate a bridge produces
    pub const PROPERTY: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#property";

    /// d2rq:propertyBridge - Links a predicate to a bridge (inverse of d2rq:property)
    pub const PROPERTY_BRIDGE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#propertyBridge";

    /// d2rq:refersToClassMap - Object resources come from another class map
    pub const REFERS_TO_CLASS_MAP: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#refersToClassMap";

    /// d2rq:additionalProperty - Constant property attached to every instance
    pub const ADDITIONAL_PROPERTY: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#additionalProperty";

    /// d2rq:propertyName - Predicate of an additional property
    pub const PROPERTY_NAME: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#propertyName";

    /// d2rq:propertyValue - Object of an additional property
    pub const PROPERTY_VALUE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#propertyValue";

    // ==========================================================================
    // Properties - Node identification
    // ==========================================================================

    /// d2rq:uriColumn - Column holding complete URIs
    pub const URI_COLUMN: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#uriColumn";

    /// d2rq:uriPattern - URI template with `@@table.column@@` placeholders
    pub const URI_PATTERN: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#uriPattern";

    /// d2rq:bNodeIdColumns - Comma separated columns identifying a blank node
    pub const BNODE_ID_COLUMNS: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#bNodeIdColumns";

    /// d2rq:column - Column holding object values
    pub const COLUMN: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#column";

    /// d2rq:pattern - Template for object values
    pub const PATTERN: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#pattern";

    /// d2rq:datatype - Datatype of generated literals
    pub const DATATYPE: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#datatype";

    /// d2rq:lang - Language tag of generated literals
    pub const LANG: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#lang";

    // ==========================================================================
    // Properties - Relation context
    // ==========================================================================

    /// d2rq:join - Join condition `a.x = b.y`
    pub const JOIN: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#join";

    /// d2rq:condition - SQL WHERE fragment
    pub const CONDITION: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#condition";

    /// d2rq:alias - Table alias `table AS alias`
    pub const ALIAS: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#alias";

    /// d2rq:containsDuplicates - "true" or "false"
    pub const CONTAINS_DUPLICATES: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#containsDuplicates";

    // ==========================================================================
    // Properties - Value hints
    // ==========================================================================

    /// d2rq:valueMaxLength - Upper bound on value length
    pub const VALUE_MAX_LENGTH: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#valueMaxLength";

    /// d2rq:valueContains - Substring every value contains
    pub const VALUE_CONTAINS: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#valueContains";

    /// d2rq:valueRegex - Regular expression every value matches
    pub const VALUE_REGEX: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#valueRegex";

    // ==========================================================================
    // Properties - Translation tables
    // ==========================================================================

    /// d2rq:translateWith - Links a node spec to a translation table
    pub const TRANSLATE_WITH: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#translateWith";

    /// d2rq:translation - One entry of a translation table
    pub const TRANSLATION: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#translation";

    /// d2rq:databaseValue
    pub const DATABASE_VALUE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#databaseValue";

    /// d2rq:rdfValue
    pub const RDF_VALUE: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#rdfValue";

    /// d2rq:href - External resource holding translation pairs
    pub const HREF: &'static str = "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#href";

    /// d2rq:javaClass - Name of a registered custom translator
    pub const JAVA_CLASS: &'static str =
        "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#javaClass";

    // ==========================================================================
    // Other namespaces used in mapping processing
    // (Re-exported from fluree-vocab for convenience)
    // ==========================================================================

    /// RDF namespace - rdf:type
    pub const RDF_TYPE: &'static str = fluree_vocab::rdf::TYPE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace() {
        assert!(D2RQ::CLASS_MAP.starts_with(D2RQ::NS));
        assert!(D2RQ::URI_PATTERN.starts_with(D2RQ::NS));
        assert!(D2RQ::JAVA_CLASS.starts_with(D2RQ::NS));
    }

    #[test]
    fn test_column_type_markers() {
        assert_eq!(
            D2RQ::TEXT_COLUMN,
            "http://www.wiwiss.fu-berlin.de/suhl/bizer/D2RQ/0.1#textColumn"
        );
        assert_ne!(D2RQ::NUMERIC_COLUMN, D2RQ::DATE_COLUMN);
    }
}
