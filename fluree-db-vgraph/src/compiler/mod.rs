//! Mapping compiler
//!
//! Turns a graph of D2RQ mapping statements into validated
//! [`PropertyBridge`]s. Compilation runs in fixed phases, each reading only
//! what earlier phases produced:
//!
//! 1. processing instructions
//! 2. databases
//! 3. class maps
//! 4. property bridges
//! 5. additional properties
//! 6. class map type bridges
//! 7. column type check
//!
//! Problems are reported to a [`DiagnosticSink`] and only drop the affected
//! statement; compilation itself never fails.

mod bridges;
mod compiled;
mod reader;
mod spec;

pub use compiled::CompiledMapping;
pub use spec::NodeMakerSpec;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use fluree_graph_ir::{Term, TripleSource};
use tracing::{debug, info};

use crate::algebra::{AliasMap, Attribute, Join};
use crate::bridge::PropertyBridge;
use crate::config::CompilerConfig;
use crate::database::{ConnectionDescriptor, Database, COLUMN_TYPE_MARKERS};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics};
use crate::error::{VgraphError, VgraphResult};
use crate::values::{
    CsvTranslationLoader, Pattern, TranslationLoader, TranslationTable, TranslatorRegistry,
};
use crate::vocab::D2RQ;
use reader::qname;

/// Identifier used for a mapping node in compiled output and diagnostics
///
/// The IRI itself for IRIs, `_:label` for blank nodes.
pub(crate) fn node_id(term: &Term) -> String {
    match term {
        Term::Iri(iri) => iri.to_string(),
        other => other.to_string(),
    }
}

/// Compiles mapping graphs into property bridges
pub struct MappingCompiler {
    config: CompilerConfig,
    loader: Box<dyn TranslationLoader>,
    translators: TranslatorRegistry,
}

impl Default for MappingCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl MappingCompiler {
    /// Compiler reading `d2rq:href` tables as CSV relative to the configured root
    pub fn new(config: CompilerConfig) -> Self {
        let loader = CsvTranslationLoader::new(config.translation_table_root.clone());
        Self {
            config,
            loader: Box::new(loader),
            translators: TranslatorRegistry::new(),
        }
    }

    pub fn with_loader(mut self, loader: impl TranslationLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Translators available to `d2rq:javaClass`
    pub fn with_translators(mut self, translators: TranslatorRegistry) -> Self {
        self.translators = translators;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compile, reporting every problem to `sink`
    pub fn compile(
        &self,
        graph: &dyn TripleSource,
        sink: &mut dyn DiagnosticSink,
    ) -> CompiledMapping {
        let mut run = CompileRun {
            graph,
            config: &self.config,
            loader: self.loader.as_ref(),
            translators: &self.translators,
            sink,
            reported: 0,
            processing_instructions: BTreeMap::new(),
            databases: BTreeMap::new(),
            class_maps: BTreeMap::new(),
            translation_tables: HashMap::new(),
            bridges: Vec::new(),
        };
        run.parse_processing_instructions();
        run.parse_databases();
        run.parse_class_maps();
        run.parse_property_bridges();
        run.parse_additional_properties();
        run.parse_class_map_types();
        run.check_column_types();
        run.finish()
    }

    /// Compile into a fresh [`Diagnostics`] collector
    pub fn compile_collecting(&self, graph: &dyn TripleSource) -> (CompiledMapping, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let compiled = self.compile(graph, &mut diagnostics);
        (compiled, diagnostics)
    }
}

/// State of one compilation; lives only for the duration of `compile`
pub(crate) struct CompileRun<'a> {
    graph: &'a dyn TripleSource,
    config: &'a CompilerConfig,
    loader: &'a dyn TranslationLoader,
    translators: &'a TranslatorRegistry,
    sink: &'a mut dyn DiagnosticSink,
    reported: usize,
    processing_instructions: BTreeMap<String, String>,
    databases: BTreeMap<Term, Arc<Database>>,
    class_maps: BTreeMap<Term, NodeMakerSpec>,
    translation_tables: HashMap<Term, Arc<TranslationTable>>,
    bridges: Vec<PropertyBridge>,
}

impl CompileRun<'_> {
    fn parse_processing_instructions(&mut self) {
        for node in self.instances_of(D2RQ::PROCESSING_INSTRUCTIONS) {
            let properties = self.literal_properties(&node);
            self.processing_instructions.extend(properties);
        }
        debug!(
            count = self.processing_instructions.len(),
            "Parsed processing instructions"
        );
    }

    fn parse_databases(&mut self) {
        let nodes = self.instances_of(D2RQ::DATABASE);
        if nodes.is_empty() {
            self.report(Diagnostic::error(
                "No d2rq:Database defined in the mapping",
                "mapping",
            ));
        }
        for node in nodes {
            let database = self.build_database(&node);
            self.databases.insert(node, Arc::new(database));
        }
        debug!(count = self.databases.len(), "Parsed databases");
    }

    fn build_database(&mut self, node: &Term) -> Database {
        let connection = ConnectionDescriptor {
            odbc_dsn: self.zero_or_one_literal(node, D2RQ::ODBC_DSN),
            jdbc_dsn: self.zero_or_one_literal(node, D2RQ::JDBC_DSN),
            jdbc_driver: self.zero_or_one_literal(node, D2RQ::JDBC_DRIVER),
            username: self.zero_or_one_literal(node, D2RQ::USERNAME),
            password: self.zero_or_one_literal(node, D2RQ::PASSWORD),
        };
        if connection.jdbc_dsn.is_some() != connection.jdbc_driver.is_some() {
            self.error("d2rq:jdbcDSN and d2rq:jdbcDriver must be used together", node);
        }

        let mut database = Database::new(node_id(node), connection)
            .with_allow_distinct(self.config.default_allow_distinct);

        match self.zero_or_one_literal(node, D2RQ::ALLOW_DISTINCT).as_deref() {
            Some("true") => database = database.with_allow_distinct(true),
            Some("false") => database = database.with_allow_distinct(false),
            Some(other) => self.error(
                format!("d2rq:allowDistinct value must be true or false, found \"{}\"", other),
                node,
            ),
            None => {}
        }
        if let Some(translator) = self.zero_or_one_literal(node, D2RQ::EXPRESSION_TRANSLATOR) {
            database = database.with_expression_translator(translator);
        }

        for (marker, column_type) in COLUMN_TYPE_MARKERS {
            for value in self.objects(node, marker) {
                let Some(name) = value.as_literal() else {
                    self.warn(
                        format!("Ignoring non-literal {} on {}", qname(marker), node),
                        node,
                    );
                    continue;
                };
                match Attribute::parse(name) {
                    Ok(column) => database = database.with_column_type(column, column_type),
                    Err(e) => self.error(e.to_string(), node),
                }
            }
        }
        database
    }

    fn parse_class_maps(&mut self) {
        for node in self.instances_of(D2RQ::CLASS_MAP) {
            let Some(storage) = self.one_node(&node, D2RQ::DATA_STORAGE) else {
                continue;
            };
            let Some(database) = self.databases.get(&storage).cloned() else {
                self.fatal(
                    format!("Unknown d2rq:dataStorage for d2rq:ClassMap {}", node),
                    &node,
                );
                continue;
            };
            let spec = self.build_resource_spec(&node, Some(database), true);
            if let Err(e) = spec.build() {
                self.error(e.to_string(), &node);
                continue;
            }
            self.class_maps.insert(node, spec);
        }
        debug!(count = self.class_maps.len(), "Parsed class maps");
    }

    /// Spec from the properties shared by class maps and property bridges
    fn build_resource_spec(
        &mut self,
        node: &Term,
        database: Option<Arc<Database>>,
        default_unique: bool,
    ) -> NodeMakerSpec {
        let mut spec = NodeMakerSpec::new(node_id(node));
        spec.set_database(database);

        if let Some(columns) = self.zero_or_one_literal(node, D2RQ::BNODE_ID_COLUMNS) {
            let parsed: Result<Vec<Attribute>, _> = columns
                .split(',')
                .map(|c| Attribute::parse(c.trim()))
                .collect();
            match parsed {
                Ok(columns) => {
                    let result = spec.set_blank_columns(columns);
                    self.warn_on_conflict(result, node);
                }
                Err(e) => self.error(e.to_string(), node),
            }
        }
        if let Some(column) = self.zero_or_one_literal(node, D2RQ::URI_COLUMN) {
            match Attribute::parse(&column) {
                Ok(column) => {
                    let result = spec.set_uri_column(column);
                    self.warn_on_conflict(result, node);
                }
                Err(e) => self.error(e.to_string(), node),
            }
        }
        if let Some(pattern) = self.zero_or_one_literal(node, D2RQ::URI_PATTERN) {
            match Pattern::parse(&self.config.absolutize(&pattern)) {
                Ok(pattern) => {
                    let result = spec.set_uri_pattern(pattern);
                    self.warn_on_conflict(result, node);
                }
                Err(e) => self.error(e.to_string(), node),
            }
        }

        if let Some(regex) = self.zero_or_one_literal(node, D2RQ::VALUE_REGEX) {
            if let Err(e) = spec.set_regex(&regex) {
                self.warn(format!("Ignoring d2rq:valueRegex on {}: {}", node, e), node);
            }
        }
        if let Some(contains) = self.zero_or_one_literal(node, D2RQ::VALUE_CONTAINS) {
            spec.set_contains(contains);
        }
        if let Some(max_length) = self.zero_or_one_literal(node, D2RQ::VALUE_MAX_LENGTH) {
            match max_length.trim().parse::<usize>() {
                Ok(max_length) => spec.set_max_length(max_length),
                Err(_) => self.warn(
                    format!(
                        "Ignoring d2rq:valueMaxLength \"{}\" on {} (must be an integer)",
                        max_length, node
                    ),
                    node,
                ),
            }
        }

        if let Some(table_node) = self.zero_or_one_node(node, D2RQ::TRANSLATE_WITH) {
            if table_node.is_literal() {
                self.error(format!("Unknown d2rq:translateWith in {}", node), node);
            } else {
                let table = self.translation_table(&table_node);
                spec.set_translation_table(table);
            }
        }

        let joins: Vec<Join> = self
            .literals(node, D2RQ::JOIN)
            .into_iter()
            .filter_map(|expr| match Join::parse(&expr) {
                Ok(join) => Some(join),
                Err(e) => {
                    self.error(e.to_string(), node);
                    None
                }
            })
            .collect();
        spec.add_joins(joins);
        let conditions = self.literals(node, D2RQ::CONDITION);
        spec.add_conditions(conditions);
        let aliases = self.literals(node, D2RQ::ALIAS);
        match AliasMap::parse(aliases.iter().map(String::as_str)) {
            Ok(aliases) => spec.set_aliases(aliases),
            Err(e) => self.error(e.to_string(), node),
        }

        let unique = match self.zero_or_one_literal(node, D2RQ::CONTAINS_DUPLICATES).as_deref() {
            Some("true") => false,
            Some("false") => true,
            Some(other) => {
                self.error(
                    format!(
                        "Illegal value '{}' for d2rq:containsDuplicates on {}",
                        other, node
                    ),
                    node,
                );
                default_unique
            }
            None => default_unique,
        };
        spec.set_unique(unique);
        spec
    }

    fn warn_on_conflict(&mut self, result: VgraphResult<()>, node: &Term) {
        if let Err(e) = result {
            self.warn(e.to_string(), node);
        }
    }

    /// Table declared at `node`, built on first reference and cached
    fn translation_table(&mut self, node: &Term) -> Arc<TranslationTable> {
        if let Some(table) = self.translation_tables.get(node) {
            return Arc::clone(table);
        }

        let mut table = TranslationTable::new(node_id(node));
        let href = self.zero_or_one_literal_or_uri(node, D2RQ::HREF);
        if let Some(href) = &href {
            match self.loader.load(href) {
                Ok(pairs) => table.add_all(pairs),
                Err(e) => self.error(e.to_string(), node),
            }
        }
        let class_name = self.zero_or_one_literal(node, D2RQ::JAVA_CLASS);
        if let Some(name) = &class_name {
            match self.translators.get(name) {
                Some(translator) => table.set_translator(translator),
                None => self.error(
                    VgraphError::UnknownTranslator(name.clone()).to_string(),
                    node,
                ),
            }
        }
        let translations = self.objects(node, D2RQ::TRANSLATION);
        if href.is_none() && class_name.is_none() && translations.is_empty() {
            self.warn(format!("TranslationTable {} contains no translations", node), node);
        }
        if class_name.is_some() && (href.is_some() || !translations.is_empty()) {
            self.warn(
                format!(
                    "Can't combine d2rq:javaClass with d2rq:translation or d2rq:href on {}",
                    node
                ),
                node,
            );
        }
        for translation in translations {
            let db_value = self.one_literal(&translation, D2RQ::DATABASE_VALUE);
            let rdf_value = self.one_literal_or_uri(&translation, D2RQ::RDF_VALUE);
            if let (Some(db_value), Some(rdf_value)) = (db_value, rdf_value) {
                table.add_translation(db_value, rdf_value);
            }
        }

        debug!(table = %node, translations = table.len(), "Built translation table");
        let table = Arc::new(table);
        self.translation_tables
            .insert(node.clone(), Arc::clone(&table));
        table
    }

    fn finish(self) -> CompiledMapping {
        let class_maps = self
            .class_maps
            .iter()
            .filter_map(|(node, spec)| Some((node_id(node), spec.build().ok()?)))
            .collect();
        let databases = self
            .databases
            .into_values()
            .map(|db| (db.id.clone(), db))
            .collect();
        let compiled = CompiledMapping::new(
            self.bridges,
            class_maps,
            databases,
            self.processing_instructions,
        );
        info!(
            bridges = compiled.len(),
            class_maps = compiled.class_map_ids().count(),
            databases = compiled.databases().count(),
            diagnostics = self.reported,
            "Compiled mapping"
        );
        compiled
    }
}
