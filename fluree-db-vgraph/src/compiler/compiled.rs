//! Compiled mapping with indexes
//!
//! Holds the bridges produced by the compiler along with the lookups the
//! query layer needs: bridges by class map, each class map's subject node
//! maker, and bridges by predicate.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use fluree_graph_ir::Term;

use crate::bridge::{Position, PropertyBridge};
use crate::database::Database;
use crate::nodes::NodeMaker;
use crate::optimizer::UriMakerRule;

/// Immutable result of compiling a mapping
///
/// Bridges keep compilation order, so compiling the same statements twice
/// yields the same sequence.
#[derive(Debug, Clone, Default)]
pub struct CompiledMapping {
    bridges: Vec<PropertyBridge>,

    /// Index: class map id → positions in `bridges`
    class_map_to_bridges: BTreeMap<String, Vec<usize>>,

    /// Index: class map id → subject node maker
    subject_makers: BTreeMap<String, NodeMaker>,

    /// Index: fixed predicate IRI → positions in `bridges`
    predicate_to_bridges: HashMap<String, Vec<usize>>,

    databases: BTreeMap<String, Arc<Database>>,

    processing_instructions: BTreeMap<String, String>,
}

impl CompiledMapping {
    pub fn new(
        bridges: Vec<PropertyBridge>,
        subject_makers: BTreeMap<String, NodeMaker>,
        databases: BTreeMap<String, Arc<Database>>,
        processing_instructions: BTreeMap<String, String>,
    ) -> Self {
        let mut class_map_to_bridges: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut predicate_to_bridges: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, bridge) in bridges.iter().enumerate() {
            class_map_to_bridges
                .entry(bridge.class_map.clone())
                .or_default()
                .push(idx);

            if let Some(predicate) = bridge.predicate.fixed_term().and_then(Term::as_iri) {
                predicate_to_bridges
                    .entry(predicate.to_string())
                    .or_default()
                    .push(idx);
            }
        }

        Self {
            bridges,
            class_map_to_bridges,
            subject_makers,
            predicate_to_bridges,
            databases,
            processing_instructions,
        }
    }

    pub fn bridges(&self) -> &[PropertyBridge] {
        &self.bridges
    }

    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    /// Ids of every compiled class map, including those without bridges
    pub fn class_map_ids(&self) -> impl Iterator<Item = &str> {
        self.subject_makers.keys().map(String::as_str)
    }

    pub fn bridges_for_class_map(&self, class_map: &str) -> Vec<&PropertyBridge> {
        self.class_map_to_bridges
            .get(class_map)
            .map(|positions| positions.iter().map(|&i| &self.bridges[i]).collect())
            .unwrap_or_default()
    }

    /// The node maker producing the subjects of a class map
    pub fn subject_maker(&self, class_map: &str) -> Option<&NodeMaker> {
        self.subject_makers.get(class_map)
    }

    /// Bridges whose predicate is the fixed IRI `predicate`
    pub fn find_bridges_for_predicate(&self, predicate: &str) -> Vec<&PropertyBridge> {
        self.predicate_to_bridges
            .get(predicate)
            .map(|positions| positions.iter().map(|&i| &self.bridges[i]).collect())
            .unwrap_or_default()
    }

    pub fn databases(&self) -> impl Iterator<Item = &Arc<Database>> {
        self.databases.values()
    }

    pub fn database(&self, id: &str) -> Option<&Arc<Database>> {
        self.databases.get(id)
    }

    pub fn processing_instructions(&self) -> &BTreeMap<String, String> {
        &self.processing_instructions
    }

    pub fn processing_instruction(&self, key: &str) -> Option<&str> {
        self.processing_instructions.get(key).map(String::as_str)
    }

    /// Bridges that could produce `term` at `position`, most specific first
    pub fn candidates(&self, position: Position, term: &Term) -> Vec<&PropertyBridge> {
        UriMakerRule.candidates(&self.bridges, position, term)
    }
}
