//! Bridge construction phases

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use fluree_graph_ir::Term;
use tracing::debug;

use super::{node_id, CompileRun, NodeMakerSpec};
use crate::algebra::Attribute;
use crate::bridge::{PropertyBridge, UriMatchPolicy};
use crate::database::Database;
use crate::diagnostics::Diagnostic;
use crate::error::{VgraphError, VgraphResult};
use crate::values::Pattern;
use crate::vocab::D2RQ;

impl CompileRun<'_> {
    pub(super) fn parse_property_bridges(&mut self) {
        let before = self.bridges.len();
        let mut seen = HashSet::new();
        for (bridge_node, class_map_node) in self.pairs(D2RQ::BELONGS_TO_CLASS_MAP) {
            if seen.insert(bridge_node.clone()) {
                self.parse_property_bridge(&bridge_node, &class_map_node);
            }
        }
        debug!(
            count = self.bridges.len() - before,
            "Parsed property bridges"
        );
    }

    fn parse_property_bridge(&mut self, bridge_node: &Term, class_map_node: &Term) {
        let Some(subject_spec) = self.class_maps.get(class_map_node).cloned() else {
            self.fatal(
                format!(
                    "d2rq:belongsToClassMap for {} is no d2rq:ClassMap",
                    bridge_node
                ),
                bridge_node,
            );
            return;
        };
        if self.objects(bridge_node, D2RQ::BELONGS_TO_CLASS_MAP).len() > 1 {
            self.error(
                format!("Multiple d2rq:belongsToClassMap in {}", bridge_node),
                bridge_node,
            );
            return;
        }
        let properties = self.properties_for_bridge(bridge_node);
        if properties.is_empty() {
            self.error(
                format!("Missing d2rq:property for PropertyBridge {}", bridge_node),
                bridge_node,
            );
            return;
        }
        let object_spec = match self.build_object_spec(bridge_node, subject_spec.database()) {
            Ok(spec) => spec,
            Err(e) => {
                self.fatal(e.to_string(), bridge_node);
                return;
            }
        };
        for property in properties {
            self.create_property_bridge(
                class_map_node,
                &node_id(bridge_node),
                &subject_spec,
                &NodeMakerSpec::fixed(property),
                &object_spec,
            );
        }
    }

    /// Properties from `d2rq:property` and inverse `d2rq:propertyBridge`
    fn properties_for_bridge(&self, bridge_node: &Term) -> BTreeSet<Term> {
        let mut properties: BTreeSet<Term> = self
            .graph
            .subjects(&Term::iri(D2RQ::PROPERTY_BRIDGE), bridge_node)
            .into_iter()
            .cloned()
            .collect();
        properties.extend(self.objects(bridge_node, D2RQ::PROPERTY));
        properties
    }

    fn build_object_spec(
        &mut self,
        node: &Term,
        database: Option<&Arc<Database>>,
    ) -> VgraphResult<NodeMakerSpec> {
        let mut spec = self.build_resource_spec(node, database.cloned(), false);
        let is_object_bridge = self.has_type(node, D2RQ::OBJECT_PROPERTY_BRIDGE);

        if let Some(refers_to) = self.zero_or_one_node(node, D2RQ::REFERS_TO_CLASS_MAP) {
            let Some(other) = self.class_maps.get(&refers_to) else {
                return Err(VgraphError::UnknownClassMap {
                    node: format!("d2rq:refersToClassMap {} of {}", refers_to, node),
                });
            };
            if let (Some(ours), Some(theirs)) = (database, other.database()) {
                if ours != theirs {
                    return Err(VgraphError::DatabaseMismatch {
                        node: node.to_string(),
                    });
                }
            }
            let result = spec.wrap_existing(other);
            self.warn_on_conflict(result, node);
        }

        if let Some(column) = self.zero_or_one_literal(node, D2RQ::COLUMN) {
            match Attribute::parse(&column) {
                Ok(column) => {
                    let result = if is_object_bridge {
                        spec.set_uri_column(column)
                    } else {
                        spec.set_literal_column(column)
                    };
                    self.warn_on_conflict(result, node);
                }
                Err(e) => self.error(e.to_string(), node),
            }
        }
        if let Some(pattern) = self.zero_or_one_literal(node, D2RQ::PATTERN) {
            let pattern = if is_object_bridge {
                self.config.absolutize(&pattern)
            } else {
                pattern
            };
            match Pattern::parse(&pattern) {
                Ok(pattern) => {
                    let result = if is_object_bridge {
                        spec.set_uri_pattern(pattern)
                    } else {
                        spec.set_literal_pattern(pattern)
                    };
                    self.warn_on_conflict(result, node);
                }
                Err(e) => self.error(e.to_string(), node),
            }
        }

        let datatype = self.zero_or_one_literal_or_uri(node, D2RQ::DATATYPE);
        let lang = self.zero_or_one_literal(node, D2RQ::LANG);
        if datatype.is_some() && lang.is_some() {
            self.warn(
                format!("Ignoring d2rq:lang on {}: d2rq:datatype is set", node),
                node,
            );
        }
        if (datatype.is_some() || lang.is_some()) && !spec.is_literal_spec() {
            self.warn(
                format!(
                    "Ignoring d2rq:datatype/d2rq:lang on {}: values are not literals",
                    node
                ),
                node,
            );
        }
        if let Some(datatype) = datatype {
            spec.set_datatype(datatype);
        }
        if let Some(lang) = lang {
            spec.set_lang(lang);
        }
        Ok(spec)
    }

    /// Build and register one bridge; failures drop only this bridge
    fn create_property_bridge(
        &mut self,
        class_map_node: &Term,
        bridge_id: &str,
        subject_spec: &NodeMakerSpec,
        predicate_spec: &NodeMakerSpec,
        object_spec: &NodeMakerSpec,
    ) {
        let built = subject_spec.build().and_then(|subject| {
            Ok((subject, predicate_spec.build()?, object_spec.build()?))
        });
        let (subject, predicate, object) = match built {
            Ok(makers) => makers,
            Err(e) => {
                self.report(Diagnostic::error(e.to_string(), bridge_id));
                return;
            }
        };
        let Some(database) = subject_spec.database().cloned() else {
            self.report(Diagnostic::fatal(
                VgraphError::UnknownDatabase {
                    node: node_id(class_map_node),
                }
                .to_string(),
                bridge_id,
            ));
            return;
        };
        let relation = subject_spec
            .relation()
            .merge(&predicate_spec.relation())
            .merge(&object_spec.relation());

        self.bridges.push(PropertyBridge {
            id: bridge_id.to_string(),
            class_map: node_id(class_map_node),
            policy: UriMatchPolicy::from_makers(&subject, &object),
            subject,
            predicate,
            object,
            database,
            relation,
        });
    }

    pub(super) fn parse_additional_properties(&mut self) {
        let before = self.bridges.len();
        for (class_map_node, property_node) in self.pairs(D2RQ::ADDITIONAL_PROPERTY) {
            let Some(subject_spec) = self.class_maps.get(&class_map_node).cloned() else {
                self.warn(
                    format!(
                        "Ignoring d2rq:additionalProperty on {} as they are allowed only on d2rq:ClassMaps",
                        class_map_node
                    ),
                    &class_map_node,
                );
                continue;
            };
            let name = self.one_node(&property_node, D2RQ::PROPERTY_NAME);
            let value = self.one_node(&property_node, D2RQ::PROPERTY_VALUE);
            let (Some(name), Some(value)) = (name, value) else {
                continue;
            };
            self.create_property_bridge(
                &class_map_node,
                &node_id(&property_node),
                &subject_spec,
                &NodeMakerSpec::fixed(name),
                &NodeMakerSpec::fixed(value),
            );
        }
        debug!(
            count = self.bridges.len() - before,
            "Parsed additional properties"
        );
    }

    pub(super) fn parse_class_map_types(&mut self) {
        let before = self.bridges.len();
        let mut declared = Vec::new();
        for (class, class_map_node) in self.pairs(D2RQ::CLASS_MAP_PROPERTY) {
            declared.push((class_map_node, class));
        }
        declared.extend(self.pairs(D2RQ::CLASS));

        let mut seen = HashSet::new();
        for (class_map_node, class) in declared {
            if seen.insert((class_map_node.clone(), class.clone())) {
                self.add_type_bridge(&class_map_node, class);
            }
        }
        debug!(count = self.bridges.len() - before, "Parsed class map types");
    }

    fn add_type_bridge(&mut self, class_map_node: &Term, class: Term) {
        let Some(spec) = self.class_maps.get(class_map_node).cloned() else {
            self.error(
                format!(
                    "{}, referenced from {}, is no d2rq:ClassMap",
                    class_map_node, class
                ),
                class_map_node,
            );
            return;
        };
        let bridge_id = format!("{} a {}", node_id(class_map_node), node_id(&class));
        self.create_property_bridge(
            class_map_node,
            &bridge_id,
            &spec,
            &NodeMakerSpec::fixed(Term::iri(D2RQ::RDF_TYPE)),
            &NodeMakerSpec::fixed(class),
        );
    }

    /// Drop every bridge reading a column its database has no type for
    pub(super) fn check_column_types(&mut self) {
        let bridges = std::mem::take(&mut self.bridges);
        let total = bridges.len();
        let mut kept = Vec::with_capacity(bridges.len());
        for bridge in bridges {
            let violations: Vec<VgraphError> = bridge
                .original_columns()
                .iter()
                .filter_map(|column| bridge.database.assert_has_type(column).err())
                .collect();
            if violations.is_empty() {
                kept.push(bridge);
                continue;
            }
            for violation in violations {
                self.report(Diagnostic::fatal(violation.to_string(), bridge.id.as_str()));
            }
        }
        debug!(
            kept = kept.len(),
            dropped = total - kept.len(),
            "Checked column types"
        );
        self.bridges = kept;
    }
}
