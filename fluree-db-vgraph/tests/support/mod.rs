//! Shared helpers for virtual graph integration tests.

#![allow(dead_code)]

pub mod tracing;

use fluree_db_vgraph::{Attribute, D2RQ};
use fluree_graph_ir::{Graph, Term};

pub const MAP: &str = "http://test/map#";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

pub fn map(local: &str) -> Term {
    Term::iri(format!("{}{}", MAP, local))
}

pub fn map_id(local: &str) -> String {
    format!("{}{}", MAP, local)
}

pub fn foaf(local: &str) -> Term {
    Term::iri(format!("{}{}", FOAF, local))
}

pub fn attr(s: &str) -> Attribute {
    Attribute::parse(s).unwrap()
}

/// Builds D2RQ mapping graphs statement by statement
#[derive(Default)]
pub struct MappingBuilder {
    graph: Graph,
}

impl MappingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, s: &Term, p: &str, o: Term) -> &mut Self {
        self.graph.add_triple(s.clone(), Term::iri(p), o);
        self
    }

    pub fn literal(&mut self, s: &Term, p: &str, value: &str) -> &mut Self {
        self.add(s, p, Term::string(value))
    }

    /// `map:db` with the given numeric and text columns
    pub fn database(&mut self, numeric: &[&str], text: &[&str]) -> Term {
        let db = map("db");
        self.add(&db, D2RQ::RDF_TYPE, Term::iri(D2RQ::DATABASE));
        self.literal(&db, D2RQ::JDBC_DSN, "jdbc:postgresql://localhost/test");
        self.literal(&db, D2RQ::JDBC_DRIVER, "org.postgresql.Driver");
        for column in numeric {
            self.literal(&db, D2RQ::NUMERIC_COLUMN, column);
        }
        for column in text {
            self.literal(&db, D2RQ::TEXT_COLUMN, column);
        }
        db
    }

    pub fn class_map(&mut self, name: &str, db: &Term) -> Term {
        let cm = map(name);
        self.add(&cm, D2RQ::RDF_TYPE, Term::iri(D2RQ::CLASS_MAP));
        self.add(&cm, D2RQ::DATA_STORAGE, db.clone());
        cm
    }

    pub fn object_bridge(&mut self, name: &str, class_map: &Term, property: Term) -> Term {
        self.bridge(name, class_map, property, D2RQ::OBJECT_PROPERTY_BRIDGE)
    }

    pub fn datatype_bridge(&mut self, name: &str, class_map: &Term, property: Term) -> Term {
        self.bridge(name, class_map, property, D2RQ::DATATYPE_PROPERTY_BRIDGE)
    }

    fn bridge(&mut self, name: &str, class_map: &Term, property: Term, class: &str) -> Term {
        let pb = map(name);
        self.add(&pb, D2RQ::RDF_TYPE, Term::iri(class));
        self.add(&pb, D2RQ::BELONGS_TO_CLASS_MAP, class_map.clone());
        self.add(&pb, D2RQ::PROPERTY, property);
        pb
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}

/// The employees mapping:
///
/// - `map:Person`: `http://test/person@@employees.ID@@`, class `foaf:Person`
/// - `map:knows`: `foaf:knows` to `http://test/person@@employees.manager@@`
pub fn employees_mapping() -> MappingBuilder {
    let mut m = MappingBuilder::new();
    let db = m.database(&["employees.ID", "employees.manager"], &["employees.homepage"]);
    let person = m.class_map("Person", &db);
    m.literal(&person, D2RQ::URI_PATTERN, "http://test/person@@employees.ID@@");
    m.add(&person, D2RQ::CLASS, foaf("Person"));
    let knows = m.object_bridge("knows", &person, foaf("knows"));
    m.literal(&knows, D2RQ::PATTERN, "http://test/person@@employees.manager@@");
    m
}

/// [`employees_mapping`] plus URI column bridges:
///
/// - `map:homepage`: `foaf:homepage` from `employees.homepage` on `map:Person`
/// - `map:Document`: subjects from `employees.homepage`, class `foaf:Document`
pub fn employees_with_homepages() -> MappingBuilder {
    let mut m = employees_mapping();
    let person = map("Person");
    let homepage = m.object_bridge("homepage", &person, foaf("homepage"));
    m.literal(&homepage, D2RQ::COLUMN, "employees.homepage");
    let document = m.class_map("Document", &map("db"));
    m.literal(&document, D2RQ::URI_COLUMN, "employees.homepage");
    m.add(&document, D2RQ::CLASS, foaf("Document"));
    m
}
