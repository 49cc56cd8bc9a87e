//! Per-term exclusivity state

use fluree_graph_ir::Term;

use crate::nodes::NodeMaker;

/// Tracks, for one bound term, whether a URI pattern has already claimed it
///
/// A URI produced by a pattern is never also produced by a plain URI
/// column, so once a pattern maker fits the term every column maker is
/// ruled out. Pattern makers never rule each other out. Create one checker
/// per bound term and discard it after the pass.
#[derive(Debug, Clone)]
pub struct RuleChecker {
    term: Term,
    precise_match: bool,
}

impl RuleChecker {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            precise_match: false,
        }
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn has_precise_match(&self) -> bool {
        self.precise_match
    }

    /// Record that `node_maker` may have produced the term
    ///
    /// Only a URI pattern maker that actually fits a URI term counts.
    pub fn add_potential_match(&mut self, node_maker: &NodeMaker) {
        if self.term.is_iri() && node_maker.is_uri_pattern() && node_maker.could_fit(&self.term) {
            self.precise_match = true;
        }
    }

    pub fn can_match(&self, node_maker: &NodeMaker) -> bool {
        !(self.precise_match && node_maker.is_uri_column())
    }
}
