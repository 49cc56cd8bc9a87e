//! Bridge disjointness optimizer
//!
//! Before any SQL is generated for a bound subject or object, rule out the
//! bridges that provably cannot produce it. Bridges are visited most
//! specific first so that a URI pattern match is known before the plain
//! URI column bridges it excludes are considered.

mod checker;

pub use checker::RuleChecker;

use std::cmp::Ordering;

use fluree_graph_ir::Term;
use tracing::trace;

use crate::bridge::{Position, PropertyBridge};
use crate::nodes::{NodeMaker, SlotKind};

/// Specificity ordering and exclusivity rule over URI node makers
#[derive(Debug, Clone, Copy, Default)]
pub struct UriMakerRule;

impl UriMakerRule {
    fn slot_score(node_maker: &NodeMaker) -> i32 {
        match node_maker.slot_kind() {
            SlotKind::Pattern => 3,
            SlotKind::Fixed | SlotKind::Other => 0,
            SlotKind::Column => -1,
        }
    }

    /// Combined subject and object specificity; higher is more specific
    pub fn specificity(&self, bridge: &PropertyBridge) -> i32 {
        Self::slot_score(&bridge.subject) + Self::slot_score(&bridge.object)
    }

    /// `Less` when `a` is more specific than `b`
    pub fn compare(&self, a: &PropertyBridge, b: &PropertyBridge) -> Ordering {
        self.specificity(b).cmp(&self.specificity(a))
    }

    /// Most specific first; ties keep their input order
    pub fn sort_bridges<'b>(&self, bridges: &'b [PropertyBridge]) -> Vec<&'b PropertyBridge> {
        let mut sorted: Vec<&PropertyBridge> = bridges.iter().collect();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }

    /// Order for a pass over `position`: the queried slot decides, combined
    /// specificity breaks ties; equal keys keep their input order
    pub fn sort_for_position<'b>(
        &self,
        bridges: &'b [PropertyBridge],
        position: Position,
    ) -> Vec<&'b PropertyBridge> {
        let mut sorted: Vec<&PropertyBridge> = bridges.iter().collect();
        sorted.sort_by(|a, b| {
            Self::slot_score(b.node_maker(position))
                .cmp(&Self::slot_score(a.node_maker(position)))
                .then_with(|| self.compare(a, b))
        });
        sorted
    }

    pub fn rule_checker(&self, term: &Term) -> RuleChecker {
        RuleChecker::new(term.clone())
    }

    /// Bridges that could produce `term` at `position`
    ///
    /// Visits bridges in [`sort_for_position`](Self::sort_for_position)
    /// order, skipping those whose node maker cannot fit the term or that the
    /// checker has ruled out.
    pub fn candidates<'b>(
        &self,
        bridges: &'b [PropertyBridge],
        position: Position,
        term: &Term,
    ) -> Vec<&'b PropertyBridge> {
        let mut checker = self.rule_checker(term);
        let mut candidates = Vec::new();
        for bridge in self.sort_for_position(bridges, position) {
            let node_maker = bridge.node_maker(position);
            if !node_maker.could_fit(term) {
                continue;
            }
            if !checker.can_match(node_maker) {
                trace!(bridge = %bridge.id, %term, "Excluded by URI pattern match");
                continue;
            }
            checker.add_potential_match(node_maker);
            candidates.push(bridge);
        }
        candidates
    }
}
