//! The landmark graph: an immutable arena of landmark nodes.

use std::collections::HashMap;

use smallvec::{smallvec, SmallVec};

use wayfinder_core::{Fact, OperatorId, Result, WayfinderError};

use crate::node::{LandmarkId, LandmarkNode, OrderType};

/// An immutable set of landmark nodes plus typed ordering edges.
///
/// Nodes live in an arena indexed by [`LandmarkId`]; iteration order is the
/// id order and stable across calls. Fact lookup distinguishes simple from
/// disjunctive landmarks, preferring the simple one when a fact belongs to
/// both (the simple landmark is the stronger statement).
///
/// # Example
///
/// ```
/// use wayfinder_core::{Fact, VariableId};
/// use wayfinder_landmarks::{LandmarkGraphBuilder, OrderType};
///
/// let fuel = Fact::new(VariableId(0), 1);
/// let orbit = Fact::new(VariableId(1), 1);
///
/// let mut builder = LandmarkGraphBuilder::new();
/// let lm_fuel = builder.add_simple(fuel);
/// let lm_orbit = builder.add_simple(orbit);
/// builder.mark_goal(lm_orbit);
/// builder.add_ordering(lm_fuel, lm_orbit, OrderType::Natural).unwrap();
/// let graph = builder.build().unwrap();
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.landmark_by_fact(orbit), Some(lm_orbit));
/// ```
#[derive(Debug)]
pub struct LandmarkGraph {
    nodes: Vec<LandmarkNode>,
    simple_index: HashMap<Fact, LandmarkId>,
    disjunctive_index: HashMap<Fact, LandmarkId>,
    has_reasonable_orderings: bool,
}

impl LandmarkGraph {
    /// Total number of landmarks; constant after construction.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn node(&self, id: LandmarkId) -> &LandmarkNode {
        &self.nodes[id.0]
    }

    /// Enumerates all landmark ids in stable (id) order.
    pub fn ids(&self) -> impl Iterator<Item = LandmarkId> {
        (0..self.nodes.len()).map(LandmarkId)
    }

    /// Enumerates all nodes with their ids, in stable order.
    pub fn nodes(&self) -> impl Iterator<Item = (LandmarkId, &LandmarkNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (LandmarkId(i), node))
    }

    /// Resolves a fact to the landmark it belongs to, if any. A fact that
    /// belongs to both a simple and a disjunctive landmark resolves to the
    /// simple one.
    pub fn landmark_by_fact(&self, fact: Fact) -> Option<LandmarkId> {
        self.simple_index
            .get(&fact)
            .or_else(|| self.disjunctive_index.get(&fact))
            .copied()
    }

    /// True if any ordering edge is reasonable or obedient-reasonable.
    pub fn has_reasonable_orderings(&self) -> bool {
        self.has_reasonable_orderings
    }
}

/// Builder for [`LandmarkGraph`].
///
/// The evaluator does not mine landmarks itself; whatever extraction method
/// produced them feeds this builder once, and the graph is immutable from
/// then on.
#[derive(Debug, Default)]
pub struct LandmarkGraphBuilder {
    nodes: Vec<LandmarkNode>,
}

impl LandmarkGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a simple (single-fact) landmark.
    pub fn add_simple(&mut self, fact: Fact) -> LandmarkId {
        let id = LandmarkId(self.nodes.len());
        self.nodes.push(LandmarkNode::new(smallvec![fact], false));
        id
    }

    /// Adds a disjunctive landmark over two or more alternative facts.
    pub fn add_disjunctive(&mut self, facts: impl IntoIterator<Item = Fact>) -> LandmarkId {
        let facts: SmallVec<[Fact; 1]> = facts.into_iter().collect();
        let id = LandmarkId(self.nodes.len());
        self.nodes.push(LandmarkNode::new(facts, true));
        id
    }

    /// Marks a landmark as a goal landmark.
    pub fn mark_goal(&mut self, id: LandmarkId) -> &mut Self {
        self.nodes[id.0].set_goal();
        self
    }

    /// Sets the landmark's cost contribution (defaults to 1).
    pub fn set_cost(&mut self, id: LandmarkId, cost: u32) -> &mut Self {
        self.nodes[id.0].set_cost(cost);
        self
    }

    /// Adds an ordering edge: `parent` is to be achieved before `child`.
    pub fn add_ordering(
        &mut self,
        parent: LandmarkId,
        child: LandmarkId,
        order: OrderType,
    ) -> Result<&mut Self> {
        if parent == child {
            return Err(WayfinderError::LandmarkGraph(format!(
                "self-ordering on {parent}"
            )));
        }
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return Err(WayfinderError::LandmarkGraph(format!(
                "ordering {parent} -> {child} references an unknown landmark"
            )));
        }
        self.nodes[child.0].add_parent(parent, order);
        self.nodes[parent.0].add_child(child, order);
        Ok(self)
    }

    /// Records an operator that can achieve the landmark for the first time.
    /// First achievers are implicitly possible achievers as well.
    pub fn add_first_achiever(&mut self, id: LandmarkId, op: OperatorId) -> &mut Self {
        self.nodes[id.0].add_first_achiever(op);
        self.nodes[id.0].add_possible_achiever(op);
        self
    }

    /// Records an operator that can achieve the landmark at any point.
    pub fn add_possible_achiever(&mut self, id: LandmarkId, op: OperatorId) -> &mut Self {
        self.nodes[id.0].add_possible_achiever(op);
        self
    }

    /// Validates and builds the graph.
    pub fn build(self) -> Result<LandmarkGraph> {
        let mut simple_index = HashMap::new();
        let mut disjunctive_index = HashMap::new();
        let mut has_reasonable_orderings = false;

        for (i, node) in self.nodes.iter().enumerate() {
            let id = LandmarkId(i);
            if node.is_disjunctive() {
                if node.facts().len() < 2 {
                    return Err(WayfinderError::LandmarkGraph(format!(
                        "disjunctive landmark {id} needs at least two alternatives"
                    )));
                }
            } else if node.facts().len() != 1 {
                return Err(WayfinderError::LandmarkGraph(format!(
                    "simple landmark {id} must hold exactly one fact"
                )));
            }
            for &fact in node.facts() {
                let index = if node.is_disjunctive() {
                    &mut disjunctive_index
                } else {
                    &mut simple_index
                };
                if index.insert(fact, id).is_some() {
                    return Err(WayfinderError::LandmarkGraph(format!(
                        "fact {fact} belongs to two landmarks of the same kind"
                    )));
                }
            }
            has_reasonable_orderings |= node
                .parents()
                .iter()
                .any(|&(_, order)| order.is_reasonable());
        }

        Ok(LandmarkGraph {
            nodes: self.nodes,
            simple_index,
            disjunctive_index,
            has_reasonable_orderings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_core::VariableId;

    fn fact(var: usize, value: u16) -> Fact {
        Fact::new(VariableId(var), value)
    }

    #[test]
    fn fact_lookup_prefers_simple_landmarks() {
        let mut builder = LandmarkGraphBuilder::new();
        let simple = builder.add_simple(fact(0, 1));
        let disj = builder.add_disjunctive([fact(0, 1), fact(1, 1)]);
        let graph = builder.build().unwrap();

        assert_eq!(graph.landmark_by_fact(fact(0, 1)), Some(simple));
        assert_eq!(graph.landmark_by_fact(fact(1, 1)), Some(disj));
        assert_eq!(graph.landmark_by_fact(fact(1, 0)), None);
    }

    #[test]
    fn build_rejects_single_fact_disjunction() {
        let mut builder = LandmarkGraphBuilder::new();
        builder.add_disjunctive([fact(0, 1)]);
        assert!(builder.build().is_err());
    }

    #[test]
    fn build_rejects_duplicate_simple_fact() {
        let mut builder = LandmarkGraphBuilder::new();
        builder.add_simple(fact(0, 1));
        builder.add_simple(fact(0, 1));
        assert!(builder.build().is_err());
    }

    #[test]
    fn ordering_endpoints_are_validated() {
        let mut builder = LandmarkGraphBuilder::new();
        let a = builder.add_simple(fact(0, 1));
        assert!(builder
            .add_ordering(a, LandmarkId(7), OrderType::Natural)
            .is_err());
        assert!(builder.add_ordering(a, a, OrderType::Natural).is_err());
    }

    #[test]
    fn reasonable_orderings_are_detected() {
        let mut builder = LandmarkGraphBuilder::new();
        let a = builder.add_simple(fact(0, 1));
        let b = builder.add_simple(fact(1, 1));
        builder
            .add_ordering(a, b, OrderType::Reasonable)
            .unwrap();
        let graph = builder.build().unwrap();
        assert!(graph.has_reasonable_orderings());

        let mut builder = LandmarkGraphBuilder::new();
        let a = builder.add_simple(fact(0, 1));
        let b = builder.add_simple(fact(1, 1));
        builder.add_ordering(a, b, OrderType::Natural).unwrap();
        assert!(!builder.build().unwrap().has_reasonable_orderings());
    }

    #[test]
    fn first_achievers_are_possible_achievers() {
        let mut builder = LandmarkGraphBuilder::new();
        let a = builder.add_simple(fact(0, 1));
        builder.add_first_achiever(a, OperatorId(3));
        let graph = builder.build().unwrap();
        assert_eq!(graph.node(a).first_achievers(), &[OperatorId(3)]);
        assert_eq!(graph.node(a).possible_achievers(), &[OperatorId(3)]);
    }
}
