//! Landmark nodes and ordering types.

use std::fmt;

use smallvec::SmallVec;

use wayfinder_core::{Fact, OperatorId, State};

/// Index of a landmark within its graph's arena.
///
/// Ids are dense, stable for the graph's lifetime and identical to the
/// iteration order of [`LandmarkGraph::nodes`](crate::LandmarkGraph::nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LandmarkId(pub usize);

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lm{}", self.0)
    }
}

/// The type of an ordering edge between two landmarks.
///
/// An edge `A -> B` of any type records that `A` is expected to be achieved
/// before `B`. Reasonable and obedient-reasonable orderings only hold under
/// solution-quality assumptions and are unsound for admissible estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderType {
    Natural,
    Reasonable,
    ObedientReasonable,
    Necessary,
}

impl OrderType {
    /// True for the ordering types that are unsound for admissible
    /// estimates.
    pub fn is_reasonable(self) -> bool {
        matches!(self, OrderType::Reasonable | OrderType::ObedientReasonable)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Natural => write!(f, "natural"),
            OrderType::Reasonable => write!(f, "reasonable"),
            OrderType::ObedientReasonable => write!(f, "obedient-reasonable"),
            OrderType::Necessary => write!(f, "necessary"),
        }
    }
}

/// A landmark: a fact, or a disjunction of facts, that every valid solution
/// must make true at some point.
#[derive(Debug, Clone)]
pub struct LandmarkNode {
    facts: SmallVec<[Fact; 1]>,
    disjunctive: bool,
    is_goal: bool,
    cost: u32,
    parents: Vec<(LandmarkId, OrderType)>,
    children: Vec<(LandmarkId, OrderType)>,
    first_achievers: Vec<OperatorId>,
    possible_achievers: Vec<OperatorId>,
}

impl LandmarkNode {
    pub(crate) fn new(facts: SmallVec<[Fact; 1]>, disjunctive: bool) -> Self {
        Self {
            facts,
            disjunctive,
            is_goal: false,
            cost: 1,
            parents: Vec::new(),
            children: Vec::new(),
            first_achievers: Vec::new(),
            possible_achievers: Vec::new(),
        }
    }

    /// The fact pairs belonging to this landmark. A simple landmark has
    /// exactly one; a disjunctive landmark has two or more alternatives.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn is_disjunctive(&self) -> bool {
        self.disjunctive
    }

    pub fn is_goal(&self) -> bool {
        self.is_goal
    }

    /// The cost this landmark contributes to the counting heuristic,
    /// typically the cheapest achiever's cost.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Order-type parents: landmarks expected to be achieved before this
    /// one, tagged with the edge type.
    pub fn parents(&self) -> &[(LandmarkId, OrderType)] {
        &self.parents
    }

    pub fn children(&self) -> &[(LandmarkId, OrderType)] {
        &self.children
    }

    /// Operators that can achieve this landmark for the first time.
    pub fn first_achievers(&self) -> &[OperatorId] {
        &self.first_achievers
    }

    /// Operators that can achieve this landmark at any point.
    pub fn possible_achievers(&self) -> &[OperatorId] {
        &self.possible_achievers
    }

    /// True if this landmark holds in `state`: for a disjunctive landmark
    /// at least one alternative fact must be true.
    pub fn is_true_in(&self, state: &State) -> bool {
        self.facts.iter().any(|&fact| state.is_true(fact))
    }

    pub(crate) fn set_goal(&mut self) {
        self.is_goal = true;
    }

    pub(crate) fn set_cost(&mut self, cost: u32) {
        self.cost = cost;
    }

    pub(crate) fn add_parent(&mut self, parent: LandmarkId, order: OrderType) {
        self.parents.push((parent, order));
    }

    pub(crate) fn add_child(&mut self, child: LandmarkId, order: OrderType) {
        self.children.push((child, order));
    }

    pub(crate) fn add_first_achiever(&mut self, op: OperatorId) {
        if !self.first_achievers.contains(&op) {
            self.first_achievers.push(op);
        }
    }

    pub(crate) fn add_possible_achiever(&mut self, op: OperatorId) {
        if !self.possible_achievers.contains(&op) {
            self.possible_achievers.push(op);
        }
    }
}
