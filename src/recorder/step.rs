//! Recorded traversal steps

use serde::{Deserialize, Serialize};

use super::Discipline;
use crate::graph::NodeId;

/// What a step represents
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Opening bookend, nothing visited yet
    Start,
    /// Node taken from the frontier was already visited
    Skip,
    /// Node marked visited, neighbors examined
    Visit,
    /// Unvisited neighbors added to the frontier
    Expand,
    /// Closing bookend, frontier empty
    Finish,
}

/// One immutable moment of a traversal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Visited nodes in visitation order
    pub visited: Vec<NodeId>,
    /// Node being processed; `None` for bookends
    pub current: Option<NodeId>,
    /// Frontier contents after this step, oldest entry first
    pub frontier_snapshot: Vec<NodeId>,
    /// (from, to) pairs pushed to the frontier in this step
    pub edges_discovered: Vec<(NodeId, NodeId)>,
    pub narration: String,
}

/// Complete record of one traversal run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSequence {
    discipline: Discipline,
    start: NodeId,
    steps: Vec<Step>,
}

impl StepSequence {
    pub(crate) fn new(discipline: Discipline, start: NodeId, steps: Vec<Step>) -> Self {
        debug_assert!(steps.len() >= 2, "a sequence always has both bookends");
        Self { discipline, start, steps }
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Clamp a scrub position to `[0, len - 1]`
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.steps.len().saturating_sub(1))
    }

    /// Step at a clamped position
    pub fn at(&self, index: usize) -> &Step {
        &self.steps[self.clamp_index(index)]
    }

    pub fn first(&self) -> &Step {
        self.at(0)
    }

    pub fn last(&self) -> &Step {
        self.at(usize::MAX)
    }

    /// Final visitation order
    pub fn visit_order(&self) -> &[NodeId] {
        &self.last().visited
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
