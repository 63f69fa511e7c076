//! Stepwise traversal recorder
//!
//! Runs depth-first or breadth-first search and records every intermediate
//! state as a [`Step`]. The two disciplines share one loop and differ only
//! in how the frontier releases nodes and in neighbor ordering:
//!
//! | Discipline   | Frontier | Removal        | Neighbor order |
//! |--------------|----------|----------------|----------------|
//! | DepthFirst   | stack    | last inserted  | descending     |
//! | BreadthFirst | queue    | first inserted | ascending      |
//!
//! Neighbor ordering makes the output deterministic: the same graph, start
//! node and discipline always yield an identical [`StepSequence`].

mod frontier;
pub mod narration;
mod step;

#[cfg(test)]
mod tests;
#[cfg(test)]
mod step_proptest;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TutorError};
use crate::graph::{GraphStore, NodeId};
use frontier::Frontier;

pub use step::{Step, StepKind, StepSequence};

/// Traversal ordering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Discipline {
    #[default]
    #[serde(rename = "DFS", alias = "dfs")]
    DepthFirst,
    #[serde(rename = "BFS", alias = "bfs")]
    BreadthFirst,
}

impl Discipline {
    /// Short algorithm name used in narration and prompts
    pub fn short_name(self) -> &'static str {
        match self {
            Discipline::DepthFirst => "DFS",
            Discipline::BreadthFirst => "BFS",
        }
    }

    /// Name of the frontier container
    pub fn container_name(self) -> &'static str {
        match self {
            Discipline::DepthFirst => "stack",
            Discipline::BreadthFirst => "queue",
        }
    }

    fn order_neighbors(self, neighbors: &mut [NodeId]) {
        match self {
            Discipline::DepthFirst => neighbors.sort_unstable_by(|a, b| b.cmp(a)),
            Discipline::BreadthFirst => neighbors.sort_unstable(),
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Record a full traversal of `graph` from `start`.
///
/// Fails with [`TutorError::InvalidStartNode`] before producing any step if
/// `start` is not in the graph. Nodes unreachable from `start` never appear.
pub fn record<G: GraphStore + ?Sized>(
    graph: &G,
    start: NodeId,
    discipline: Discipline,
) -> Result<StepSequence> {
    if !graph.contains_node(start) {
        return Err(TutorError::InvalidStartNode(start));
    }

    let mut steps = Vec::new();
    let mut visited: Vec<NodeId> = Vec::new();
    let mut frontier = Frontier::new(discipline, start);

    steps.push(Step {
        kind: StepKind::Start,
        visited: Vec::new(),
        current: None,
        frontier_snapshot: frontier.snapshot(),
        edges_discovered: Vec::new(),
        narration: narration::start(discipline, start),
    });

    while let Some(current) = frontier.take() {
        if visited.contains(&current) {
            steps.push(Step {
                kind: StepKind::Skip,
                visited: visited.clone(),
                current: Some(current),
                frontier_snapshot: frontier.snapshot(),
                edges_discovered: Vec::new(),
                narration: narration::skip(discipline, current),
            });
            continue;
        }

        visited.push(current);

        let mut neighbors = graph.neighbors(current);
        discipline.order_neighbors(&mut neighbors);

        steps.push(Step {
            kind: StepKind::Visit,
            visited: visited.clone(),
            current: Some(current),
            frontier_snapshot: frontier.snapshot(),
            edges_discovered: Vec::new(),
            narration: narration::visit(current, &neighbors),
        });

        let mut discovered = Vec::new();
        for neighbor in neighbors {
            if !visited.contains(&neighbor) && !frontier.contains(neighbor) {
                frontier.insert(neighbor);
                discovered.push((current, neighbor));
            }
        }

        if !discovered.is_empty() {
            let narration = narration::expand(discipline, &discovered);
            steps.push(Step {
                kind: StepKind::Expand,
                visited: visited.clone(),
                current: Some(current),
                frontier_snapshot: frontier.snapshot(),
                edges_discovered: discovered,
                narration,
            });
        }
    }

    steps.push(Step {
        kind: StepKind::Finish,
        narration: narration::finish(discipline, &visited),
        visited,
        current: None,
        frontier_snapshot: Vec::new(),
        edges_discovered: Vec::new(),
    });

    debug!(
        %discipline,
        start,
        steps = steps.len(),
        "recorded traversal"
    );

    Ok(StepSequence::new(discipline, start, steps))
}
