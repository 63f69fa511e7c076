//! Per-node status at a scrub position

use serde::Serialize;

use crate::graph::{GraphStore, NodeId};
use crate::recorder::{Discipline, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    Current,
    Visited,
    Unvisited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub node: NodeId,
    pub state: NodeState,
    /// Index in the frontier snapshot, oldest entry first
    pub frontier_position: Option<usize>,
}

/// Status of every graph node (ascending) at `step`; all unvisited when no
/// step is selected
pub fn node_statuses<G: GraphStore + ?Sized>(graph: &G, step: Option<&Step>) -> Vec<NodeStatus> {
    graph
        .nodes()
        .into_iter()
        .map(|node| {
            let Some(step) = step else {
                return NodeStatus { node, state: NodeState::Unvisited, frontier_position: None };
            };

            let state = if step.current == Some(node) {
                NodeState::Current
            } else if step.visited.contains(&node) {
                NodeState::Visited
            } else {
                NodeState::Unvisited
            };
            let frontier_position = step.frontier_snapshot.iter().position(|&n| n == node);

            NodeStatus { node, state, frontier_position }
        })
        .collect()
}

/// One line per node, e.g. `Node 2: Not visited yet (in stack at position 0)`
pub fn status_text(statuses: &[NodeStatus], discipline: Discipline) -> String {
    let mut text = String::new();
    for status in statuses {
        text.push_str(&format!("Node {}: ", status.node));
        text.push_str(match status.state {
            NodeState::Current => "Currently being processed",
            NodeState::Visited => "Visited",
            NodeState::Unvisited => "Not visited yet",
        });
        if let Some(position) = status.frontier_position {
            text.push_str(&format!(
                " (in {} at position {})",
                discipline.container_name(),
                position
            ));
        }
        text.push('\n');
    }
    text
}
