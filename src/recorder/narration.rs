//! Template narration for recorded steps

use super::Discipline;
use crate::graph::NodeId;

/// Render a node list as `[a, b, c]`
pub fn format_nodes(nodes: &[NodeId]) -> String {
    let items: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
    format!("[{}]", items.join(", "))
}

pub fn start(discipline: Discipline, start: NodeId) -> String {
    format!(
        "Starting {} from node {}. Initialize with an empty visited set and add node {} to the {}.",
        discipline,
        start,
        start,
        discipline.container_name()
    )
}

pub fn skip(discipline: Discipline, node: NodeId) -> String {
    format!(
        "Node {} has already been visited, so we skip it and move to the next node in the {}.",
        node,
        discipline.container_name()
    )
}

pub fn visit(node: NodeId, neighbors: &[NodeId]) -> String {
    format!(
        "Visit node {} and mark it as visited. Examine its neighbors: {}.",
        node,
        format_nodes(neighbors)
    )
}

pub fn expand(discipline: Discipline, edges: &[(NodeId, NodeId)]) -> String {
    let added: Vec<NodeId> = edges.iter().map(|&(_, dst)| dst).collect();
    format!(
        "Add unvisited neighbors {} to the {} for later processing.",
        format_nodes(&added),
        discipline.container_name()
    )
}

pub fn finish(discipline: Discipline, visited: &[NodeId]) -> String {
    format!(
        "{} complete. All reachable nodes have been visited in this order: {}.",
        discipline,
        format_nodes(visited)
    )
}
