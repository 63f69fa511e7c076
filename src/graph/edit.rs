//! Editor operations with a silent no-op policy
//!
//! Each operation returns `true` when the graph changed. Invalid input
//! (missing node, missing edge, self-loop) leaves the graph untouched and
//! is not an error. Callers holding a recorded step sequence must discard it
//! whenever an operation returns `true`.

use tracing::debug;

use super::{GraphStore, NodeId};

/// Append a node whose id is one past the current maximum (0 when empty).
/// When the maximum is `NodeId::MAX` the smallest unused id is taken instead.
pub fn add_node<G: GraphStore + ?Sized>(graph: &mut G) -> NodeId {
    let id = match graph.max_node() {
        None => 0,
        Some(max) => match max.checked_add(1) {
            Some(next) => next,
            None => smallest_unused(&graph.nodes()),
        },
    };
    graph.insert_node(id);
    id
}

/// First gap in an ascending id list
fn smallest_unused(nodes: &[NodeId]) -> NodeId {
    let mut expected: NodeId = 0;
    for &node in nodes {
        if node != expected {
            break;
        }
        expected = expected.saturating_add(1);
    }
    expected
}

/// Insert edge (a, b) only when both endpoints exist
pub fn add_edge<G: GraphStore + ?Sized>(graph: &mut G, a: NodeId, b: NodeId) -> bool {
    if !graph.contains_node(a) || !graph.contains_node(b) {
        debug!(a, b, "add_edge ignored: endpoint missing");
        return false;
    }
    if a == b {
        debug!(node = a, "add_edge ignored: self-loop");
        return false;
    }
    if graph.has_edge(a, b) {
        return false;
    }
    graph.insert_edge(a, b);
    true
}

/// Remove a node and every edge touching it
pub fn remove_node<G: GraphStore + ?Sized>(graph: &mut G, node: NodeId) -> bool {
    match graph.delete_node(node) {
        Ok(()) => true,
        Err(e) => {
            debug!("remove_node ignored: {}", e);
            false
        }
    }
}

/// Remove edge (a, b) if present
pub fn remove_edge<G: GraphStore + ?Sized>(graph: &mut G, a: NodeId, b: NodeId) -> bool {
    match graph.delete_edge(a, b) {
        Ok(()) => true,
        Err(e) => {
            debug!("remove_edge ignored: {}", e);
            false
        }
    }
}
