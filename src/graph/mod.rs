//! Graph API and in-memory implementation

pub mod adjacency;
pub mod edit;
pub mod generate;
pub mod traversal;

pub use adjacency::Graph;
pub use generate::{sample_graph, GraphDefinition, SampleOptions};
pub use traversal::{connected_components, has_path, is_connected, shortest_path};

use crate::error::Result;

/// Node identifier. Non-negative, not necessarily contiguous after edits.
pub type NodeId = u32;

/// Graph boundary required by the recorder and the editor
pub trait GraphStore {
    // === QUERIES ===

    /// Whether edges are ordered pairs
    fn is_directed(&self) -> bool;

    /// All nodes, ascending
    fn nodes(&self) -> Vec<NodeId>;

    /// Largest node id, if any
    fn max_node(&self) -> Option<NodeId> {
        self.nodes().last().copied()
    }

    /// Check node membership
    fn contains_node(&self, id: NodeId) -> bool;

    /// Adjacent nodes, ascending (successors for directed graphs)
    fn neighbors(&self, id: NodeId) -> Vec<NodeId>;

    /// Check edge presence (direction-aware)
    fn has_edge(&self, src: NodeId, dst: NodeId) -> bool;

    /// All edges. Undirected edges are reported once as (min, max).
    fn edges(&self) -> Vec<(NodeId, NodeId)>;

    // === MUTATION PRIMITIVES ===

    /// Insert a node (no-op if it exists)
    fn insert_node(&mut self, id: NodeId);

    /// Insert an edge, creating missing endpoints
    fn insert_edge(&mut self, src: NodeId, dst: NodeId);

    /// Remove a node with all incident edges
    fn delete_node(&mut self, id: NodeId) -> Result<()>;

    /// Remove a single edge
    fn delete_edge(&mut self, src: NodeId, dst: NodeId) -> Result<()>;

    // === STATS ===

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}
