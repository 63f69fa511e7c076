//! In-memory adjacency graph

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{GraphStore, NodeId};
use crate::error::{Result, TutorError};

/// Session graph backed by ordered adjacency maps.
///
/// For undirected graphs `adjacency` is kept symmetric and `reverse_adjacency`
/// stays empty. For directed graphs `adjacency` holds successors and
/// `reverse_adjacency` predecessors, so removing a node never has to scan
/// every adjacency list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    directed: bool,

    // Node -> successors (or neighbors when undirected)
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,

    // Node -> predecessors, directed graphs only
    reverse_adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
}

impl Graph {
    /// Create an empty undirected graph
    pub fn undirected() -> Self {
        Self::default()
    }

    /// Create an empty directed graph
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::default()
        }
    }

    /// Build a graph from an edge list, adding endpoints as needed
    pub fn from_edges(directed: bool, edges: &[(NodeId, NodeId)]) -> Self {
        let mut graph = if directed { Self::directed() } else { Self::undirected() };
        for &(src, dst) in edges {
            graph.insert_edge(src, dst);
        }
        graph
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Predecessors for directed graphs, neighbors for undirected ones
    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        let map = if self.directed { &self.reverse_adjacency } else { &self.adjacency };
        map.get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl GraphStore for Graph {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.adjacency.keys().copied().collect()
    }

    fn max_node(&self) -> Option<NodeId> {
        self.adjacency.keys().next_back().copied()
    }

    fn contains_node(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        self.adjacency
            .get(&id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    fn has_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.adjacency
            .get(&src)
            .is_some_and(|set| set.contains(&dst))
    }

    fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        for (&src, targets) in &self.adjacency {
            for &dst in targets {
                if self.directed || src <= dst {
                    edges.push((src, dst));
                }
            }
        }
        edges
    }

    fn insert_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
        if self.directed {
            self.reverse_adjacency.entry(id).or_default();
        }
    }

    fn insert_edge(&mut self, src: NodeId, dst: NodeId) {
        self.insert_node(src);
        self.insert_node(dst);

        self.adjacency.entry(src).or_default().insert(dst);
        if self.directed {
            self.reverse_adjacency.entry(dst).or_default().insert(src);
        } else {
            self.adjacency.entry(dst).or_default().insert(src);
        }
    }

    fn delete_node(&mut self, id: NodeId) -> Result<()> {
        let successors = self
            .adjacency
            .remove(&id)
            .ok_or(TutorError::NodeNotFound(id))?;

        if self.directed {
            let predecessors = self.reverse_adjacency.remove(&id).unwrap_or_default();
            for dst in successors {
                if let Some(set) = self.reverse_adjacency.get_mut(&dst) {
                    set.remove(&id);
                }
            }
            for src in predecessors {
                if let Some(set) = self.adjacency.get_mut(&src) {
                    set.remove(&id);
                }
            }
        } else {
            for other in successors {
                if let Some(set) = self.adjacency.get_mut(&other) {
                    set.remove(&id);
                }
            }
        }

        Ok(())
    }

    fn delete_edge(&mut self, src: NodeId, dst: NodeId) -> Result<()> {
        let removed = self
            .adjacency
            .get_mut(&src)
            .is_some_and(|set| set.remove(&dst));
        if !removed {
            return Err(TutorError::EdgeNotFound { src, dst });
        }

        if self.directed {
            if let Some(set) = self.reverse_adjacency.get_mut(&dst) {
                set.remove(&src);
            }
        } else if let Some(set) = self.adjacency.get_mut(&dst) {
            set.remove(&src);
        }

        Ok(())
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}
