//! Graph construction: fixed definitions and random samples

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::traversal::connected_components;
use super::{Graph, GraphStore, NodeId};
use crate::error::{Result, TutorError};

/// Fixed graph description: nodes `0..nodes` plus an edge list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDefinition {
    pub nodes: u32,
    pub edges: Vec<(NodeId, NodeId)>,
    #[serde(default)]
    pub directed: bool,
}

impl GraphDefinition {
    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "tree" => Some(Self::tree()),
            "cycle" => Some(Self::cycle()),
            "directed_cycle" => Some(Self::directed_cycle()),
            "diamond" => Some(Self::diamond()),
            _ => None,
        }
    }

    /// Names accepted by [`GraphDefinition::preset`]
    pub fn preset_names() -> &'static [&'static str] {
        &["tree", "cycle", "directed_cycle", "diamond"]
    }

    /// Small binary tree rooted at 0
    pub fn tree() -> Self {
        Self {
            nodes: 5,
            edges: vec![(0, 1), (0, 2), (1, 3), (2, 4)],
            directed: false,
        }
    }

    /// Triangle 0-1-2 with a tail 1-3
    pub fn cycle() -> Self {
        Self {
            nodes: 4,
            edges: vec![(0, 1), (1, 2), (2, 0), (1, 3)],
            directed: false,
        }
    }

    /// Directed cycle 0->1->2->0 with a branch 0->3->4
    pub fn directed_cycle() -> Self {
        Self {
            nodes: 5,
            edges: vec![(0, 1), (1, 2), (2, 0), (0, 3), (3, 4)],
            directed: true,
        }
    }

    /// Two routes from 0 to 3 of different lengths
    pub fn diamond() -> Self {
        Self {
            nodes: 5,
            edges: vec![(0, 1), (0, 2), (1, 3), (2, 4), (4, 3)],
            directed: false,
        }
    }
}

impl Graph {
    /// Build a graph from a definition, rejecting out-of-range endpoints
    pub fn from_definition(definition: &GraphDefinition) -> Result<Self> {
        let mut graph = if definition.directed { Graph::directed() } else { Graph::undirected() };

        for id in 0..definition.nodes {
            graph.insert_node(id);
        }

        for &(src, dst) in &definition.edges {
            if src >= definition.nodes || dst >= definition.nodes {
                return Err(TutorError::InvalidDefinition(format!(
                    "edge ({}, {}) references a node outside 0..{}",
                    src, dst, definition.nodes
                )));
            }
            graph.insert_edge(src, dst);
        }

        Ok(graph)
    }
}

/// Parameters for random sample graphs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleOptions {
    pub num_nodes: u32,
    pub edge_probability: f64,
    pub directed: bool,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            num_nodes: 6,
            edge_probability: 0.4,
            directed: false,
        }
    }
}

/// Random graph: each pair (i, j), i < j, gets an edge with the given
/// probability. Undirected samples are then joined into one component by
/// linking the smallest node of every extra component to the smallest node
/// of the first.
pub fn sample_graph<R: Rng + ?Sized>(options: &SampleOptions, rng: &mut R) -> Graph {
    let mut graph = if options.directed { Graph::directed() } else { Graph::undirected() };
    let probability = if options.edge_probability.is_nan() {
        0.0
    } else {
        options.edge_probability.clamp(0.0, 1.0)
    };

    for id in 0..options.num_nodes {
        graph.insert_node(id);
    }

    for i in 0..options.num_nodes {
        for j in (i + 1)..options.num_nodes {
            if rng.gen_bool(probability) {
                graph.insert_edge(i, j);
            }
        }
    }

    if !options.directed {
        let components = connected_components(&graph);
        if let Some((first, rest)) = components.split_first() {
            for component in rest {
                graph.insert_edge(first[0], component[0]);
            }
        }
    }

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        directed = options.directed,
        "generated sample graph"
    );

    graph
}
