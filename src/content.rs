//! Static facts about each traversal discipline

use serde::Serialize;

use crate::recorder::Discipline;

/// Summary shown next to the algorithm selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmProperties {
    pub full_name: &'static str,
    pub data_structure: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub uses: &'static [&'static str],
    pub characteristics: &'static [&'static str],
}

static DEPTH_FIRST: AlgorithmProperties = AlgorithmProperties {
    full_name: "Depth-First Search",
    data_structure: "Stack",
    time_complexity: "O(V + E) where V is vertices and E is edges",
    space_complexity: "O(h) where h is the height of the tree/graph",
    uses: &[
        "Finding connected components",
        "Topological sorting",
        "Detecting cycles",
        "Solving puzzles with backtracking",
    ],
    characteristics: &[
        "Explores as far as possible along each branch before backtracking",
        "Uses a stack (either explicitly or through recursion)",
        "May not find the shortest path between two nodes",
        "Good for exploring all possible paths",
    ],
};

static BREADTH_FIRST: AlgorithmProperties = AlgorithmProperties {
    full_name: "Breadth-First Search",
    data_structure: "Queue",
    time_complexity: "O(V + E) where V is vertices and E is edges",
    space_complexity: "O(w) where w is the maximum width of the tree/graph",
    uses: &[
        "Finding shortest paths in unweighted graphs",
        "Finding all nodes within a connected component",
        "Testing bipartiteness",
        "Building web crawlers",
    ],
    characteristics: &[
        "Explores neighbors at the present depth before moving to nodes at the next depth level",
        "Uses a queue to track nodes to visit next",
        "Guarantees shortest path in unweighted graphs",
        "Good for finding the shortest path",
    ],
};

impl Discipline {
    pub fn properties(self) -> &'static AlgorithmProperties {
        match self {
            Discipline::DepthFirst => &DEPTH_FIRST,
            Discipline::BreadthFirst => &BREADTH_FIRST,
        }
    }
}
