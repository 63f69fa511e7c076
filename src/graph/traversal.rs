//! Plain traversal helpers: reachability, shortest paths, connectivity

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::{Graph, GraphStore, NodeId};

/// BFS reachability order from start nodes
pub fn bfs<F>(start: &[NodeId], mut get_neighbors: F) -> Vec<NodeId>
where
    F: FnMut(NodeId) -> Vec<NodeId>,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from_iter(start.iter().copied());
    let mut result = Vec::new();

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node) {
            continue;
        }

        result.push(node);

        for neighbor in get_neighbors(node) {
            if !visited.contains(&neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    result
}

/// Unweighted shortest path honoring edge direction.
///
/// Returns `None` when either endpoint is missing or no path exists.
pub fn shortest_path<G: GraphStore + ?Sized>(
    graph: &G,
    from: NodeId,
    to: NodeId,
) -> Option<Vec<NodeId>> {
    if !graph.contains_node(from) || !graph.contains_node(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    parent.insert(from, from);

    while let Some(node) = queue.pop_front() {
        for neighbor in graph.neighbors(node) {
            if parent.contains_key(&neighbor) {
                continue;
            }
            parent.insert(neighbor, node);

            if neighbor == to {
                let mut path = vec![to];
                let mut cursor = to;
                while cursor != from {
                    cursor = parent[&cursor];
                    path.push(cursor);
                }
                path.reverse();
                return Some(path);
            }

            queue.push_back(neighbor);
        }
    }

    None
}

/// Whether `to` is reachable from `from`
pub fn has_path<G: GraphStore + ?Sized>(graph: &G, from: NodeId, to: NodeId) -> bool {
    shortest_path(graph, from, to).is_some()
}

/// Connected components, each sorted, ordered by smallest member.
/// Directed graphs are treated as undirected (weak components).
pub fn connected_components(graph: &Graph) -> Vec<Vec<NodeId>> {
    let mut seen = BTreeSet::new();
    let mut components = Vec::new();

    for node in graph.nodes() {
        if seen.contains(&node) {
            continue;
        }

        let mut component = bfs(&[node], |id| {
            let mut adjacent = graph.neighbors(id);
            if graph.is_directed() {
                adjacent.extend(graph.predecessors(id));
            }
            adjacent
        });
        component.sort_unstable();
        seen.extend(component.iter().copied());
        components.push(component);
    }

    components
}

/// True for graphs with at most one (weak) component
pub fn is_connected(graph: &Graph) -> bool {
    connected_components(graph).len() <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_bfs_simple_graph() {
        // Graph: 1 -> 2 -> 3
        //        1 -> 4
        let edges: HashMap<NodeId, Vec<NodeId>> = [
            (1, vec![2, 4]),
            (2, vec![3]),
            (3, vec![]),
            (4, vec![]),
        ]
        .iter()
        .cloned()
        .collect();

        let result = bfs(&[1], |id| edges.get(&id).cloned().unwrap_or_default());

        assert_eq!(result, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_shortest_path_prefers_fewer_hops() {
        // 0-1-3, 0-2-4-3
        let graph = Graph::from_edges(false, &[(0, 1), (0, 2), (1, 3), (2, 4), (4, 3)]);

        assert_eq!(shortest_path(&graph, 0, 3), Some(vec![0, 1, 3]));
        assert_eq!(shortest_path(&graph, 4, 0), Some(vec![4, 2, 0]));
    }

    #[test]
    fn test_shortest_path_same_node() {
        let graph = Graph::from_edges(false, &[(0, 1)]);
        assert_eq!(shortest_path(&graph, 1, 1), Some(vec![1]));
    }

    #[test]
    fn test_shortest_path_none_when_disconnected() {
        let graph = Graph::from_edges(false, &[(0, 1), (2, 3)]);

        assert_eq!(shortest_path(&graph, 0, 3), None);
        assert!(!has_path(&graph, 0, 2));
        assert_eq!(shortest_path(&graph, 0, 42), None);
    }

    #[test]
    fn test_shortest_path_directed() {
        let graph = Graph::from_edges(true, &[(0, 1), (1, 2)]);

        assert_eq!(shortest_path(&graph, 0, 2), Some(vec![0, 1, 2]));
        assert_eq!(shortest_path(&graph, 2, 0), None);
    }

    #[test]
    fn test_connected_components() {
        let mut graph = Graph::from_edges(false, &[(0, 1), (2, 3), (3, 4)]);
        graph.insert_node(5);

        assert_eq!(
            connected_components(&graph),
            vec![vec![0, 1], vec![2, 3, 4], vec![5]]
        );
        assert!(!is_connected(&graph));
    }

    #[test]
    fn test_directed_components_are_weak() {
        let graph = Graph::from_edges(true, &[(1, 0), (2, 0)]);

        assert_eq!(connected_components(&graph), vec![vec![0, 1, 2]]);
        assert!(is_connected(&graph));
    }

    #[test]
    fn test_empty_graph_is_connected() {
        assert!(is_connected(&Graph::undirected()));
    }
}
