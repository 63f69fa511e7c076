//! Recorder scenario tests

use super::*;
use crate::graph::{edit, Graph, GraphDefinition};

fn tree() -> Graph {
    Graph::from_definition(&GraphDefinition::tree()).unwrap()
}

fn kinds(sequence: &StepSequence) -> Vec<StepKind> {
    sequence.iter().map(|s| s.kind).collect()
}

// ============================================================================
// Visitation order
// ============================================================================

#[test]
fn test_dfs_tree_order() {
    let sequence = record(&tree(), 0, Discipline::DepthFirst).unwrap();
    assert_eq!(sequence.visit_order(), &[0, 1, 3, 2, 4]);
}

#[test]
fn test_bfs_tree_order() {
    let sequence = record(&tree(), 0, Discipline::BreadthFirst).unwrap();
    assert_eq!(sequence.visit_order(), &[0, 1, 2, 3, 4]);
}

#[test]
fn test_path_graph_same_order_for_both() {
    let graph = Graph::from_edges(false, &[(0, 1), (1, 2), (2, 3)]);

    let dfs = record(&graph, 0, Discipline::DepthFirst).unwrap();
    let bfs = record(&graph, 0, Discipline::BreadthFirst).unwrap();

    assert_eq!(dfs.visit_order(), &[0, 1, 2, 3]);
    assert_eq!(dfs.visit_order(), bfs.visit_order());
}

#[test]
fn test_disconnected_component_never_visited() {
    let graph = Graph::from_edges(false, &[(0, 1), (2, 3)]);

    for discipline in [Discipline::DepthFirst, Discipline::BreadthFirst] {
        let sequence = record(&graph, 0, discipline).unwrap();
        assert_eq!(sequence.visit_order(), &[0, 1]);
        for step in &sequence {
            assert!(!step.visited.contains(&2));
            assert!(!step.visited.contains(&3));
            assert!(!step.frontier_snapshot.contains(&2));
        }
    }
}

#[test]
fn test_cycle_graph_terminates() {
    let graph = Graph::from_definition(&GraphDefinition::cycle()).unwrap();

    let dfs = record(&graph, 0, Discipline::DepthFirst).unwrap();
    let bfs = record(&graph, 0, Discipline::BreadthFirst).unwrap();

    // DFS neighbors of 0 are [2, 1]; 1 is on top of the stack
    assert_eq!(dfs.visit_order(), &[0, 1, 3, 2]);
    assert_eq!(bfs.visit_order(), &[0, 1, 2, 3]);
}

#[test]
fn test_directed_graph_follows_edge_direction() {
    let graph = Graph::from_definition(&GraphDefinition::directed_cycle()).unwrap();

    let from_zero = record(&graph, 0, Discipline::BreadthFirst).unwrap();
    assert_eq!(from_zero.visit_order(), &[0, 1, 3, 2, 4]);

    let from_four = record(&graph, 4, Discipline::DepthFirst).unwrap();
    assert_eq!(from_four.visit_order(), &[4]);
}

#[test]
fn test_single_isolated_node() {
    let mut graph = Graph::undirected();
    edit::add_node(&mut graph);

    let sequence = record(&graph, 0, Discipline::DepthFirst).unwrap();

    assert_eq!(kinds(&sequence), vec![StepKind::Start, StepKind::Visit, StepKind::Finish]);
    assert_eq!(sequence.visit_order(), &[0]);
    assert_eq!(
        sequence.get(1).unwrap().narration,
        "Visit node 0 and mark it as visited. Examine its neighbors: []."
    );
}

// ============================================================================
// Step structure
// ============================================================================

#[test]
fn test_dfs_tree_step_by_step() {
    let sequence = record(&tree(), 0, Discipline::DepthFirst).unwrap();

    assert_eq!(
        kinds(&sequence),
        vec![
            StepKind::Start,
            StepKind::Visit,  // 0
            StepKind::Expand, // push 2, 1
            StepKind::Visit,  // 1
            StepKind::Expand, // push 3
            StepKind::Visit,  // 3
            StepKind::Visit,  // 2
            StepKind::Expand, // push 4
            StepKind::Visit,  // 4
            StepKind::Finish,
        ]
    );

    let start = sequence.first();
    assert!(start.visited.is_empty());
    assert_eq!(start.current, None);
    assert_eq!(start.frontier_snapshot, vec![0]);
    assert!(start.edges_discovered.is_empty());

    let visit_zero = sequence.get(1).unwrap();
    assert_eq!(visit_zero.current, Some(0));
    assert!(visit_zero.frontier_snapshot.is_empty());
    assert_eq!(
        visit_zero.narration,
        "Visit node 0 and mark it as visited. Examine its neighbors: [2, 1]."
    );

    let expand_zero = sequence.get(2).unwrap();
    assert_eq!(expand_zero.edges_discovered, vec![(0, 2), (0, 1)]);
    assert_eq!(expand_zero.frontier_snapshot, vec![2, 1]);
    assert_eq!(
        expand_zero.narration,
        "Add unvisited neighbors [2, 1] to the stack for later processing."
    );

    let expand_one = sequence.get(4).unwrap();
    assert_eq!(expand_one.edges_discovered, vec![(1, 3)]);
    assert_eq!(expand_one.frontier_snapshot, vec![2, 3]);

    let finish = sequence.last();
    assert_eq!(finish.current, None);
    assert!(finish.frontier_snapshot.is_empty());
    assert_eq!(
        finish.narration,
        "DFS complete. All reachable nodes have been visited in this order: [0, 1, 3, 2, 4]."
    );
}

#[test]
fn test_bfs_queue_snapshots() {
    let sequence = record(&tree(), 0, Discipline::BreadthFirst).unwrap();

    let expand_zero = sequence.get(2).unwrap();
    assert_eq!(expand_zero.kind, StepKind::Expand);
    assert_eq!(expand_zero.edges_discovered, vec![(0, 1), (0, 2)]);
    assert_eq!(expand_zero.frontier_snapshot, vec![1, 2]);

    // Visiting 1 removes it from the front of the queue
    let visit_one = sequence.get(3).unwrap();
    assert_eq!(visit_one.current, Some(1));
    assert_eq!(visit_one.frontier_snapshot, vec![2]);

    let expand_one = sequence.get(4).unwrap();
    assert_eq!(expand_one.frontier_snapshot, vec![2, 3]);

    assert!(sequence.first().narration.contains("to the queue"));
    assert!(sequence.last().narration.starts_with("BFS complete."));
}

#[test]
fn test_neighbor_already_in_frontier_is_not_rediscovered() {
    // 0 -> {1, 2}, 1 -> 2: when 1 is expanded, 2 is still queued
    let graph = Graph::from_edges(false, &[(0, 1), (0, 2), (1, 2)]);
    let sequence = record(&graph, 0, Discipline::BreadthFirst).unwrap();

    let discovered: Vec<(NodeId, NodeId)> = sequence
        .iter()
        .flat_map(|s| s.edges_discovered.iter().copied())
        .collect();
    assert_eq!(discovered, vec![(0, 1), (0, 2)]);
    assert!(sequence.iter().all(|s| s.kind != StepKind::Skip));
}

#[test]
fn test_only_expand_steps_carry_edges() {
    let sequence = record(&tree(), 0, Discipline::DepthFirst).unwrap();

    for step in &sequence {
        match step.kind {
            StepKind::Expand => assert!(!step.edges_discovered.is_empty()),
            _ => assert!(step.edges_discovered.is_empty()),
        }
    }
}

#[test]
fn test_visited_is_prefix_extended() {
    let graph = Graph::from_definition(&GraphDefinition::diamond()).unwrap();
    let sequence = record(&graph, 2, Discipline::DepthFirst).unwrap();

    for pair in sequence.steps().windows(2) {
        let (before, after) = (&pair[0].visited, &pair[1].visited);
        assert!(after.len() >= before.len());
        assert_eq!(&after[..before.len()], before.as_slice());
    }
}

// ============================================================================
// Errors, determinism, purity
// ============================================================================

#[test]
fn test_invalid_start_node() {
    let result = record(&tree(), 99, Discipline::DepthFirst);
    assert!(matches!(result, Err(TutorError::InvalidStartNode(99))));
}

#[test]
fn test_invalid_start_node_on_empty_graph() {
    let result = record(&Graph::undirected(), 0, Discipline::BreadthFirst);
    assert!(matches!(result, Err(TutorError::InvalidStartNode(0))));
}

#[test]
fn test_record_is_idempotent() {
    let graph = tree();
    let first = record(&graph, 0, Discipline::DepthFirst).unwrap();
    let second = record(&graph, 0, Discipline::DepthFirst).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_record_does_not_mutate_graph() {
    let graph = tree();
    let before = graph.clone();

    record(&graph, 0, Discipline::BreadthFirst).unwrap();

    assert_eq!(graph, before);
}

#[test]
fn test_sequence_metadata_and_clamping() {
    let sequence = record(&tree(), 1, Discipline::BreadthFirst).unwrap();

    assert_eq!(sequence.discipline(), Discipline::BreadthFirst);
    assert_eq!(sequence.start(), 1);
    assert_eq!(sequence.clamp_index(1000), sequence.len() - 1);
    assert_eq!(sequence.at(1000), sequence.last());
    assert!(sequence.get(sequence.len()).is_none());
}

#[test]
fn test_discipline_serde_names() {
    assert_eq!(serde_json::to_string(&Discipline::DepthFirst).unwrap(), "\"DFS\"");
    let parsed: Discipline = serde_json::from_str("\"bfs\"").unwrap();
    assert_eq!(parsed, Discipline::BreadthFirst);
}
