//! Property-based tests for recorded step sequences

use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::graph::traversal::bfs;
use crate::graph::Graph;

/// Strategy: up to 12 nodes, random edge list, random direction
fn graph_strategy() -> impl Strategy<Value = Graph> {
    (1u32..12, any::<bool>()).prop_flat_map(|(nodes, directed)| {
        prop::collection::vec((0..nodes, 0..nodes), 0..30).prop_map(move |edges| {
            let mut graph = Graph::from_edges(directed, &edges);
            for id in 0..nodes {
                graph.insert_node(id);
            }
            graph
        })
    })
}

fn discipline_strategy() -> impl Strategy<Value = Discipline> {
    prop_oneof![Just(Discipline::DepthFirst), Just(Discipline::BreadthFirst)]
}

proptest! {
    #[test]
    fn test_final_visited_is_reachable_set(
        graph in graph_strategy(),
        discipline in discipline_strategy(),
        seed in any::<u32>()
    ) {
        let nodes = graph.nodes();
        let start = nodes[seed as usize % nodes.len()];
        let sequence = record(&graph, start, discipline).unwrap();

        let order = sequence.visit_order();
        let unique: BTreeSet<NodeId> = order.iter().copied().collect();
        prop_assert_eq!(unique.len(), order.len(), "duplicates in {:?}", order);

        let reachable: BTreeSet<NodeId> =
            bfs(&[start], |id| graph.neighbors(id)).into_iter().collect();
        prop_assert_eq!(unique, reachable);
        prop_assert_eq!(order.first().copied(), Some(start));
    }

    #[test]
    fn test_visited_never_shrinks_or_moves(
        graph in graph_strategy(),
        discipline in discipline_strategy()
    ) {
        let start = graph.nodes()[0];
        let sequence = record(&graph, start, discipline).unwrap();

        for pair in sequence.steps().windows(2) {
            let (before, after) = (&pair[0].visited, &pair[1].visited);
            prop_assert!(after.len() >= before.len());
            prop_assert_eq!(&after[..before.len()], before.as_slice());
        }
    }

    #[test]
    fn test_bookends_frame_the_sequence(
        graph in graph_strategy(),
        discipline in discipline_strategy()
    ) {
        let start = graph.nodes()[0];
        let sequence = record(&graph, start, discipline).unwrap();

        prop_assert_eq!(sequence.first().kind, StepKind::Start);
        prop_assert_eq!(&sequence.first().frontier_snapshot, &vec![start]);
        prop_assert_eq!(sequence.last().kind, StepKind::Finish);
        prop_assert!(sequence.last().frontier_snapshot.is_empty());
        prop_assert!(sequence.last().current.is_none());
    }

    #[test]
    fn test_record_is_deterministic(
        graph in graph_strategy(),
        discipline in discipline_strategy()
    ) {
        let start = graph.nodes()[0];
        let first = record(&graph, start, discipline).unwrap();
        let second = record(&graph.clone(), start, discipline).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_path_graph_orders_agree(len in 1u32..20) {
        let edges: Vec<(NodeId, NodeId)> = (1..len).map(|i| (i - 1, i)).collect();
        let mut graph = Graph::from_edges(false, &edges);
        graph.insert_node(0);

        let dfs = record(&graph, 0, Discipline::DepthFirst).unwrap();
        let bfs = record(&graph, 0, Discipline::BreadthFirst).unwrap();
        let expected: Vec<NodeId> = (0..len).collect();

        prop_assert_eq!(dfs.visit_order(), expected.as_slice());
        prop_assert_eq!(bfs.visit_order(), expected.as_slice());
    }
}
