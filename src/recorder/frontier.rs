//! Pending-work container for one recording run

use std::collections::VecDeque;

use super::Discipline;
use crate::graph::NodeId;

/// Stack for depth-first, queue for breadth-first.
///
/// Both variants keep insertion order front-to-back, so a snapshot reads the
/// same way for either discipline: the oldest entry first.
#[derive(Debug)]
pub(crate) enum Frontier {
    Stack(Vec<NodeId>),
    Queue(VecDeque<NodeId>),
}

impl Frontier {
    pub fn new(discipline: Discipline, start: NodeId) -> Self {
        match discipline {
            Discipline::DepthFirst => Frontier::Stack(vec![start]),
            Discipline::BreadthFirst => Frontier::Queue(VecDeque::from([start])),
        }
    }

    /// Remove the last-inserted (stack) or first-inserted (queue) node
    pub fn take(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Stack(stack) => stack.pop(),
            Frontier::Queue(queue) => queue.pop_front(),
        }
    }

    pub fn insert(&mut self, node: NodeId) {
        match self {
            Frontier::Stack(stack) => stack.push(node),
            Frontier::Queue(queue) => queue.push_back(node),
        }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        match self {
            Frontier::Stack(stack) => stack.contains(&node),
            Frontier::Queue(queue) => queue.contains(&node),
        }
    }

    pub fn snapshot(&self) -> Vec<NodeId> {
        match self {
            Frontier::Stack(stack) => stack.clone(),
            Frontier::Queue(queue) => queue.iter().copied().collect(),
        }
    }
}
