//! Interactive session context
//!
//! Everything the presentation shell tracks for one learner: the graph, the
//! selected discipline and start node, the recorded step sequence with its
//! scrub cursor, and the tutoring conversation. A session is owned by exactly
//! one client and never shared.
//!
//! Any change that affects traversal output (discipline, start node, a
//! successful graph edit, a new graph) discards the recorded sequence.

pub mod status;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::graph::{edit, is_connected, Graph, GraphStore, NodeId};
use crate::recorder::{record, Discipline, Step, StepSequence};
use crate::tutor::{ChatMessage, LearnerLevel};

pub use status::{node_statuses, status_text, NodeState, NodeStatus};

/// Counts and connectivity shown next to the editor
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInfo {
    pub nodes: usize,
    pub edges: usize,
    pub directed: bool,
    pub connected: bool,
}

#[derive(Debug)]
pub struct Session {
    graph: Graph,
    discipline: Discipline,
    start_node: NodeId,
    level: LearnerLevel,
    steps: Option<StepSequence>,
    cursor: usize,
    conversation: Vec<ChatMessage>,
}

impl Session {
    /// Start a session on `graph`; the start node is its smallest node (or 0)
    pub fn new(graph: Graph) -> Self {
        let start_node = graph.nodes().first().copied().unwrap_or(0);
        Self {
            graph,
            discipline: Discipline::default(),
            start_node,
            level: LearnerLevel::default(),
            steps: None,
            cursor: 0,
            conversation: Vec::new(),
        }
    }

    // === SELECTION ===

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn level(&self) -> LearnerLevel {
        self.level
    }

    pub fn set_discipline(&mut self, discipline: Discipline) {
        if discipline != self.discipline {
            self.discipline = discipline;
            self.invalidate();
        }
    }

    /// Select a start node. Membership is checked when recording.
    pub fn set_start_node(&mut self, node: NodeId) {
        if node != self.start_node {
            self.start_node = node;
            self.invalidate();
        }
    }

    pub fn set_level(&mut self, level: LearnerLevel) {
        self.level = level;
    }

    /// Swap in a new graph and reset the start node
    pub fn replace_graph(&mut self, graph: Graph) {
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "session graph replaced"
        );
        self.start_node = graph.nodes().first().copied().unwrap_or(0);
        self.graph = graph;
        self.invalidate();
    }

    // === EDITING ===

    pub fn add_node(&mut self) -> NodeId {
        let id = edit::add_node(&mut self.graph);
        self.invalidate();
        id
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        self.after_edit(|graph| edit::add_edge(graph, a, b))
    }

    /// Remove a node; removing the start node moves the start to the
    /// smallest remaining node
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        let changed = self.after_edit(|graph| edit::remove_node(graph, node));
        if changed && node == self.start_node {
            self.start_node = self.graph.nodes().first().copied().unwrap_or(0);
        }
        changed
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        self.after_edit(|graph| edit::remove_edge(graph, a, b))
    }

    fn after_edit<F>(&mut self, apply: F) -> bool
    where
        F: FnOnce(&mut Graph) -> bool,
    {
        let changed = apply(&mut self.graph);
        if changed {
            self.invalidate();
        }
        changed
    }

    fn invalidate(&mut self) {
        if self.steps.take().is_some() {
            debug!("recorded steps invalidated");
        }
        self.cursor = 0;
    }

    // === RECORDING & SCRUBBING ===

    /// Record the traversal for the current selection; the cursor returns
    /// to the first step. On failure the previous sequence is discarded.
    pub fn run(&mut self) -> Result<&StepSequence> {
        self.invalidate();
        let sequence = record(&self.graph, self.start_node, self.discipline)?;
        info!(
            discipline = %self.discipline,
            start = self.start_node,
            steps = sequence.len(),
            "traversal recorded"
        );
        Ok(self.steps.insert(sequence))
    }

    pub fn steps(&self) -> Option<&StepSequence> {
        self.steps.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move to `index`, clamped to `[0, len - 1]`
    pub fn seek(&mut self, index: usize) -> Option<&Step> {
        let sequence = self.steps.as_ref()?;
        self.cursor = sequence.clamp_index(index);
        sequence.get(self.cursor)
    }

    pub fn next(&mut self) -> Option<&Step> {
        self.seek(self.cursor.saturating_add(1))
    }

    pub fn previous(&mut self) -> Option<&Step> {
        self.seek(self.cursor.saturating_sub(1))
    }

    pub fn first(&mut self) -> Option<&Step> {
        self.seek(0)
    }

    pub fn last(&mut self) -> Option<&Step> {
        self.seek(usize::MAX)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.steps.as_ref().and_then(|s| s.get(self.cursor))
    }

    // === DISPLAY HELPERS ===

    pub fn node_statuses(&self) -> Vec<NodeStatus> {
        node_statuses(&self.graph, self.current_step())
    }

    pub fn status_text(&self) -> String {
        status_text(&self.node_statuses(), self.discipline)
    }

    pub fn graph_info(&self) -> GraphInfo {
        GraphInfo {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            directed: self.graph.is_directed(),
            connected: is_connected(&self.graph),
        }
    }

    // === CONVERSATION ===

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    /// History to send for a new question: prior turns plus the question
    pub fn conversation_with(&self, question: &str) -> Vec<ChatMessage> {
        let mut history = self.conversation.clone();
        history.push(ChatMessage::user(question));
        history
    }

    /// Store a completed question/answer pair
    pub fn record_exchange(&mut self, question: &str, reply: &str) {
        self.conversation.push(ChatMessage::user(question));
        self.conversation.push(ChatMessage::assistant(reply));
    }

    pub fn clear_conversation(&mut self) {
        self.conversation.clear();
    }
}
