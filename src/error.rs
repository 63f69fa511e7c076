//! Error types for the tutor engine

use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, TutorError>;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Start node {0} is not in the graph")]
    InvalidStartNode(NodeId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Edge not found: {src} -> {dst}")]
    EdgeNotFound { src: NodeId, dst: NodeId },

    #[error("Dialogue unavailable: {0}")]
    DialogueUnavailable(String),

    #[error("Invalid graph definition: {0}")]
    InvalidDefinition(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TutorError {
    /// True when the dialogue failed because no API credential is configured
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, TutorError::DialogueUnavailable(reason) if reason == MISSING_API_KEY)
    }
}

/// Reason carried by `DialogueUnavailable` when no API key is set
pub const MISSING_API_KEY: &str = "API key is not set";
