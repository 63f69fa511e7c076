//! gtutor - stepwise graph traversal recorder with a tutoring dialogue
//!
//! # Architecture
//!
//! - **Graph model**: ordered adjacency maps behind the `GraphStore` trait
//! - **Recorder**: DFS/BFS that emits a replayable `StepSequence`
//! - **Session**: per-learner graph, selection, scrub cursor and conversation
//! - **Tutor**: chat-completion backend for explanations, hints and grading
//! - **Protocol**: length-prefixed MessagePack requests served over a Unix socket
//!
//! # Usage example
//!
//! ```
//! use gtutor::{record, Discipline, Graph, GraphDefinition};
//!
//! # fn main() -> gtutor::Result<()> {
//! let graph = Graph::from_definition(&GraphDefinition::tree())?;
//! let steps = record(&graph, 0, Discipline::DepthFirst)?;
//!
//! assert_eq!(steps.visit_order(), &[0, 1, 3, 2, 4]);
//! for step in &steps {
//!     println!("{}", step.narration);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod graph;
pub mod protocol;
pub mod recorder;
pub mod session;
pub mod tutor;

pub use config::TutorConfig;
pub use content::AlgorithmProperties;
pub use error::{Result, TutorError};
pub use graph::{Graph, GraphDefinition, GraphStore, NodeId, SampleOptions};
pub use recorder::{record, Discipline, Step, StepKind, StepSequence};
pub use session::Session;
pub use tutor::{Evaluation, LearnerLevel, Tutor};
