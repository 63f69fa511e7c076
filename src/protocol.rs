//! Tutor server protocol
//!
//! Frames:
//!   Request:  [4-byte length BE] [MessagePack payload]
//!   Response: [4-byte length BE] [MessagePack payload]
//!
//! Each connection owns one [`Session`]; requests on a connection are handled
//! strictly one at a time.

use std::io::{Read, Write};

use rand::thread_rng;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::content::AlgorithmProperties;
use crate::graph::{sample_graph, shortest_path, Graph, GraphDefinition, GraphStore, NodeId, SampleOptions};
use crate::recorder::{Discipline, Step};
use crate::session::{GraphInfo, NodeStatus, Session};
use crate::tutor::{degrade, ChatTransport, Evaluation, LearnerLevel, Tutor};

/// Upper bound for a single frame
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Upper bound for graphs generated or loaded on request
pub const MAX_GRAPH_NODES: u32 = 1000;

// ============================================================================
// Wire Protocol Types
// ============================================================================

/// Request from client
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum Request {
    // Graph setup
    #[serde(rename_all = "camelCase")]
    NewGraph {
        num_nodes: Option<u32>,
        edge_probability: Option<f64>,
        directed: Option<bool>,
    },
    LoadGraph { definition: GraphDefinition },
    LoadPreset { name: String },
    GetGraph,
    GraphInfo,

    // Editing
    AddNode,
    AddEdge { src: NodeId, dst: NodeId },
    RemoveNode { id: NodeId },
    RemoveEdge { src: NodeId, dst: NodeId },

    // Selection
    SetAlgorithm { algorithm: Discipline },
    SetStartNode { node: NodeId },
    SetLevel { level: LearnerLevel },

    // Recording and scrubbing
    Run,
    GetSteps,
    Seek { index: usize },
    Next,
    Previous,
    First,
    Last,
    CurrentStep,
    NodeStatus,

    // Informational
    ShortestPath { src: NodeId, dst: NodeId },
    Properties { algorithm: Option<Discipline> },

    // Dialogue
    Explain,
    Hint { question: String },
    Ask { question: String },
    ClearConversation,
    #[serde(rename_all = "camelCase")]
    Evaluate {
        answer: String,
        correct_answer: String,
        context: Option<String>,
    },

    // Control
    Ping,
    Shutdown,
}

/// Response to client
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ok { ok: bool },
    Error { error: String },
    Changed { changed: bool },
    Node { id: NodeId },
    Graph { graph: WireGraph },
    Info { info: GraphInfo },
    Step { step: StepView },
    Steps { discipline: Discipline, start: NodeId, steps: Vec<Step> },
    Statuses { statuses: Vec<NodeStatus>, text: String },
    Path { path: Option<Vec<NodeId>> },
    Properties { properties: &'static AlgorithmProperties },
    Text { text: String },
    Evaluation { evaluation: Evaluation },
    Pong { pong: bool, version: String },
}

/// Graph as node and edge lists
#[derive(Debug, Serialize)]
pub struct WireGraph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
    pub directed: bool,
}

/// A step with its scrub position
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub index: usize,
    pub total: usize,
    pub discipline: Discipline,
    pub step: Step,
}

impl From<&Graph> for WireGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes(),
            edges: graph.edges(),
            directed: graph.is_directed(),
        }
    }
}

// ============================================================================
// Request Handler
// ============================================================================

/// Shared, read-only state for all connections
pub struct ServerContext<T: ChatTransport> {
    pub tutor: Tutor<T>,
    pub runtime: Handle,
    pub sample: SampleOptions,
}

const NO_STEPS: &str = "No traversal recorded. Run the algorithm first.";

fn step_response(session: &Session) -> Response {
    match (session.steps(), session.current_step()) {
        (Some(sequence), Some(step)) => Response::Step {
            step: StepView {
                index: session.cursor(),
                total: sequence.len(),
                discipline: sequence.discipline(),
                step: step.clone(),
            },
        },
        _ => Response::Error { error: NO_STEPS.to_string() },
    }
}

fn graph_too_large(nodes: u32) -> Option<Response> {
    (nodes > MAX_GRAPH_NODES).then(|| Response::Error {
        error: format!("Graph too large: {} nodes (limit {})", nodes, MAX_GRAPH_NODES),
    })
}

fn scrub_response(session: &mut Session, moved: fn(&mut Session) -> bool) -> Response {
    if moved(session) {
        step_response(session)
    } else {
        Response::Error { error: NO_STEPS.to_string() }
    }
}

pub fn handle_request<T: ChatTransport>(
    ctx: &ServerContext<T>,
    session: &mut Session,
    request: Request,
) -> Response {
    match request {
        // Graph setup
        Request::NewGraph { num_nodes, edge_probability, directed } => {
            let options = SampleOptions {
                num_nodes: num_nodes.unwrap_or(ctx.sample.num_nodes),
                edge_probability: edge_probability.unwrap_or(ctx.sample.edge_probability),
                directed: directed.unwrap_or(ctx.sample.directed),
            };
            if let Some(rejected) = graph_too_large(options.num_nodes) {
                return rejected;
            }
            session.replace_graph(sample_graph(&options, &mut thread_rng()));
            Response::Graph { graph: session.graph().into() }
        }
        Request::LoadGraph { definition } => {
            if let Some(rejected) = graph_too_large(definition.nodes) {
                return rejected;
            }
            match Graph::from_definition(&definition) {
                Ok(graph) => {
                    session.replace_graph(graph);
                    Response::Graph { graph: session.graph().into() }
                }
                Err(e) => Response::Error { error: e.to_string() },
            }
        }
        Request::LoadPreset { name } => {
            let loaded = GraphDefinition::preset(&name)
                .map(|definition| Graph::from_definition(&definition));
            match loaded {
                Some(Ok(graph)) => {
                    session.replace_graph(graph);
                    Response::Graph { graph: session.graph().into() }
                }
                Some(Err(e)) => Response::Error { error: e.to_string() },
                None => Response::Error {
                    error: format!(
                        "Unknown preset {:?}; expected one of {:?}",
                        name,
                        GraphDefinition::preset_names()
                    ),
                },
            }
        }
        Request::GetGraph => Response::Graph { graph: session.graph().into() },
        Request::GraphInfo => Response::Info { info: session.graph_info() },

        // Editing
        Request::AddNode => Response::Node { id: session.add_node() },
        Request::AddEdge { src, dst } => Response::Changed { changed: session.add_edge(src, dst) },
        Request::RemoveNode { id } => Response::Changed { changed: session.remove_node(id) },
        Request::RemoveEdge { src, dst } => {
            Response::Changed { changed: session.remove_edge(src, dst) }
        }

        // Selection
        Request::SetAlgorithm { algorithm } => {
            session.set_discipline(algorithm);
            Response::Ok { ok: true }
        }
        Request::SetStartNode { node } => {
            session.set_start_node(node);
            Response::Ok { ok: true }
        }
        Request::SetLevel { level } => {
            session.set_level(level);
            Response::Ok { ok: true }
        }

        // Recording and scrubbing
        Request::Run => match session.run() {
            Ok(_) => step_response(session),
            Err(e) => Response::Error { error: e.to_string() },
        },
        Request::GetSteps => match session.steps() {
            Some(sequence) => Response::Steps {
                discipline: sequence.discipline(),
                start: sequence.start(),
                steps: sequence.steps().to_vec(),
            },
            None => Response::Error { error: NO_STEPS.to_string() },
        },
        Request::Seek { index } => {
            if session.seek(index).is_some() {
                step_response(session)
            } else {
                Response::Error { error: NO_STEPS.to_string() }
            }
        }
        Request::Next => scrub_response(session, |s| s.next().is_some()),
        Request::Previous => scrub_response(session, |s| s.previous().is_some()),
        Request::First => scrub_response(session, |s| s.first().is_some()),
        Request::Last => scrub_response(session, |s| s.last().is_some()),
        Request::CurrentStep => step_response(session),
        Request::NodeStatus => Response::Statuses {
            statuses: session.node_statuses(),
            text: session.status_text(),
        },

        // Informational
        Request::ShortestPath { src, dst } => Response::Path {
            path: shortest_path(session.graph(), src, dst),
        },
        Request::Properties { algorithm } => Response::Properties {
            properties: algorithm.unwrap_or(session.discipline()).properties(),
        },

        // Dialogue
        Request::Explain => {
            let Some(step) = session.current_step().cloned() else {
                return Response::Error { error: NO_STEPS.to_string() };
            };
            let result = ctx.runtime.block_on(ctx.tutor.explain_step(
                session.discipline(),
                &step,
                session.level(),
            ));
            Response::Text { text: degrade(result, "explanation") }
        }
        Request::Hint { question } => {
            let result = ctx.runtime.block_on(ctx.tutor.hint(
                &question,
                session.discipline(),
                session.level(),
            ));
            Response::Text { text: degrade(result, "hint") }
        }
        Request::Ask { question } => {
            let history = session.conversation_with(&question);
            let result = ctx.runtime.block_on(ctx.tutor.chat(
                &history,
                session.discipline(),
                session.level(),
            ));
            if let Ok(reply) = &result {
                session.record_exchange(&question, reply);
            }
            Response::Text { text: degrade(result, "response") }
        }
        Request::ClearConversation => {
            session.clear_conversation();
            Response::Ok { ok: true }
        }
        Request::Evaluate { answer, correct_answer, context } => {
            let evaluation = ctx.runtime.block_on(ctx.tutor.evaluate_answer(
                &answer,
                &correct_answer,
                session.discipline(),
                context.as_deref(),
            ));
            Response::Evaluation { evaluation }
        }

        // Control
        Request::Ping => Response::Pong {
            pong: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        // Handled by the connection loop
        Request::Shutdown => Response::Ok { ok: true },
    }
}

// ============================================================================
// Framing
// ============================================================================

pub fn read_message<R: Read>(stream: &mut R) -> std::io::Result<Option<Vec<u8>>> {
    // Read 4-byte length prefix (big-endian)
    let mut len_buf = [0u8; 4];
    match stream.read_exact(&mut len_buf) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Message too large: {} bytes", len),
        ));
    }

    let mut buf = vec![0u8; len];
    stream.read_exact(&mut buf)?;

    Ok(Some(buf))
}

pub fn write_message<W: Write>(stream: &mut W, data: &[u8]) -> std::io::Result<()> {
    let len = u32::try_from(data.len()).map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Message too large")
    })?;
    stream.write_all(&len.to_be_bytes())?;
    stream.write_all(data)?;
    stream.flush()?;
    Ok(())
}

/// Outcome of a finished connection
#[derive(Debug, PartialEq, Eq)]
pub enum ConnectionEnd {
    Disconnected,
    ShutdownRequested,
}

/// Serve one client until it disconnects or requests shutdown
pub fn serve_connection<S, T>(
    stream: &mut S,
    ctx: &ServerContext<T>,
    session: &mut Session,
    client_id: usize,
) -> std::io::Result<ConnectionEnd>
where
    S: Read + Write,
    T: ChatTransport,
{
    info!(client_id, "client connected");

    loop {
        let msg = match read_message(stream)? {
            Some(msg) => msg,
            None => {
                info!(client_id, "client disconnected");
                return Ok(ConnectionEnd::Disconnected);
            }
        };

        let response = match rmp_serde::from_slice::<Request>(&msg) {
            Ok(request) => {
                debug!(client_id, ?request, "request");
                let is_shutdown = matches!(request, Request::Shutdown);
                let response = handle_request(ctx, session, request);
                if is_shutdown {
                    send(stream, &response)?;
                    info!(client_id, "shutdown requested");
                    return Ok(ConnectionEnd::ShutdownRequested);
                }
                response
            }
            Err(e) => {
                warn!(client_id, "invalid request: {}", e);
                Response::Error { error: format!("Invalid request: {}", e) }
            }
        };

        send(stream, &response)?;
    }
}

fn send<W: Write>(stream: &mut W, response: &Response) -> std::io::Result<()> {
    let bytes = rmp_serde::to_vec_named(response)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    write_message(stream, &bytes)
}
