//! gtutor server - Unix socket front end for traversal tutoring sessions
//!
//! Each client gets its own session on a freshly sampled graph. Requests and
//! responses are length-prefixed MessagePack frames (see `gtutor::protocol`).
//!
//! Usage:
//!   tutor-server [--socket <socket-path>] [--config <config.json>]

use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use rand::thread_rng;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use gtutor::graph::sample_graph;
use gtutor::protocol::{serve_connection, ConnectionEnd, ServerContext};
use gtutor::session::Session;
use gtutor::tutor::{OpenAiTransport, Tutor};
use gtutor::TutorConfig;

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn handle_client(
    mut stream: UnixStream,
    ctx: Arc<ServerContext<OpenAiTransport>>,
    client_id: usize,
    socket_path: PathBuf,
) {
    let mut session = Session::new(sample_graph(&ctx.sample, &mut thread_rng()));

    match serve_connection(&mut stream, &ctx, &mut session, client_id) {
        Ok(ConnectionEnd::Disconnected) => {}
        Ok(ConnectionEnd::ShutdownRequested) => {
            let _ = std::fs::remove_file(&socket_path);
            info!("exiting on client request");
            std::process::exit(0);
        }
        Err(e) => warn!(client_id, "connection error: {}", e),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: tutor-server [--socket <socket-path>] [--config <config.json>]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --socket       Unix socket path (default: /tmp/gtutor.sock)");
        eprintln!("  --config       JSON configuration file");
        eprintln!();
        eprintln!("Environment: OPENAI_API_KEY, GTUTOR_API_BASE, GTUTOR_MODEL,");
        eprintln!("             GTUTOR_TIMEOUT_SECS, GTUTOR_SOCKET, GTUTOR_LOG");
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GTUTOR_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match arg_value(&args, "--config") {
        Some(path) => TutorConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => TutorConfig::from_env().context("Invalid environment configuration")?,
    };
    if let Some(socket) = arg_value(&args, "--socket") {
        config.socket_path = PathBuf::from(socket);
    }

    let transport = OpenAiTransport::from_config(&config).context("Failed to build HTTP client")?;
    if !transport.has_credential() {
        warn!("OPENAI_API_KEY is not set; dialogue requests will report that the tutor is unavailable");
    }

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let ctx = Arc::new(ServerContext {
        tutor: Tutor::new(transport),
        runtime: runtime.handle().clone(),
        sample: config.sample.clone(),
    });

    // Remove stale socket file
    let socket_path = config.socket_path.clone();
    let _ = std::fs::remove_file(&socket_path);

    let listener = UnixListener::bind(&socket_path)
        .with_context(|| format!("Failed to bind socket {}", socket_path.display()))?;
    info!(socket = %socket_path.display(), model = %config.model, "listening");

    let mut signals = signal_hook::iterator::Signals::new([
        signal_hook::consts::SIGINT,
        signal_hook::consts::SIGTERM,
    ])
    .context("Failed to register signal handlers")?;

    let socket_path_for_signal = socket_path.clone();
    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            info!(signal = sig, "received signal, exiting");
            let _ = std::fs::remove_file(&socket_path_for_signal);
            std::process::exit(0);
        }
    });

    // Accept connections
    let mut client_id = 0;
    for stream in listener.incoming() {
        match stream {
            Ok(stream) => {
                client_id += 1;
                let ctx = Arc::clone(&ctx);
                let socket_path = socket_path.clone();
                thread::spawn(move || handle_client(stream, ctx, client_id, socket_path));
            }
            Err(e) => error!("accept error: {}", e),
        }
    }

    Ok(())
}
