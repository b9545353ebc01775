//! Propsim Units MCP Server
//!
//! Line-delimited JSON-RPC over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a number or nested array between units
//! - validate_units: Check whether two units are convertible
//! - list_units: List the registry grouped by category
//! - compatible_units: List units convertible with a given one

mod config;
mod protocol;
mod tools;

use std::io::{self, IsTerminal};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use tools::{Server, PROTOCOL_VERSION, SERVER_VERSION};

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(config.log_ansi)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let config = ServerConfig::from_env();
    init_tracing(&config);

    info!("Propsim Units MCP Server v{} started", SERVER_VERSION);
    info!("Protocol: {}", PROTOCOL_VERSION);
    debug!(stdin_terminal = io::stdin().is_terminal(), max_elements = config.max_elements, "startup");
    for setting in &config.rejected {
        warn!("ignoring invalid setting {}", setting);
    }

    let server = Server::new(config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("Server ready, waiting for requests...");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        debug!("Received: {} bytes", line.len());

        let Some(response) = server.handle_line(line) else {
            continue;
        };

        let mut payload = serde_json::to_vec(&response)?;
        payload.push(b'\n');
        stdout.write_all(&payload).await?;
        stdout.flush().await?;
        debug!(id = ?response.id, is_error = response.error.is_some(), "Responded");
    }

    info!("Client disconnected (EOF), shutting down");
    Ok(())
}
