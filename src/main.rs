//! SSH MCP Server - Entry point
//!
//! Parses CLI arguments, validates configuration, starts the MCP server on
//! stdio transport, and closes every open SSH connection on shutdown.

use clap::Parser;
use rmcp::service::ServiceExt;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use remote_ssh_mcp::config::{Args, Config};
use remote_ssh_mcp::error::{Result, SshMcpError};
use remote_ssh_mcp::server::SshMcpServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Validate and create config
    let config = Config::from_args(args)?;

    // Initialize tracing/logging to stderr (stdout is for MCP JSON-RPC)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| SshMcpError::config(format!("Invalid log filter: {}", e)))?;
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("SSH MCP Server v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        "Connect timeout: {}s, command timeout: {}ms, max chars: {}",
        config.connect_timeout_secs,
        config.timeout_ms,
        config
            .max_chars
            .map_or("unlimited".to_string(), |n| n.to_string())
    );

    let server = SshMcpServer::new(config);

    // Create a clone for the shutdown handler
    let server_for_shutdown = server.clone();

    // Spawn a task to handle shutdown signals
    let shutdown_handle = tokio::spawn(async move {
        wait_for_signal().await;
        server_for_shutdown.shutdown().await;
        info!("SSH MCP Server stopped");
        std::process::exit(0);
    });

    // Start the MCP server on stdio transport
    info!("SSH MCP Server running on stdio");
    match server.clone().serve(rmcp::transport::io::stdio()).await {
        Ok(running_server) => {
            if let Err(e) = running_server.waiting().await {
                error!("Server error: {}", e);
            }
        }
        Err(e) => {
            error!("Failed to start MCP server: {}", e);
            return Err(SshMcpError::config(format!(
                "Failed to start MCP server: {}",
                e
            )));
        }
    }

    // stdin closed: cancel the signal handler and clean up ourselves
    shutdown_handle.abort();
    server.shutdown().await;

    info!("SSH MCP Server stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received SIGINT (Ctrl+C), shutting down...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down...");
                    }
                }
                return;
            }
            Err(e) => warn!("Failed to register SIGTERM handler: {}", e),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received SIGINT (Ctrl+C), shutting down...");
}
