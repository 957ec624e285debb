//! SSH MCP Server - A Model Context Protocol server for remote SSH administration
//!
//! This crate provides an MCP server that lets an agent drive any number of
//! SSH-reachable machines. Each `connect` call registers a session under a
//! connection id; the other tools operate on that id.
//!
//! # MCP Tools
//!
//! - `connect` - Open a session (password or private key authentication)
//! - `execute` - Run a shell command, with optional working directory and timeout
//! - `upload` / `download` - Whole-file transfer over SFTP
//! - `list` - Directory listing over SFTP
//! - `disconnect` - Close a session
//!
//! # Example Usage (CLI)
//!
//! ```bash
//! remote-ssh-mcp --timeout=120000 --maxChars=none
//! ```
//!
//! # Example Usage (MCP Inspector)
//!
//! ```bash
//! npx @modelcontextprotocol/inspector ./target/release/remote-ssh-mcp
//! ```

pub mod config;
pub mod connections;
pub mod error;
pub mod paths;
pub mod server;
pub mod ssh;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use config::{Args, Config};
pub use connections::{ConnectionRecord, ConnectionTable, Endpoint};
pub use error::{Result, SshMcpError};
pub use server::SshMcpServer;
pub use ssh::{
    CommandOutput, Credential, FileTransfer, RemoteSession, RusshTransport, SshConfig, Transport,
};
pub use tools::{Dispatcher, ToolContext, ToolKind};
