//! MCP Server implementation
//!
//! This module exposes the [`Dispatcher`] over rmcp's `ServerHandler` trait
//! and owns the shutdown sweep of open connections.

use std::sync::Arc;

use rmcp::{
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
    ErrorData as McpError,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::ssh::{RusshTransport, Transport};
use crate::tools::{Dispatcher, ToolContext};

/// SSH MCP Server
///
/// Cloning is cheap; clones share the connection table.
#[derive(Debug, Clone)]
pub struct SshMcpServer {
    dispatcher: Dispatcher,
}

impl SshMcpServer {
    /// Create a server backed by the russh transport
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Arc::new(RusshTransport::new()))
    }

    /// Create a server backed by any transport implementation
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let ctx = Arc::new(ToolContext::new(config, transport));
        Self {
            dispatcher: Dispatcher::new(ctx),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Close every open connection (best-effort)
    pub async fn shutdown(&self) {
        info!("Shutting down SSH MCP Server...");
        let closed = self.dispatcher.context().close_all().await;
        info!("Closed {} connection(s)", closed);
    }
}

impl ServerHandler for SshMcpServer {
    /// Return server information
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "SSH MCP Server v{} - call `connect` first, then use the returned \
                 connection id with execute, upload, download, list and disconnect.",
                env!("CARGO_PKG_VERSION"),
            )),
        }
    }

    /// List available tools
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        debug!("list_tools called");

        Ok(ListToolsResult {
            tools: self.dispatcher.tools(),
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// Call a tool
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();
        Ok(self.dispatcher.call(request.name.as_ref(), args).await)
    }
}
