//! `disconnect` tool

use tracing::info;

use super::context::ToolContext;
use super::params::DisconnectParams;
use crate::error::{Result, SshMcpError};

/// Forget a connection and close its session.
///
/// The entry is removed before closing, so a failed close still leaves the
/// id unknown.
pub async fn disconnect(ctx: &ToolContext, params: DisconnectParams) -> Result<String> {
    let id = params.connection_id;
    let record = ctx
        .connections
        .remove(&id)
        .await
        .ok_or_else(|| SshMcpError::unknown_connection(&id))?;

    record
        .session
        .close()
        .await
        .map_err(|e| SshMcpError::Disconnect(format!("{}: {:#}", record.endpoint, e)))?;

    info!("Connection '{}' to {} closed", id, record.endpoint);
    Ok(format!(
        "Disconnected from {} (connection id: {})",
        record.endpoint, id
    ))
}
