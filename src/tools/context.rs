//! State shared by every tool handler

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::connections::{ConnectionRecord, ConnectionTable};
use crate::error::{Result, SshMcpError};
use crate::ssh::{FileTransfer, Transport};

/// How long the shutdown sweep waits for one session to close
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration, transport and connection table for one server instance
pub struct ToolContext {
    pub config: Config,
    pub connections: ConnectionTable,
    transport: Arc<dyn Transport>,
}

impl ToolContext {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            connections: ConnectionTable::new(),
            transport,
        }
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Look up a connection, failing with `UnknownConnection`
    pub async fn connection(&self, id: &str) -> Result<ConnectionRecord> {
        self.connections
            .get(id)
            .await
            .ok_or_else(|| SshMcpError::unknown_connection(id))
    }

    /// Close every open connection. Failures are logged, never returned.
    pub async fn close_all(&self) -> usize {
        let records = self.connections.drain().await;
        if records.is_empty() {
            return 0;
        }

        info!("Closing {} open SSH connection(s)", records.len());
        let count = records.len();
        for (id, record) in records {
            match tokio::time::timeout(CLOSE_TIMEOUT, record.session.close()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    "Failed to close connection '{}' to {}: {:#}",
                    id, record.endpoint, e
                ),
                Err(_) => warn!(
                    "Timed out closing connection '{}' to {}",
                    id, record.endpoint
                ),
            }
        }
        count
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Open the SFTP subsystem on a connection, failing with `ChannelInit`
pub(crate) async fn open_sftp(record: &ConnectionRecord) -> Result<Box<dyn FileTransfer>> {
    record
        .session
        .open_sftp()
        .await
        .map_err(|e| SshMcpError::channel_init(format!("{:#}", e)))
}

/// Close an SFTP channel after use; the operation's outcome is already decided
pub(crate) async fn close_sftp(sftp: &dyn FileTransfer) {
    if let Err(e) = sftp.close().await {
        warn!("Failed to close SFTP channel: {:#}", e);
    }
}
