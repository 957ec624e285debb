//! SSH client handler implementation
//!
//! Implements the `russh::client::Handler` trait to handle SSH connection events.

use tracing::debug;

/// SSH client handler for russh
///
/// Accepts every server host key. Host-key verification is left to the
/// network the server is deployed in; the presented key algorithm is logged
/// so it can be audited.
#[derive(Debug, Clone)]
pub struct SshHandler {
    /// `host:port` the handler was created for, used in log lines
    endpoint: String,
}

impl SshHandler {
    /// Create a handler for a connection to `host:port`
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            endpoint: format!("{}:{}", host, port),
        }
    }
}

impl russh::client::Handler for SshHandler {
    type Error = anyhow::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &russh::keys::PublicKey,
    ) -> Result<bool, Self::Error> {
        debug!(
            "Accepting {} host key from {}",
            server_public_key.algorithm().as_str(),
            self.endpoint
        );
        Ok(true)
    }
}
