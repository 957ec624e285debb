//! `connect` tool

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::context::ToolContext;
use super::params::ConnectParams;
use crate::connections::{ConnectionRecord, Endpoint};
use crate::error::{Result, SshMcpError};
use crate::paths::expand_tilde;
use crate::ssh::{Credential, SshConfig};

/// Open a session and register it under the requested (or a generated) id.
///
/// A password takes precedence over a key path when both are given. If the
/// id is already in use, the old session is closed after the new one is
/// stored.
pub async fn connect(ctx: &ToolContext, params: ConnectParams) -> Result<String> {
    if params.host.trim().is_empty() {
        return Err(SshMcpError::invalid_params("host cannot be empty"));
    }
    if params.username.trim().is_empty() {
        return Err(SshMcpError::invalid_params("username cannot be empty"));
    }

    let credential = resolve_credential(&params).await?;
    let id = params
        .connection_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(generate_connection_id);

    let config = SshConfig {
        host: params.host,
        port: params.port,
        username: params.username,
        credential,
    };

    let secs = ctx.config.connect_timeout_secs;
    let session = match timeout(Duration::from_secs(secs), ctx.transport().connect(&config)).await
    {
        Ok(Ok(session)) => session,
        Ok(Err(e)) => {
            error!("SSH connection to {}:{} failed: {:#}", config.host, config.port, e);
            return Err(SshMcpError::connect(format!("{:#}", e)));
        }
        Err(_) => {
            error!("SSH connection timeout after {}s", secs);
            return Err(SshMcpError::connect(format!(
                "Connection timeout after {}s",
                secs
            )));
        }
    };

    let endpoint = Endpoint {
        host: config.host,
        port: config.port,
        username: config.username,
    };
    let record = ConnectionRecord {
        session,
        endpoint: endpoint.clone(),
    };

    if let Some(previous) = ctx.connections.put(&id, record).await {
        warn!(
            "Connection id '{}' reused, closing previous session to {}",
            id, previous.endpoint
        );
        if let Err(e) = previous.session.close().await {
            warn!("Failed to close replaced session: {:#}", e);
        }
    }

    info!("Connection '{}' established to {}", id, endpoint);
    Ok(format!(
        "Successfully connected to {} (connection id: {})",
        endpoint, id
    ))
}

/// Pick the credential, reading the key file if that is what was given
async fn resolve_credential(params: &ConnectParams) -> Result<Credential> {
    let password = params.password.as_deref().filter(|p| !p.is_empty());
    let key_path = params
        .private_key_path
        .as_deref()
        .filter(|p| !p.trim().is_empty());

    if let Some(password) = password {
        return Ok(Credential::Password(password.to_string()));
    }

    let Some(key_path) = key_path else {
        return Err(SshMcpError::MissingCredential);
    };

    let resolved = expand_tilde(key_path);
    debug!("Reading private key from {}", resolved.display());
    let content = tokio::fs::read_to_string(&resolved)
        .await
        .map_err(|e| SshMcpError::KeyRead(format!("{}: {}", resolved.display(), e)))?;

    Ok(Credential::PrivateKey {
        content,
        passphrase: params.passphrase.clone().filter(|p| !p.is_empty()),
    })
}

/// Per-process sequence appended to generated ids
static CONNECTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Time-derived default id, e.g. `ssh-1718000000000-0`.
///
/// The sequence suffix keeps ids unique when two connects land in the same
/// millisecond.
pub fn generate_connection_id() -> String {
    let seq = CONNECTION_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("ssh-{}-{}", Utc::now().timestamp_millis(), seq)
}
