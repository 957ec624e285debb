//! russh-backed transport
//!
//! Opens authenticated sessions with russh and runs SFTP over a session
//! channel with russh-sftp.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::keys::{decode_secret_key, PrivateKeyWithHashAlg};
use russh::Channel;
use russh_sftp::client::SftpSession;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::command::{collect_channel_output, CommandOutput};
use super::config::{Credential, SshConfig};
use super::handler::SshHandler;
use super::sftp::RemoteEntry;
use super::transport::{FileTransfer, RemoteSession, Transport};

/// Production [`Transport`] built on russh
#[derive(Debug, Default, Clone)]
pub struct RusshTransport {
    config: Arc<client::Config>,
}

impl RusshTransport {
    /// Create a transport with russh's default client configuration
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for RusshTransport {
    async fn connect(&self, config: &SshConfig) -> anyhow::Result<Arc<dyn RemoteSession>> {
        info!(
            "Connecting to SSH server {}:{}...",
            config.host, config.port
        );

        let mut handle = client::connect(
            self.config.clone(),
            (config.host.as_str(), config.port),
            SshHandler::new(&config.host, config.port),
        )
        .await?;

        authenticate(&mut handle, config).await?;

        info!(
            "Successfully connected to {}@{}:{}",
            config.username, config.host, config.port
        );

        Ok(Arc::new(RusshSession {
            handle: Mutex::new(handle),
        }))
    }
}

/// Authenticate with the SSH server using the configured credential
async fn authenticate(handle: &mut Handle<SshHandler>, config: &SshConfig) -> anyhow::Result<()> {
    let auth_result = match &config.credential {
        Credential::Password(password) => {
            debug!(
                "Attempting password authentication for user '{}'",
                config.username
            );
            handle
                .authenticate_password(&config.username, password)
                .await?
        }
        Credential::PrivateKey {
            content,
            passphrase,
        } => {
            debug!(
                "Attempting key authentication for user '{}'",
                config.username
            );
            let key = decode_secret_key(content, passphrase.as_deref())
                .context("Failed to decode private key")?;
            let key_with_alg = PrivateKeyWithHashAlg::new(Arc::new(key), None);
            handle
                .authenticate_publickey(&config.username, key_with_alg)
                .await?
        }
    };

    if !auth_result.success() {
        bail!(
            "Authentication rejected for user '{}'",
            config.username
        );
    }
    Ok(())
}

/// A live russh session
///
/// The handle lock is held only while a channel is being opened, never for
/// the lifetime of a command or transfer.
pub struct RusshSession {
    handle: Mutex<Handle<SshHandler>>,
}

impl RusshSession {
    async fn open_channel(&self) -> anyhow::Result<Channel<client::Msg>> {
        let handle = self.handle.lock().await;
        handle
            .channel_open_session()
            .await
            .context("Failed to open channel")
    }
}

#[async_trait]
impl RemoteSession for RusshSession {
    async fn exec(&self, command: &str) -> anyhow::Result<CommandOutput> {
        let channel = self.open_channel().await?;
        channel
            .exec(true, command)
            .await
            .context("Failed to exec command")?;

        Ok(collect_channel_output(channel).await)
    }

    async fn open_sftp(&self) -> anyhow::Result<Box<dyn FileTransfer>> {
        let channel = self.open_channel().await?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .context("SFTP subsystem request failed")?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .map_err(|e| anyhow!("SFTP handshake failed: {}", e))?;

        debug!("SFTP channel opened");
        Ok(Box::new(RusshSftp { sftp }))
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.handle
            .lock()
            .await
            .disconnect(russh::Disconnect::ByApplication, "", "English")
            .await?;
        info!("SSH connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for RusshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RusshSession").finish_non_exhaustive()
    }
}

/// An SFTP channel on a [`RusshSession`]
struct RusshSftp {
    sftp: SftpSession,
}

#[async_trait]
impl FileTransfer for RusshSftp {
    async fn put(&self, local: &Path, remote: &str) -> anyhow::Result<()> {
        let mut source = tokio::fs::File::open(local)
            .await
            .with_context(|| format!("Failed to open {}", local.display()))?;
        let mut target = self
            .sftp
            .create(remote)
            .await
            .with_context(|| format!("Failed to create remote file {}", remote))?;

        let bytes = tokio::io::copy(&mut source, &mut target).await?;
        target.shutdown().await?;
        debug!("Uploaded {} bytes to {}", bytes, remote);
        Ok(())
    }

    async fn get(&self, remote: &str, local: &Path) -> anyhow::Result<()> {
        let mut source = self
            .sftp
            .open(remote)
            .await
            .with_context(|| format!("Failed to open remote file {}", remote))?;
        let mut target = tokio::fs::File::create(local)
            .await
            .with_context(|| format!("Failed to create {}", local.display()))?;

        let bytes = tokio::io::copy(&mut source, &mut target).await?;
        target.flush().await?;
        debug!("Downloaded {} bytes from {}", bytes, remote);
        Ok(())
    }

    async fn read_dir(&self, remote: &str) -> anyhow::Result<Vec<RemoteEntry>> {
        let entries = self.sftp.read_dir(remote).await?;
        Ok(entries
            .map(|entry| {
                let meta = entry.metadata();
                RemoteEntry {
                    filename: entry.file_name(),
                    mode: meta.permissions,
                    size: meta.size,
                    mtime: meta.mtime.map(u64::from),
                }
            })
            .collect())
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.sftp.close().await?;
        Ok(())
    }
}
