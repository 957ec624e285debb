//! Transport seam between the tool handlers and the SSH library
//!
//! Handlers only talk to these traits. The production implementation lives
//! in [`super::connection`]; tests substitute an in-memory fake.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use super::command::CommandOutput;
use super::config::SshConfig;
use super::sftp::RemoteEntry;

/// Opens authenticated sessions
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect and authenticate. No timeout is applied here; callers wrap it.
    async fn connect(&self, config: &SshConfig) -> anyhow::Result<Arc<dyn RemoteSession>>;
}

/// One live, authenticated SSH session
#[async_trait]
pub trait RemoteSession: Send + Sync {
    /// Run a command on a fresh exec channel and collect its output until
    /// the channel closes.
    ///
    /// An `Err` means the command could not be started. Non-zero exit codes
    /// are reported through [`CommandOutput`].
    async fn exec(&self, command: &str) -> anyhow::Result<CommandOutput>;

    /// Open the SFTP subsystem on a new channel
    async fn open_sftp(&self) -> anyhow::Result<Box<dyn FileTransfer>>;

    /// Disconnect the session
    async fn close(&self) -> anyhow::Result<()>;
}

/// An open SFTP channel
#[async_trait]
pub trait FileTransfer: Send + Sync {
    /// Copy a whole local file to `remote`, replacing it if present
    async fn put(&self, local: &Path, remote: &str) -> anyhow::Result<()>;

    /// Copy a whole remote file to `local`, replacing it if present
    async fn get(&self, remote: &str, local: &Path) -> anyhow::Result<()>;

    /// Read the entries of a remote directory
    async fn read_dir(&self, remote: &str) -> anyhow::Result<Vec<RemoteEntry>>;

    /// Close the SFTP channel
    async fn close(&self) -> anyhow::Result<()>;
}
