//! In-memory transport used by unit tests
//!
//! Sessions share one fake remote filesystem. Exec understands a tiny
//! command language: `echo <text>`, `exit <code>`, `sleep <secs>`,
//! `stderr <text>` and `fail-start`. A `cd '<dir>' && ` prefix is recorded
//! and otherwise ignored.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail};
use async_trait::async_trait;

use crate::ssh::{CommandOutput, FileTransfer, RemoteEntry, RemoteSession, SshConfig, Transport};

/// Files and directories visible to every fake session
#[derive(Debug, Default)]
pub struct FakeRemote {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    pub dirs: Mutex<HashMap<String, Vec<RemoteEntry>>>,
}

#[derive(Debug, Default)]
pub struct FakeTransport {
    /// Fail every connect with this message
    pub fail_connect: Option<String>,
    /// Delay before connect answers
    pub connect_delay: Option<Duration>,
    /// Sessions fail to open SFTP
    pub fail_sftp: bool,
    /// Sessions fail to close
    pub fail_close: bool,

    pub remote: Arc<FakeRemote>,
    pub connects: AtomicUsize,
    pub configs: Mutex<Vec<SshConfig>>,
    pub sessions: Mutex<Vec<Arc<FakeSession>>>,
}

impl FakeTransport {
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// The n-th session handed out
    pub fn session(&self, n: usize) -> Arc<FakeSession> {
        self.sessions.lock().unwrap()[n].clone()
    }

    pub fn last_config(&self) -> SshConfig {
        self.configs.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn connect(&self, config: &SshConfig) -> anyhow::Result<Arc<dyn RemoteSession>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.configs.lock().unwrap().push(config.clone());

        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.fail_connect {
            bail!("{}", msg);
        }

        let session = Arc::new(FakeSession {
            remote: self.remote.clone(),
            fail_sftp: self.fail_sftp,
            fail_close: self.fail_close,
            ..Default::default()
        });
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }
}

#[derive(Debug, Default)]
pub struct FakeSession {
    pub remote: Arc<FakeRemote>,
    pub fail_sftp: bool,
    pub fail_close: bool,

    pub commands: Mutex<Vec<String>>,
    pub sftp_opens: AtomicUsize,
    pub closes: AtomicUsize,
}

impl FakeSession {
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn sftp_open_count(&self) -> usize {
        self.sftp_opens.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteSession for FakeSession {
    async fn exec(&self, command: &str) -> anyhow::Result<CommandOutput> {
        self.commands.lock().unwrap().push(command.to_string());

        let body = command.rsplit("&& ").next().unwrap_or(command);
        let (verb, arg) = body.split_once(' ').unwrap_or((body, ""));
        let mut output = CommandOutput::new();

        match verb {
            "fail-start" => bail!("channel request refused"),
            "echo" => {
                output.stdout = format!("{}\n", arg);
                output.exit_code = Some(0);
            }
            "stderr" => {
                output.stderr = format!("{}\n", arg);
                output.exit_code = Some(1);
            }
            "exit" => output.exit_code = Some(arg.parse()?),
            "sleep" => {
                tokio::time::sleep(Duration::from_secs(arg.parse()?)).await;
                output.exit_code = Some(0);
            }
            _ => output.exit_code = Some(0),
        }
        Ok(output)
    }

    async fn open_sftp(&self) -> anyhow::Result<Box<dyn FileTransfer>> {
        self.sftp_opens.fetch_add(1, Ordering::SeqCst);
        if self.fail_sftp {
            bail!("subsystem request failed");
        }
        Ok(Box::new(FakeSftp {
            remote: self.remote.clone(),
        }))
    }

    async fn close(&self) -> anyhow::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            bail!("connection reset by peer");
        }
        Ok(())
    }
}

struct FakeSftp {
    remote: Arc<FakeRemote>,
}

#[async_trait]
impl FileTransfer for FakeSftp {
    async fn put(&self, local: &Path, remote: &str) -> anyhow::Result<()> {
        let data = tokio::fs::read(local).await?;
        self.remote
            .files
            .lock()
            .unwrap()
            .insert(remote.to_string(), data);
        Ok(())
    }

    async fn get(&self, remote: &str, local: &Path) -> anyhow::Result<()> {
        let data = self
            .remote
            .files
            .lock()
            .unwrap()
            .get(remote)
            .cloned()
            .ok_or_else(|| anyhow!("No such file: {}", remote))?;
        tokio::fs::write(local, data).await?;
        Ok(())
    }

    async fn read_dir(&self, remote: &str) -> anyhow::Result<Vec<RemoteEntry>> {
        self.remote
            .dirs
            .lock()
            .unwrap()
            .get(remote)
            .cloned()
            .ok_or_else(|| anyhow!("No such file: {}", remote))
    }

    async fn close(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
