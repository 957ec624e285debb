//! SSH transport module
//!
//! The [`Transport`] traits are what the tool handlers depend on; the russh
//! implementation sits behind them together with the helpers it needs for
//! command output, SFTP listings and command sanitizing.

pub mod command;
pub mod config;
pub mod connection;
pub mod handler;
pub mod sanitize;
pub mod sftp;
pub mod transport;

// Re-exports
pub use command::CommandOutput;
pub use config::{Credential, SshConfig};
pub use connection::{RusshSession, RusshTransport};
pub use handler::SshHandler;
pub use sanitize::{sanitize_command, shell_quote, with_working_dir};
pub use sftp::{is_directory_mode, ListingEntry, RemoteEntry};
pub use transport::{FileTransfer, RemoteSession, Transport};
