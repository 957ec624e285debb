//! Error types for the SSH MCP tool server

use thiserror::Error;

/// Main error type for the SSH MCP tool server
///
/// Every tool handler reports failure through one of these variants. The
/// dispatcher renders them into an error-flagged tool result, so none of
/// them reach the MCP client as a protocol fault.
#[derive(Debug, Error)]
pub enum SshMcpError {
    /// `connect` was called without a password or a private key path
    #[error("Either password or privateKeyPath must be provided")]
    MissingCredential,

    /// The private key file could not be read
    #[error("Failed to read private key: {0}")]
    KeyRead(String),

    /// Transport connect or authentication failed (including timeout)
    #[error("SSH connection error: {0}")]
    Connect(String),

    /// No connection is registered under the given id
    #[error("No active SSH connection with id '{0}'")]
    UnknownConnection(String),

    /// Command execution timed out
    #[error("Command timeout after {0}ms")]
    CommandTimeout(u64),

    /// The remote session refused to start the command
    #[error("Failed to start command: {0}")]
    ExecStart(String),

    /// Upload source does not exist locally
    #[error("Local file not found: {0}")]
    LocalFileNotFound(String),

    /// The SFTP subsystem could not be opened
    #[error("Failed to open SFTP channel: {0}")]
    ChannelInit(String),

    /// File put/get failed
    #[error("File transfer failed: {0}")]
    Transfer(String),

    /// Remote directory read failed
    #[error("Failed to list directory: {0}")]
    List(String),

    /// Closing the session failed (the connection is still forgotten)
    #[error("Error while closing connection: {0}")]
    Disconnect(String),

    /// No tool registered under that name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using SshMcpError
pub type Result<T> = std::result::Result<T, SshMcpError>;

impl SshMcpError {
    /// Create a connect error from anything displayable
    pub fn connect(msg: impl ToString) -> Self {
        SshMcpError::Connect(msg.to_string())
    }

    /// Create an unknown-connection error for the given id
    pub fn unknown_connection(id: impl Into<String>) -> Self {
        SshMcpError::UnknownConnection(id.into())
    }

    /// Create a channel-init error from anything displayable
    pub fn channel_init(msg: impl ToString) -> Self {
        SshMcpError::ChannelInit(msg.to_string())
    }

    /// Create a transfer error from anything displayable
    pub fn transfer(msg: impl ToString) -> Self {
        SshMcpError::Transfer(msg.to_string())
    }

    /// Create an invalid params error from a string
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        SshMcpError::InvalidParams(msg.into())
    }

    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        SshMcpError::Config(msg.into())
    }
}
