//! SSH configuration types
//!
//! Everything the transport needs to open one authenticated session.

use std::fmt;

/// Authentication material for a single connection
#[derive(Clone)]
pub enum Credential {
    /// Plaintext password authentication
    Password(String),

    /// OpenSSH private key content (not path!) with optional passphrase
    PrivateKey {
        content: String,
        passphrase: Option<String>,
    },
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Password(_) => f.write_str("Password(<redacted>)"),
            Credential::PrivateKey { passphrase, .. } => f
                .debug_struct("PrivateKey")
                .field("has_passphrase", &passphrase.is_some())
                .finish(),
        }
    }
}

/// SSH connection configuration
#[derive(Debug, Clone)]
pub struct SshConfig {
    /// Remote hostname or IP address
    pub host: String,

    /// SSH port (default: 22)
    pub port: u16,

    /// Username for authentication
    pub username: String,

    /// How to authenticate
    pub credential: Credential,
}

impl SshConfig {
    /// Create a configuration using password authentication on port 22
    pub fn with_password(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            credential: Credential::Password(password.into()),
        }
    }

    /// Create a configuration using key authentication on port 22
    pub fn with_private_key(
        host: impl Into<String>,
        username: impl Into<String>,
        content: impl Into<String>,
        passphrase: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            credential: Credential::PrivateKey {
                content: content.into(),
                passphrase,
            },
        }
    }

    /// Set the SSH port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
