//! Configuration and CLI argument parsing for the SSH MCP tool server
//!
//! Connection parameters are not configured here: every `connect` tool call
//! carries its own host and credentials. The process-level options only tune
//! timeouts, the command length limit and logging.

use clap::Parser;

use crate::error::{Result, SshMcpError};

/// Default timeout for command execution in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000; // 60 seconds

/// Default max characters for command length (None = unlimited)
pub const DEFAULT_MAX_CHARS: Option<usize> = None;

/// Connection timeout in seconds
pub const CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Default tracing filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// SSH MCP tool server CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "remote-ssh-mcp")]
#[command(version)]
#[command(about = "MCP server exposing SSH connect, exec, file transfer and listing tools")]
pub struct Args {
    /// Transport connect timeout in seconds
    #[arg(long, default_value_t = CONNECTION_TIMEOUT_SECS, env = "SSH_MCP_CONNECT_TIMEOUT")]
    pub connect_timeout: u64,

    /// Default command execution timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS, env = "SSH_MCP_TIMEOUT")]
    pub timeout: u64,

    /// Maximum characters for command length.
    /// Use "none", "0", or negative value to disable limit.
    /// Default: unlimited
    #[arg(long = "maxChars", env = "SSH_MCP_MAX_CHARS", allow_hyphen_values = true)]
    pub max_chars: Option<String>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "remote_ssh_mcp=trace")
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "SSH_MCP_LOG_LEVEL")]
    pub log_level: String,
}

/// Parsed and validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Transport connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Default command timeout in milliseconds
    pub timeout_ms: u64,

    /// Maximum command length (None = unlimited)
    pub max_chars: Option<usize>,

    /// Tracing filter directive
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connect_timeout_secs: CONNECTION_TIMEOUT_SECS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_chars: DEFAULT_MAX_CHARS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Create Config from CLI Args
    pub fn from_args(args: Args) -> Result<Self> {
        validate_args(&args)?;

        Ok(Config {
            connect_timeout_secs: args.connect_timeout,
            timeout_ms: args.timeout,
            max_chars: parse_max_chars(args.max_chars.as_deref()),
            log_level: args.log_level,
        })
    }
}

/// Validate CLI arguments
fn validate_args(args: &Args) -> Result<()> {
    let mut errors = Vec::new();

    if args.connect_timeout == 0 {
        errors.push("--connect-timeout must be greater than 0".to_string());
    }

    if args.timeout == 0 {
        errors.push("--timeout must be greater than 0".to_string());
    }

    if args.log_level.trim().is_empty() {
        errors.push("--log-level cannot be empty".to_string());
    }

    if !errors.is_empty() {
        return Err(SshMcpError::config(errors.join("\n")));
    }

    Ok(())
}

/// Parse max_chars argument
///
/// - "none" (case-insensitive) → None (unlimited)
/// - "0" or negative → None (unlimited)
/// - positive integer → Some(value)
/// - None (not provided) or garbage → DEFAULT_MAX_CHARS
pub fn parse_max_chars(value: Option<&str>) -> Option<usize> {
    match value {
        None => DEFAULT_MAX_CHARS,
        Some(s) => {
            if s.eq_ignore_ascii_case("none") {
                return None;
            }

            match s.parse::<i64>() {
                Ok(n) if n <= 0 => None,
                Ok(n) => Some(n as usize),
                Err(_) => DEFAULT_MAX_CHARS,
            }
        }
    }
}
